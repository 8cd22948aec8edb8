//! In-memory sink
//!
//! Keeps every delivered entry together with its rendered line. Useful in
//! tests and for embedding applications that show recent log lines.

use super::Sink;
use crate::entry::LogEntry;
use crate::format::Formatter;
use std::sync::{Arc, Mutex};

/// A delivered entry and its rendered line
#[derive(Clone, Debug)]
pub struct CapturedLine {
    pub entry: LogEntry,
    pub line: String,
}

/// Sink that records deliveries in memory
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    formatter: Formatter,
    captured: Arc<Mutex<Vec<CapturedLine>>>,
}

impl MemorySink {
    /// Memory sink with an uncolored default formatter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formatter(formatter: Formatter) -> Self {
        Self {
            formatter,
            captured: Arc::default(),
        }
    }

    /// All deliveries, oldest first
    pub fn captured(&self) -> Vec<CapturedLine> {
        self.captured.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.captured().into_iter().map(|c| c.entry).collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.captured().into_iter().map(|c| c.line).collect()
    }

    /// Messages of all deliveries, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.captured()
            .into_iter()
            .map(|c| c.entry.message().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.captured.lock().map(|mut c| c.clear()).ok();
    }
}

impl Sink for MemorySink {
    fn log(&self, entry: &LogEntry) {
        let line = self.formatter.format(entry);
        self.captured
            .lock()
            .map(|mut c| {
                c.push(CapturedLine {
                    entry: entry.clone(),
                    line,
                })
            })
            .ok();
    }
}
