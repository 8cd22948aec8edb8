//! Console sink

use super::Sink;
use crate::entry::LogEntry;
use crate::format::Formatter;
use deferlog_core_types::schema::EVENT_SINK_WRITE_FAILED;
use deferlog_core_types::Level;
use std::io::Write;

/// Stream a console line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes formatted lines to stdout, or stderr for selected levels
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    formatter: Formatter,
    stderr_levels: Vec<Level>,
}

impl ConsoleSink {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            stderr_levels: Vec::new(),
        }
    }

    /// Route the given levels to stderr
    pub fn with_stderr_levels(mut self, levels: Vec<Level>) -> Self {
        self.stderr_levels = levels;
        self
    }

    pub fn target_for(&self, level: Level) -> ConsoleTarget {
        if self.stderr_levels.contains(&level) {
            ConsoleTarget::Stderr
        } else {
            ConsoleTarget::Stdout
        }
    }
}

impl Sink for ConsoleSink {
    fn log(&self, entry: &LogEntry) {
        let line = self.formatter.format(entry);
        let result = match self.target_for(entry.level()) {
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
        if let Err(err) = result {
            tracing::warn!(
                component = module_path!(),
                op = "console_write",
                event = EVENT_SINK_WRITE_FAILED,
                error = %err,
            );
        }
    }
}
