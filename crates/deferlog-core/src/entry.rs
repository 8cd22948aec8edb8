//! Log entries

use crate::metadata::Metadata;
use chrono::{DateTime, Local};
use deferlog_core_types::Level;
use std::time::Duration;

/// A single log call, frozen at the moment it was made
///
/// Entries are built with the consuming `with_*` methods and are read-only
/// afterwards; a deferred entry is delivered exactly as it was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    level: Level,
    label: String,
    message: String,
    elapsed: Option<Duration>,
    timestamp: DateTime<Local>,
    metadata: Option<Vec<Metadata>>,
}

impl LogEntry {
    /// Create an entry stamped with the current wall-clock time
    pub fn new(level: Level, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
            message: message.into(),
            elapsed: None,
            timestamp: Local::now(),
            metadata: None,
        }
    }

    /// Time since the previous call on the same logger
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach metadata; an empty list leaves the entry without metadata
    pub fn with_metadata(mut self, metadata: Vec<Metadata>) -> Self {
        self.metadata = if metadata.is_empty() {
            None
        } else {
            Some(metadata)
        };
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn metadata(&self) -> Option<&[Metadata]> {
        self.metadata.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metadata_is_omitted() {
        let entry = LogEntry::new(Level::Info, "x", "a").with_metadata(Vec::new());
        assert!(entry.metadata().is_none());
    }

    #[test]
    fn test_metadata_kept_in_order() {
        let entry = LogEntry::new(Level::Debug, "x", "a")
            .with_metadata(vec![Metadata::from("first"), Metadata::from(2)]);
        let metadata = entry.metadata().unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0], Metadata::from("first"));
    }

    #[test]
    fn test_elapsed_defaults_to_none() {
        let entry = LogEntry::new(Level::Warn, "x", "a");
        assert!(entry.elapsed().is_none());
        let entry = entry.with_elapsed(Duration::from_millis(12));
        assert_eq!(entry.elapsed(), Some(Duration::from_millis(12)));
    }
}
