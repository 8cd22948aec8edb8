//! Output destinations
//!
//! A [`Sink`] receives fully built entries. Sinks own their formatting and
//! contain their own failures: `log` has no error channel, and I/O problems
//! are reported as `tracing` diagnostics instead of reaching the caller.

pub mod console;
pub mod dispatcher;
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, ConsoleTarget};
pub use dispatcher::{Dispatcher, Transport};
pub use file::FileSink;
pub use memory::{CapturedLine, MemorySink};

use crate::entry::LogEntry;

/// A destination for log entries
pub trait Sink: Send + Sync {
    fn log(&self, entry: &LogEntry);
}
