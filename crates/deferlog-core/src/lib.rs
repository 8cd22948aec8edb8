//! deferlog core - deferred-initialization logging facade
//!
//! Loggers can be created and used before any output exists. Calls made
//! before [`init`] are captured with their timing and replayed in order
//! once the sink is installed:
//!
//! ```
//! use deferlog_core::{meta, LoggingContext, MemorySink};
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let ctx = LoggingContext::new();
//!     let mut log = ctx.create_logger("boot");
//!     log.info("starting", meta![]);
//!
//!     let memory = MemorySink::new();
//!     ctx.init_with_sink(Arc::new(memory.clone())).await.unwrap();
//!     assert_eq!(memory.messages(), vec!["starting".to_string()]);
//! }
//! ```
//!
//! This crate provides:
//! - [`DeferredQueue`]: FIFO buffer with sequential, late-joiner-aware drain
//! - [`Logger`]: per-label facade with elapsed-time bookkeeping
//! - [`Formatter`]: level-colored line rendering with safe metadata
//! - [`LoggingContext::init`]: one-shot sink installation and replay
//! - File, console, memory and dispatcher sinks

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod entry;
pub mod errors;
pub mod format;
pub mod logger;
mod macros;
pub mod metadata;
pub mod panic_hook;
pub mod queue;
pub mod sink;

pub use config::{ConsoleConfig, FileConfig, LoggerConfig, ResolvedConfig};
pub use context::{DeferredDispatch, LoggingContext, Phase, SinkOp};
pub use deferlog_core_types::{Level, Sensitive};
pub use entry::LogEntry;
pub use errors::{ErrorKind, LogError, Result};
pub use format::{FormatOptions, Formatter, MetadataMode};
pub use logger::Logger;
pub use metadata::{ErrorValue, Metadata, Primitive};
pub use queue::DeferredQueue;
pub use sink::{ConsoleSink, Dispatcher, FileSink, MemorySink, Sink, Transport};

/// Create a logger on the process-wide context
pub fn logger(label: impl Into<String>) -> Logger {
    LoggingContext::global().create_logger(label)
}

/// Initialize the process-wide context
///
/// # Errors
///
/// See [`LoggingContext::init`].
pub async fn init(config: LoggerConfig) -> Result<()> {
    LoggingContext::global().init(config).await
}
