//! Per-label logger
//!
//! Each logger remembers when it was last called. Elapsed time is measured
//! and the timestamp advanced inside the call itself, so the value reflects
//! call order even when delivery is deferred until `init`.

use crate::context::LoggingContext;
use crate::entry::LogEntry;
use crate::metadata::{ErrorValue, Metadata};
use deferlog_core_types::Level;
use std::backtrace::Backtrace;
use std::time::Instant;

/// A labelled logger bound to a [`LoggingContext`]
///
/// # Example
///
/// ```
/// use deferlog_core::{meta, LoggingContext};
///
/// let ctx = LoggingContext::new();
/// let mut log = ctx.create_logger("db");
/// log.info("connecting", meta!["primary", 5432])
///     .debug("pool ready", meta![]);
/// assert_eq!(ctx.pending().len(), 2);
/// ```
#[derive(Debug)]
pub struct Logger {
    label: String,
    last_call: Instant,
    context: LoggingContext,
}

impl Logger {
    pub(crate) fn new(label: impl Into<String>, context: LoggingContext) -> Self {
        Self {
            label: label.into(),
            last_call: Instant::now(),
            context,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Log `message` at `level` with optional metadata
    ///
    /// An empty metadata list produces an entry without metadata.
    pub fn log(
        &mut self,
        level: Level,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = Metadata>,
    ) -> &mut Self {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_call);
        self.last_call = now;

        let entry = LogEntry::new(level, self.label.as_str(), message)
            .with_elapsed(elapsed)
            .with_metadata(metadata.into_iter().collect());
        self.context.dispatch(entry);
        self
    }

    /// Log at `error` level with at most one error value
    ///
    /// The error is described by its concrete type name, so pass the
    /// concrete error rather than a `dyn Error` where possible. A backtrace
    /// of the call site is attached when capture is enabled through
    /// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`.
    pub fn error<E>(&mut self, message: impl Into<String>, err: Option<&E>) -> &mut Self
    where
        E: std::error::Error + ?Sized,
    {
        let metadata = err.map(|e| {
            Metadata::Error(ErrorValue::from_error(e).with_backtrace(&Backtrace::capture()))
        });
        self.log(Level::Error, message, metadata)
    }

    /// Log at `error` level with an already described error
    pub fn error_value(&mut self, message: impl Into<String>, err: ErrorValue) -> &mut Self {
        self.log(Level::Error, message, [Metadata::Error(err)])
    }

    pub fn warn(
        &mut self,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = Metadata>,
    ) -> &mut Self {
        self.log(Level::Warn, message, metadata)
    }

    pub fn info(
        &mut self,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = Metadata>,
    ) -> &mut Self {
        self.log(Level::Info, message, metadata)
    }

    pub fn debug(
        &mut self,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = Metadata>,
    ) -> &mut Self {
        self.log(Level::Debug, message, metadata)
    }

    pub fn verbose(
        &mut self,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = Metadata>,
    ) -> &mut Self {
        self.log(Level::Verbose, message, metadata)
    }

    pub fn silly(
        &mut self,
        message: impl Into<String>,
        metadata: impl IntoIterator<Item = Metadata>,
    ) -> &mut Self {
        self.log(Level::Silly, message, metadata)
    }
}
