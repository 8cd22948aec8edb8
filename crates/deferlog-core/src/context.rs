//! Logging context and initialization
//!
//! A [`LoggingContext`] owns the sink handle and the deferred queue shared by
//! all loggers created from it. Before [`LoggingContext::init`] completes,
//! every log call is queued as a [`DeferredDispatch`]; `init` installs the
//! sink, replays the queue in call order and from then on loggers deliver
//! directly.
//!
//! Lifecycle: `Uninitialized -> Initializing -> Initialized`. There is no
//! way back, and a second `init` is rejected.

use crate::config::LoggerConfig;
use crate::entry::LogEntry;
use crate::errors::{LogError, Result};
use crate::logger::Logger;
use crate::panic_hook;
use crate::queue::DeferredQueue;
use crate::sink::Sink;
use deferlog_core_types::schema::{EVENT_QUEUE_DRAINED, EVENT_SINK_INSTALLED};
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Lifecycle phase of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initializing,
    Initialized,
}

/// Sink operation a deferred record performs when replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOp {
    Log,
}

/// A queued delivery: the entry as captured plus the operation to run
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredDispatch {
    entry: LogEntry,
    op: SinkOp,
}

impl DeferredDispatch {
    pub fn log(entry: LogEntry) -> Self {
        Self {
            entry,
            op: SinkOp::Log,
        }
    }

    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }

    pub fn op(&self) -> SinkOp {
        self.op
    }

    fn apply(self, sink: &dyn Sink) {
        match self.op {
            SinkOp::Log => sink.log(&self.entry),
        }
    }
}

struct ContextInner {
    phase: Mutex<Phase>,
    sink: OnceLock<Arc<dyn Sink>>,
    queue: DeferredQueue<DeferredDispatch>,
}

/// Shared sink handle and deferred queue
///
/// Cloning is cheap; clones refer to the same context.
#[derive(Clone)]
pub struct LoggingContext {
    inner: Arc<ContextInner>,
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("phase", &self.phase())
            .field("pending", &self.inner.queue.len())
            .finish()
    }
}

impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<LoggingContext> = OnceLock::new();

impl LoggingContext {
    /// Create an independent, uninitialized context
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                phase: Mutex::new(Phase::Uninitialized),
                sink: OnceLock::new(),
                queue: DeferredQueue::new(),
            }),
        }
    }

    /// The process-wide default context
    pub fn global() -> &'static LoggingContext {
        GLOBAL.get_or_init(LoggingContext::new)
    }

    /// Create a logger for `label`; no side effects beyond allocation
    pub fn create_logger(&self, label: impl Into<String>) -> Logger {
        Logger::new(label, self.clone())
    }

    pub fn phase(&self) -> Phase {
        *self.inner.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliveries waiting for `init`, oldest first
    pub fn pending(&self) -> Vec<DeferredDispatch> {
        self.inner.queue.snapshot()
    }

    /// Deliver now if the sink is live, otherwise queue
    pub(crate) fn dispatch(&self, entry: LogEntry) {
        if let Err(record) = self.inner.queue.push(DeferredDispatch::log(entry)) {
            if let Some(sink) = self.inner.sink.get() {
                record.apply(sink.as_ref());
            }
        }
    }

    /// Install the sink described by `config` and replay queued entries
    ///
    /// Configuration is validated before anything else happens; on error
    /// no sink is created and the queue is left as it was. Returns once the
    /// queue, including entries logged while replaying, has been drained.
    ///
    /// When the file or console transport has `handle_panics` set (the
    /// default), a panic hook is chained in front of the current one and
    /// reports uncaught panics to those transports at `error` level.
    ///
    /// # Errors
    ///
    /// Returns `LogError::MissingFilename` or `LogError::InvalidConfig` for
    /// bad configuration and `LogError::AlreadyInitialized` when called a
    /// second time.
    pub async fn init(&self, config: LoggerConfig) -> Result<()> {
        let resolved = config.resolve()?;
        self.begin_init()?;

        let dispatcher = resolved.build_dispatcher(config.transports);
        if let Some(panics) = dispatcher.panic_dispatcher() {
            panic_hook::install(Arc::new(panics));
        }
        self.install(Arc::new(dispatcher)).await
    }

    /// Install a ready-made sink and replay queued entries
    ///
    /// # Errors
    ///
    /// Returns `LogError::AlreadyInitialized` when a sink is already
    /// installed.
    pub async fn init_with_sink(&self, sink: Arc<dyn Sink>) -> Result<()> {
        self.begin_init()?;
        self.install(sink).await
    }

    fn begin_init(&self) -> Result<()> {
        let mut phase = self.inner.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase != Phase::Uninitialized {
            return Err(LogError::AlreadyInitialized);
        }
        *phase = Phase::Initializing;
        Ok(())
    }

    async fn install(&self, sink: Arc<dyn Sink>) -> Result<()> {
        self.inner
            .sink
            .set(Arc::clone(&sink))
            .map_err(|_| LogError::AlreadyInitialized)?;

        tracing::debug!(
            component = module_path!(),
            op = "init",
            event = EVENT_SINK_INSTALLED,
            pending = self.inner.queue.len(),
        );

        let drained = self
            .inner
            .queue
            .flush_and_seal(|record| {
                record.apply(sink.as_ref());
                tokio::task::yield_now()
            })
            .await;

        *self.inner.phase.lock().unwrap_or_else(PoisonError::into_inner) = Phase::Initialized;

        tracing::debug!(
            component = module_path!(),
            op = "init",
            event = EVENT_QUEUE_DRAINED,
            drained,
        );
        Ok(())
    }
}
