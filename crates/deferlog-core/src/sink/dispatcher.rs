//! Level-filtered fan-out

use super::Sink;
use crate::entry::LogEntry;
use deferlog_core_types::Level;
use std::fmt;
use std::sync::Arc;

/// One destination of a dispatcher, with an optional own threshold
#[derive(Clone)]
pub struct Transport {
    sink: Arc<dyn Sink>,
    level: Option<Level>,
    handle_panics: bool,
}

impl Transport {
    /// Transport using the dispatcher's threshold; receives panic reports
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            level: None,
            handle_panics: true,
        }
    }

    /// Override the threshold for this transport only
    pub fn with_level(mut self, level: Option<Level>) -> Self {
        self.level = level;
        self
    }

    /// Whether uncaught panics are reported to this transport
    pub fn with_panics(mut self, handle_panics: bool) -> Self {
        self.handle_panics = handle_panics;
        self
    }

    pub fn handles_panics(&self) -> bool {
        self.handle_panics
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("level", &self.level)
            .field("handle_panics", &self.handle_panics)
            .finish_non_exhaustive()
    }
}

/// Delivers each entry to every transport whose threshold admits it,
/// in transport order
#[derive(Debug, Clone)]
pub struct Dispatcher {
    level: Level,
    transports: Vec<Transport>,
}

impl Dispatcher {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            transports: Vec::new(),
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transports.push(transport);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn transport_count(&self) -> usize {
        self.transports.len()
    }

    /// The transports that report panics, or `None` when there are none
    pub fn panic_dispatcher(&self) -> Option<Dispatcher> {
        let transports: Vec<Transport> = self
            .transports
            .iter()
            .filter(|t| t.handle_panics)
            .cloned()
            .collect();
        if transports.is_empty() {
            None
        } else {
            Some(Dispatcher {
                level: self.level,
                transports,
            })
        }
    }
}

impl Sink for Dispatcher {
    fn log(&self, entry: &LogEntry) {
        for transport in &self.transports {
            let threshold = transport.level.unwrap_or(self.level);
            if entry.level().enabled_at(threshold) {
                transport.sink.log(entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_dispatcher_threshold_applies() {
        let memory = MemorySink::new();
        let dispatcher =
            Dispatcher::new(Level::Info).with_transport(Transport::new(Arc::new(memory.clone())));

        dispatcher.log(&LogEntry::new(Level::Debug, "t", "hidden"));
        dispatcher.log(&LogEntry::new(Level::Warn, "t", "shown"));

        assert_eq!(memory.messages(), vec!["shown".to_string()]);
    }

    #[test]
    fn test_transport_level_overrides_dispatcher() {
        let verbose = MemorySink::new();
        let quiet = MemorySink::new();
        let dispatcher = Dispatcher::new(Level::Info)
            .with_transport(Transport::new(Arc::new(verbose.clone())).with_level(Some(Level::Silly)))
            .with_transport(Transport::new(Arc::new(quiet.clone())).with_level(Some(Level::Error)));

        dispatcher.log(&LogEntry::new(Level::Debug, "t", "debug"));
        dispatcher.log(&LogEntry::new(Level::Error, "t", "error"));

        assert_eq!(verbose.len(), 2);
        assert_eq!(quiet.messages(), vec!["error".to_string()]);
        assert_eq!(dispatcher.transport_count(), 2);
    }

    #[test]
    fn test_panic_dispatcher_keeps_only_panic_transports() {
        let reporting = MemorySink::new();
        let silent = MemorySink::new();
        let dispatcher = Dispatcher::new(Level::Info)
            .with_transport(Transport::new(Arc::new(reporting.clone())))
            .with_transport(Transport::new(Arc::new(silent.clone())).with_panics(false));

        let panics = dispatcher.panic_dispatcher().unwrap();
        assert_eq!(panics.transport_count(), 1);
        panics.log(&LogEntry::new(Level::Error, "panic", "uncaught panic"));
        assert_eq!(reporting.len(), 1);
        assert!(silent.is_empty());

        let none = Dispatcher::new(Level::Info)
            .with_transport(Transport::new(Arc::new(MemorySink::new())).with_panics(false));
        assert!(none.panic_dispatcher().is_none());
    }
}
