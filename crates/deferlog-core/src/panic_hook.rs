//! Reporting of uncaught panics
//!
//! `init` chains a process-wide panic hook in front of the one already
//! installed. The hook logs the panic at `error` level through the
//! transports that report panics, then hands over to the previous hook, so
//! the usual stderr report and any other hooks still run.

use crate::entry::LogEntry;
use crate::metadata::{ErrorValue, Metadata};
use crate::sink::Sink;
use deferlog_core_types::schema::EVENT_PANIC_HOOK_INSTALLED;
use deferlog_core_types::Level;
use std::any::Any;
use std::panic::{self, Location};
use std::sync::Arc;

/// Label of entries that describe a panic
pub const PANIC_LABEL: &str = "panic";

pub(crate) fn install(sink: Arc<dyn Sink>) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        sink.log(&panic_entry(info.payload(), info.location()));
        previous(info);
    }));

    tracing::debug!(
        component = module_path!(),
        op = "init",
        event = EVENT_PANIC_HOOK_INSTALLED,
    );
}

/// Describe a panic as an `error` entry
///
/// The error value carries the panic message, the source location and the
/// name of the panicking thread when it has one.
pub fn panic_entry(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> LogEntry {
    let message = payload_message(payload);

    let mut err = ErrorValue::new("Panic", message.as_str());
    if let Some(location) = location {
        err = err.with_field("location", location.to_string());
    }
    if let Some(name) = std::thread::current().name() {
        err = err.with_field("thread", name);
    }

    LogEntry::new(
        Level::Error,
        PANIC_LABEL,
        format!("uncaught panic: {}", message),
    )
    .with_metadata(vec![Metadata::Error(err)])
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_payload_and_location() {
        let location = Location::caller();
        let entry = panic_entry(&"pool poisoned", Some(location));

        assert_eq!(entry.level(), Level::Error);
        assert_eq!(entry.label(), PANIC_LABEL);
        assert_eq!(entry.message(), "uncaught panic: pool poisoned");
        match entry.metadata() {
            Some([Metadata::Error(value)]) => {
                assert_eq!(value.name(), "Panic");
                assert_eq!(value.message(), "pool poisoned");
                assert_eq!(
                    value.fields().get("location").and_then(|v| v.as_str()),
                    Some(location.to_string().as_str())
                );
            }
            other => panic!("unexpected metadata {:?}", other),
        }
    }

    #[test]
    fn test_formatted_payload() {
        let payload = format!("index {} out of range", 7);
        let entry = panic_entry(&payload, None);
        assert_eq!(entry.message(), "uncaught panic: index 7 out of range");
    }

    #[test]
    fn test_opaque_payload() {
        let entry = panic_entry(&42_u8, None);
        assert_eq!(entry.message(), "uncaught panic: Box<dyn Any>");
    }
}
