//! Canonical schema constants for serialized metadata and diagnostics
//!
//! These constants keep the error mapping and the library's own `tracing`
//! diagnostics consistent across crates.

// Keys of a serialized error mapping
pub const ERR_NAME: &str = "name";
pub const ERR_MESSAGE: &str = "message";
pub const ERR_STACK: &str = "stack";
pub const ERR_CAUSES: &str = "causes";

// Canonical field keys for diagnostics
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_PENDING: &str = "pending";
pub const FIELD_DRAINED: &str = "drained";
pub const FIELD_PATH: &str = "path";

// Canonical diagnostic event names
pub const EVENT_SINK_INSTALLED: &str = "sink_installed";
pub const EVENT_QUEUE_DRAINED: &str = "queue_drained";
pub const EVENT_SINK_WRITE_FAILED: &str = "sink_write_failed";
pub const EVENT_FILE_ROTATED: &str = "file_rotated";
pub const EVENT_PANIC_HOOK_INSTALLED: &str = "panic_hook_installed";

/// Placeholder written in place of redacted values
pub const REDACTED: &str = "***REDACTED***";
