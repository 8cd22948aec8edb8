//! Internal diagnostics
//!
//! The facade reports on itself (sink installed, queue drained, file
//! rotated, write failed) through `tracing` events carrying the canonical
//! `component`, `op` and `event` fields. Nothing is printed unless the host
//! installs a subscriber, e.g. with [`init`].
//!
//! ```rust
//! use deferlog_core::diagnostics::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
