//! Core types shared across deferlog crates
//!
//! This crate provides the vocabulary used by the logging facade, its sinks
//! and its command-line front end:
//!
//! - **Levels**: the npm-style severity ladder (`error` .. `silly`)
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction
//! - **Schema constants**: canonical field keys and diagnostic event names

pub mod level;
pub mod schema;
pub mod sensitive;

pub use level::{Level, ParseLevelError};
pub use sensitive::Sensitive;
