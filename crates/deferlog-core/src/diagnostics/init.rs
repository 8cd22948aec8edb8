//! Diagnostics subscriber setup

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Diagnostics output profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable diagnostics at debug level
    Development,
    /// JSON diagnostics at warn level
    Production,
    /// No output; tests install [`super::init_test_capture`] instead
    Test,
}

impl Profile {
    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "deferlog_core=debug",
            Profile::Production | Profile::Test => "deferlog_core=warn",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install a global `tracing` subscriber for the facade's own diagnostics
///
/// Only the first call has an effect. `RUST_LOG` overrides the profile's
/// default filter. If the host already set a global subscriber this is a
/// no-op.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        let result = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        result.ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(Profile::Development.default_directive(), "deferlog_core=debug");
        assert_eq!(Profile::Production.default_directive(), "deferlog_core=warn");
    }
}
