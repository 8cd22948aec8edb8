use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code usable in tests and by callers that
/// want to branch on the failure class without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration is missing a required value or is malformed
    Config,
    /// `init` was called on a context that already has a sink
    AlreadyInitialized,
    /// Reading a configuration file failed
    Io,
    /// Configuration could not be rendered back to text
    Serialization,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Config => "ERR_CONFIG",
            ErrorKind::AlreadyInitialized => "ERR_ALREADY_INITIALIZED",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Errors surfaced by configuration and initialization
#[derive(Error, Debug)]
pub enum LogError {
    /// The file transport has no target location
    #[error("Filename is required for the file transport")]
    MissingFilename,

    /// A configuration value is out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration text is not valid TOML for `LoggerConfig`
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    /// A sink is already installed on this context
    #[error("Logging context is already initialized")]
    AlreadyInitialized,

    /// Reading a configuration file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            LogError::MissingFilename
            | LogError::InvalidConfig { .. }
            | LogError::ConfigParse(_) => ErrorKind::Config,
            LogError::ConfigRender(_) => ErrorKind::Serialization,
            LogError::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            LogError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
