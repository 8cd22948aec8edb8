//! Sink configuration
//!
//! `LoggerConfig` is what callers hand to `init`. It can be built in code or
//! read from TOML:
//!
//! ```toml
//! level = "debug"
//! metadata_mode = "once"
//!
//! [file]
//! filename = "logs/app.log"
//! max_size = 1048576
//!
//! [console]
//! use_color = false
//! stderr_levels = ["error"]
//! handle_panics = false
//! ```
//!
//! Unset values fall back to defaults; values given by the caller always
//! win. Extra sinks can only be added in code. They report uncaught panics
//! whenever the file or console transport does.

use crate::errors::{LogError, Result};
use crate::format::{FormatOptions, Formatter, MetadataMode};
use crate::sink::file::{DEFAULT_MAX_FILES, DEFAULT_MAX_SIZE};
use crate::sink::{ConsoleSink, Dispatcher, FileSink, Sink, Transport};
use deferlog_core_types::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Threshold used when neither the config nor a transport sets one
pub const DEFAULT_LEVEL: Level = Level::Info;

/// File transport settings; `filename` is required at `init`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub filename: Option<PathBuf>,
    pub max_size: Option<u64>,
    pub max_files: Option<usize>,
    pub level: Option<Level>,
    pub use_color: Option<bool>,
    pub handle_panics: Option<bool>,
}

impl FileConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }
}

/// Console transport settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub enabled: Option<bool>,
    pub level: Option<Level>,
    pub use_color: Option<bool>,
    pub stderr_levels: Option<Vec<Level>>,
    pub handle_panics: Option<bool>,
}

impl ConsoleConfig {
    /// Console output switched off
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Self::default()
        }
    }
}

/// Everything `init` needs to build the sink
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub file: Option<FileConfig>,
    pub console: Option<ConsoleConfig>,
    pub level: Option<Level>,
    pub metadata_mode: Option<MetadataMode>,
    #[serde(skip)]
    pub transports: Vec<Arc<dyn Sink>>,
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("file", &self.file)
            .field("console", &self.console)
            .field("level", &self.level)
            .field("metadata_mode", &self.metadata_mode)
            .field("transports", &self.transports.len())
            .finish()
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: FileConfig) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_console(mut self, console: ConsoleConfig) -> Self {
        self.console = Some(console);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_metadata_mode(mut self, mode: MetadataMode) -> Self {
        self.metadata_mode = Some(mode);
        self
    }

    /// Add an extra destination after the file and console transports
    pub fn with_transport(mut self, sink: Arc<dyn Sink>) -> Self {
        self.transports.push(sink);
        self
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `LogError::ConfigParse` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `LogError::Io` when the file cannot be read and
    /// `LogError::ConfigParse` when it is not a valid configuration.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Merge defaults and validate
    ///
    /// # Errors
    ///
    /// Returns `LogError::MissingFilename` when no file target is given and
    /// `LogError::InvalidConfig` for a zero rotation size or file count.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let file = self.file.clone().unwrap_or_default();
        let filename = file
            .filename
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(LogError::MissingFilename)?;

        let max_size = file.max_size.unwrap_or(DEFAULT_MAX_SIZE);
        if max_size == 0 {
            return Err(LogError::InvalidConfig {
                reason: "file.max_size must be greater than zero".to_string(),
            });
        }
        let max_files = file.max_files.unwrap_or(DEFAULT_MAX_FILES);
        if max_files == 0 {
            return Err(LogError::InvalidConfig {
                reason: "file.max_files must be greater than zero".to_string(),
            });
        }

        let console = self.console.clone().unwrap_or_default();
        let console = if console.enabled.unwrap_or(true) {
            Some(ConsoleOptions {
                level: console.level,
                use_color: console.use_color.unwrap_or(true),
                stderr_levels: console.stderr_levels.unwrap_or_default(),
                handle_panics: console.handle_panics.unwrap_or(true),
            })
        } else {
            None
        };

        Ok(ResolvedConfig {
            level: self.level.unwrap_or(DEFAULT_LEVEL),
            metadata_mode: self.metadata_mode.unwrap_or_default(),
            file: FileOptions {
                filename,
                max_size,
                max_files,
                level: file.level,
                use_color: file.use_color.unwrap_or(false),
                handle_panics: file.handle_panics.unwrap_or(true),
            },
            console,
        })
    }
}

/// File transport settings with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOptions {
    pub filename: PathBuf,
    pub max_size: u64,
    pub max_files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub use_color: bool,
    pub handle_panics: bool,
}

/// Console transport settings with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub use_color: bool,
    pub stderr_levels: Vec<Level>,
    pub handle_panics: bool,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub level: Level,
    pub metadata_mode: MetadataMode,
    pub file: FileOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleOptions>,
}

impl ResolvedConfig {
    /// Build the dispatcher: file first, then console, then `extra` sinks
    pub fn build_dispatcher(&self, extra: Vec<Arc<dyn Sink>>) -> Dispatcher {
        let options = FormatOptions::default().with_metadata_mode(self.metadata_mode);

        let file = FileSink::new(
            self.file.filename.clone(),
            Formatter::new(options.with_color(self.file.use_color)),
        )
        .with_rotation(self.file.max_size, self.file.max_files);
        let mut dispatcher = Dispatcher::new(self.level).with_transport(
            Transport::new(Arc::new(file))
                .with_level(self.file.level)
                .with_panics(self.file.handle_panics),
        );

        if let Some(console) = &self.console {
            let sink = ConsoleSink::new(Formatter::new(options.with_color(console.use_color)))
                .with_stderr_levels(console.stderr_levels.clone());
            dispatcher = dispatcher.with_transport(
                Transport::new(Arc::new(sink))
                    .with_level(console.level)
                    .with_panics(console.handle_panics),
            );
        }

        let extra_panics = self.handles_panics();
        extra.into_iter().fold(dispatcher, |d, sink| {
            d.with_transport(Transport::new(sink).with_panics(extra_panics))
        })
    }

    /// Whether the file or the console transport reports uncaught panics
    pub fn handles_panics(&self) -> bool {
        self.file.handle_panics || self.console.as_ref().is_some_and(|c| c.handle_panics)
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns `LogError::ConfigRender` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
