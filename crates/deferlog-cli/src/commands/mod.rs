pub mod check_config;
pub mod demo;

use clap::Args;
use deferlog_core::{ConsoleConfig, Level, LoggerConfig, MetadataMode};
use std::path::PathBuf;

/// Configuration flags shared by commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file (overrides `file.filename`)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Threshold level (error, warn, info, debug, verbose, silly)
    #[arg(short, long)]
    pub level: Option<Level>,

    /// Disable console output
    #[arg(long)]
    pub no_console: bool,

    /// Disable console colors
    #[arg(long)]
    pub no_color: bool,

    /// Repeat the metadata list for each primitive item
    #[arg(long)]
    pub repeat_metadata: bool,

    /// Do not report uncaught panics through the log
    #[arg(long)]
    pub no_panic_hook: bool,
}

impl ConfigArgs {
    /// Load the config file if given, then apply flag overrides
    pub fn to_config(&self) -> deferlog_core::Result<LoggerConfig> {
        let mut config = match &self.config {
            Some(path) => LoggerConfig::from_toml_file(path)?,
            None => LoggerConfig::new(),
        };

        if let Some(file) = &self.file {
            let mut file_config = config.file.take().unwrap_or_default();
            file_config.filename = Some(file.clone());
            config.file = Some(file_config);
        }
        if let Some(level) = self.level {
            config.level = Some(level);
        }
        if self.no_console {
            config.console = Some(ConsoleConfig::disabled());
        } else if self.no_color {
            let mut console = config.console.take().unwrap_or_default();
            console.use_color = Some(false);
            config.console = Some(console);
        }
        if self.repeat_metadata {
            config.metadata_mode = Some(MetadataMode::Repeat);
        }
        if self.no_panic_hook {
            let mut file = config.file.take().unwrap_or_default();
            file.handle_panics = Some(false);
            config.file = Some(file);
            let mut console = config.console.take().unwrap_or_default();
            console.handle_panics = Some(false);
            config.console = Some(console);
        }
        Ok(config)
    }
}
