use deferlog_core::{ConsoleConfig, FileConfig, LoggerConfig, MemorySink};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Config writing to `<dir>/app.log`, console off, plus a memory transport
///
/// Returns the config, the memory sink receiving every delivery and the
/// log file path.
#[allow(dead_code)]
pub fn memory_config(dir: &TempDir) -> (LoggerConfig, MemorySink, PathBuf) {
    let path = dir.path().join("app.log");
    let memory = MemorySink::new();
    let config = LoggerConfig::new()
        .with_file(FileConfig::new(&path))
        .with_console(ConsoleConfig::disabled())
        .with_transport(Arc::new(memory.clone()));
    (config, memory, path)
}
