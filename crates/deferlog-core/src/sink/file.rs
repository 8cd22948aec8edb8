//! Size-rotated file sink
//!
//! The file is opened lazily on the first write and appended to. When a
//! line would push it past `max_size`, files are shifted
//! (`app.log` -> `app1.log` -> `app2.log` ...) so that at most `max_files`
//! files exist, the oldest being dropped.

use super::Sink;
use crate::entry::LogEntry;
use crate::format::Formatter;
use deferlog_core_types::schema::{EVENT_FILE_ROTATED, EVENT_SINK_WRITE_FAILED};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Default rotation ceiling per file (5 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 5_242_880;
/// Default number of files kept, current one included
pub const DEFAULT_MAX_FILES: usize = 5;

#[derive(Debug, Default)]
struct FileState {
    file: Option<File>,
    written: u64,
}

/// Appends formatted lines to a file, rotating by size
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    max_size: u64,
    max_files: usize,
    formatter: Formatter,
    state: Mutex<FileState>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, formatter: Formatter) -> Self {
        Self {
            path: path.into(),
            max_size: DEFAULT_MAX_SIZE,
            max_files: DEFAULT_MAX_FILES,
            formatter,
            state: Mutex::new(FileState::default()),
        }
    }

    /// Set the rotation ceiling and file count; a count of 0 is treated as 1
    pub fn with_rotation(mut self, max_size: u64, max_files: usize) -> Self {
        self.max_size = max_size;
        self.max_files = max_files.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `index`-th rotated file: `app.log` -> `app{index}.log`
    pub fn rotated_path(&self, index: usize) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.path.extension() {
            Some(ext) => format!("{}{}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}{}", stem, index),
        };
        self.path.with_file_name(name)
    }

    fn open(&self) -> io::Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let written = file.metadata()?.len();
        Ok((file, written))
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_files == 1 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.rotated_path(self.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files - 1).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.rotated_path(1))?;

        tracing::debug!(
            component = module_path!(),
            op = "file_rotate",
            event = EVENT_FILE_ROTATED,
            path = %self.path.display(),
        );
        Ok(())
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes = line.len() as u64 + 1;

        if state.file.is_none() {
            let (file, written) = self.open()?;
            state.file = Some(file);
            state.written = written;
        }

        if state.written > 0 && state.written + bytes > self.max_size {
            state.file = None;
            self.rotate()?;
            let (file, written) = self.open()?;
            state.file = Some(file);
            state.written = written;
        }

        if let Some(file) = state.file.as_mut() {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
            state.written += bytes;
        }
        Ok(())
    }
}

impl Sink for FileSink {
    fn log(&self, entry: &LogEntry) {
        let line = self.formatter.format(entry);
        if let Err(err) = self.write_line(&line) {
            tracing::warn!(
                component = module_path!(),
                op = "file_write",
                event = EVENT_SINK_WRITE_FAILED,
                path = %self.path.display(),
                error = %err,
            );
        }
    }
}
