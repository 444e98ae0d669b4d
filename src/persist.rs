//! Saving lap history as a flat text table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::history::HistoryRing;

/// Fixed output file, relative to the working directory.
pub const HISTORY_FILE_NAME: &str = "history.dat";

/// Destination for the `save` command.
pub trait HistorySink {
    fn write_history(&mut self, history: &HistoryRing) -> io::Result<()>;
}

/// Writes the history table to one file, replacing previous contents each time.
#[derive(Debug, Clone)]
pub struct FileHistorySink {
    path: PathBuf,
}

impl FileHistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHistorySink {
    fn default() -> Self {
        Self::new(HISTORY_FILE_NAME)
    }
}

impl HistorySink for FileHistorySink {
    fn write_history(&mut self, history: &HistoryRing) -> io::Result<()> {
        fs::write(&self.path, history.to_table())
    }
}
