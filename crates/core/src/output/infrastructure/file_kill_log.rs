use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::output::domain::kill_log::{KillLog, KillLogError};
use crate::shared::kill_record::KillRecord;

/// Appends records to a UTF-8 text file, creating it on first write.
///
/// The file is opened per batch and never truncated, so repeated runs
/// against the same video accumulate. There is no locking.
pub struct FileKillLog {
    path: PathBuf,
}

impl FileKillLog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> KillLogError {
        KillLogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KillLog for FileKillLog {
    fn append(&mut self, records: &[KillRecord]) -> Result<(), KillLogError> {
        if records.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{record}").map_err(|e| self.io_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))
    }
}
