use std::path::PathBuf;

use thiserror::Error;

use crate::shared::kill_record::KillRecord;

#[derive(Error, Debug)]
pub enum KillLogError {
    #[error("failed to write kill log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistent, append-only sink for recognized kill records.
pub trait KillLog: Send {
    /// Appends records in order, one display line each.
    fn append(&mut self, records: &[KillRecord]) -> Result<(), KillLogError>;
}
