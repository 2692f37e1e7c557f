use std::path::Path;

use thiserror::Error;

use crate::shared::process_runner::ProcessError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("decoder exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// The slice of the recording to sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractionWindow {
    pub start_seconds: u32,
    pub duration_seconds: u32,
    pub fps: u32,
}

/// Console output of a finished decoder run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub stdout: String,
    pub stderr: String,
}

/// Samples still images out of a video into a directory.
///
/// Implementations write `<prefix>_0001.png`, `<prefix>_0002.png`, ... so
/// that filename order is capture order.
pub trait FrameExtractor: Send {
    fn extract(
        &self,
        window: &ExtractionWindow,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<ExtractReport, ExtractError>;

    /// Printable command line for `extract`, if it runs an external program.
    fn command_line(
        &self,
        _window: &ExtractionWindow,
        _output_dir: &Path,
        _prefix: &str,
    ) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_carries_stderr() {
        let err = ExtractError::Failed {
            status: "exit status: 1".into(),
            stderr: "raid.mp4: No such file or directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "decoder exited with exit status: 1: raid.mp4: No such file or directory"
        );
    }
}
