use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::process_runner::ProcessError;

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("failed to stage image for OCR: {0}")]
    Stage(String),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Domain interface for optical character recognition.
///
/// Output is best-effort multi-line text with no guarantee that lines
/// correspond to visual rows; callers must treat it as untrusted.
pub trait TextRecognizer: Send {
    fn recognize(&self, frame: &Frame) -> Result<String, RecognizeError>;
}
