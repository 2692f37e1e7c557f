use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::output::domain::image_writer::ImageWriter;
use crate::output::infrastructure::image_file_writer::ImageFileWriter;
use crate::recognition::domain::text_recognizer::{RecognizeError, TextRecognizer};
use crate::shared::constants::{DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT_SECONDS, DEFAULT_TESSERACT_PATH};
use crate::shared::frame::Frame;
use crate::shared::process_runner::run_with_timeout;

/// OCR through the `tesseract` command-line engine.
///
/// Each frame is staged as a PNG in a private temporary directory and
/// recognized with `tesseract <png> stdout -l <lang>`.
pub struct TesseractRecognizer {
    program: PathBuf,
    language: String,
    timeout: Duration,
    writer: ImageFileWriter,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_TESSERACT_PATH),
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_OCR_TIMEOUT_SECONDS),
            writer: ImageFileWriter::new(),
        }
    }

    pub fn with_program(mut self, program: &Path) -> Self {
        self.program = program.to_path_buf();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, frame: &Frame) -> Result<String, RecognizeError> {
        let staging = tempfile::tempdir().map_err(|e| RecognizeError::Stage(e.to_string()))?;
        let image_path = staging.path().join("roi.png");
        self.writer
            .write(&image_path, frame)
            .map_err(|e| RecognizeError::Stage(e.to_string()))?;

        let mut command = Command::new(&self.program);
        command
            .arg(&image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language);
        let output = run_with_timeout(command, Some(self.timeout))?;

        if !output.status.success() {
            return Err(RecognizeError::Failed {
                status: output.status.to_string(),
                stderr: output.stderr_lossy().trim().to_string(),
            });
        }
        Ok(output.stdout_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::process_runner::ProcessError;

    fn blank_frame() -> Frame {
        Frame::new(vec![255; 32 * 16 * 3], 32, 16, 3, 0)
    }

    #[test]
    fn test_defaults() {
        let recognizer = TesseractRecognizer::default();
        assert_eq!(recognizer.language(), "eng");
    }

    #[test]
    fn test_missing_engine_is_process_error() {
        let recognizer =
            TesseractRecognizer::new().with_program(Path::new("/nonexistent/tesseract"));
        assert!(matches!(
            recognizer.recognize(&blank_frame()),
            Err(RecognizeError::Process(ProcessError::Spawn { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failed() {
        let recognizer = TesseractRecognizer::new().with_program(Path::new("false"));
        assert!(matches!(
            recognizer.recognize(&blank_frame()),
            Err(RecognizeError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_returned() {
        // `echo` prints its arguments: the staged image path, "stdout", "-l", lang.
        let recognizer = TesseractRecognizer::new()
            .with_program(Path::new("echo"))
            .with_language("rus");
        let text = recognizer.recognize(&blank_frame()).unwrap();
        assert!(text.contains("roi.png stdout -l rus"), "got: {text}");
    }

    #[test]
    fn test_grayscale_frame_is_staged() {
        // A 1-channel frame must be writable; the missing engine only fails
        // after staging succeeded.
        let frame = Frame::new(vec![0; 16], 4, 4, 1, 0);
        let recognizer =
            TesseractRecognizer::new().with_program(Path::new("/nonexistent/tesseract"));
        assert!(matches!(
            recognizer.recognize(&frame),
            Err(RecognizeError::Process(_))
        ));
    }

    #[test]
    #[ignore] // Requires tesseract on PATH
    fn test_recognizes_blank_image_without_error() {
        let text = TesseractRecognizer::new().recognize(&blank_frame()).unwrap();
        assert!(text.trim().len() < 10);
    }
}
