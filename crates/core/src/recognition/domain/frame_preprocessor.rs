use crate::shared::frame::Frame;

/// Image clean-up applied to the cropped kill list before OCR.
pub trait FramePreprocessor: Send {
    fn preprocess(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>>;
}
