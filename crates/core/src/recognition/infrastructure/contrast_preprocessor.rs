use image::imageops;

use crate::recognition::domain::frame_preprocessor::FramePreprocessor;
use crate::shared::frame::Frame;
use crate::shared::frame_conversion::frame_to_image;

/// Reduces a crop to luminance and boosts its contrast so light UI text
/// separates from the dark kill-list background.
pub struct ContrastPreprocessor {
    contrast: f32,
}

impl ContrastPreprocessor {
    pub fn new(contrast: f32) -> Self {
        Self { contrast }
    }
}

impl FramePreprocessor for ContrastPreprocessor {
    fn preprocess(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        let gray = frame_to_image(frame)?.to_luma8();
        let boosted = imageops::contrast(&gray, self.contrast);
        let (w, h) = boosted.dimensions();
        Ok(Frame::new(boosted.into_raw(), w, h, 1, frame.index()))
    }
}
