use image::{DynamicImage, GrayImage, RgbImage};

use crate::shared::frame::Frame;

/// Wraps frame pixels in an `image` buffer. Only 1- and 3-channel frames
/// are produced by this crate.
pub fn frame_to_image(frame: &Frame) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (w, h) = (frame.width(), frame.height());
    let data = frame.data().to_vec();
    match frame.channels() {
        1 => GrayImage::from_raw(w, h, data)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(|| "Failed to create grayscale image from frame data".into()),
        3 => RgbImage::from_raw(w, h, data)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| "Failed to create image from frame data".into()),
        n => Err(format!("Unsupported channel count: {n}").into()),
    }
}

/// Decodes any `image` buffer into an RGB frame.
pub fn image_to_frame(image: DynamicImage, index: usize) -> Frame {
    let rgb = image.into_rgb8();
    let (w, h) = rgb.dimensions();
    Frame::new(rgb.into_raw(), w, h, 3, index)
}
