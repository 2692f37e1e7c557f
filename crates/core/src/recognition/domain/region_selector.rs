use crate::shared::frame::Frame;
use crate::shared::region_of_interest::{RegionOfInterest, RoiError};

/// Crops frames to the part of the screen that holds the kill list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionSelector {
    roi: RegionOfInterest,
}

impl RegionSelector {
    pub fn new(roi: RegionOfInterest) -> Self {
        Self { roi }
    }

    pub fn select(&self, frame: &Frame) -> Result<Frame, RoiError> {
        let (x0, y0, x1, y1) = self.roi.pixel_bounds(frame.width(), frame.height())?;
        Ok(frame.crop(x0, y0, x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RGB frame where pixel (x, y) is `[x, y, 0]`.
    fn coordinate_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_default_roi_crops_middle() {
        let frame = coordinate_frame(200, 100);
        let roi = RegionSelector::default().select(&frame).unwrap();
        // 15%..85% of 200 = 30..170, 20%..80% of 100 = 20..80
        assert_eq!(roi.width(), 140);
        assert_eq!(roi.height(), 60);
        let arr = roi.as_ndarray();
        assert_eq!(arr[[0, 0, 0]], 30);
        assert_eq!(arr[[0, 0, 1]], 20);
        assert_eq!(arr[[59, 139, 0]], 169);
        assert_eq!(arr[[59, 139, 1]], 79);
    }

    #[test]
    fn test_custom_roi() {
        let frame = coordinate_frame(100, 100);
        let selector = RegionSelector::new(RegionOfInterest::new(0.5, 0.0, 1.0, 0.25).unwrap());
        let roi = selector.select(&frame).unwrap();
        assert_eq!((roi.width(), roi.height()), (50, 25));
        assert_eq!(roi.as_ndarray()[[0, 0, 0]], 50);
    }

    #[test]
    fn test_resolution_independent() {
        let selector = RegionSelector::default();
        for (w, h) in [(64, 36), (128, 72), (256, 144)] {
            let roi = selector.select(&coordinate_frame(w, h)).unwrap();
            assert_eq!(roi.width(), (w as f64 * 0.85) as u32 - (w as f64 * 0.15) as u32);
            assert_eq!(roi.height(), (h as f64 * 0.8) as u32 - (h as f64 * 0.2) as u32);
        }
    }

    #[test]
    fn test_degenerate_frame_is_error() {
        let frame = coordinate_frame(1, 1);
        assert!(matches!(
            RegionSelector::default().select(&frame),
            Err(RoiError::NoPixels { .. })
        ));
    }
}
