use ndarray::{s, ArrayView3};

/// A decoded still frame: contiguous 8-bit pixels in row-major order.
///
/// `channels` is 3 for RGB frames as decoded from disk and 1 once a frame
/// has been reduced to luminance for OCR. `index` is the position of the
/// frame in the extracted sequence.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixel rectangle `[x0, x1) x [y0, y1)` into a new frame.
    ///
    /// Bounds are clamped to the frame; the caller is responsible for
    /// rejecting rectangles that end up empty.
    pub fn crop(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Frame {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);

        let view = self.as_ndarray();
        let sub = view.slice(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize, ..]);
        let data: Vec<u8> = sub.iter().copied().collect();
        Frame::new(data, x1 - x0, y1 - y0, self.channels, self.index)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
