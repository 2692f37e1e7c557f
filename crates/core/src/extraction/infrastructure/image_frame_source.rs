use std::fs;
use std::path::{Path, PathBuf};

use crate::extraction::domain::frame_source::FrameSource;
use crate::shared::constants::FRAME_EXTENSION;
use crate::shared::frame::Frame;
use crate::shared::frame_conversion::image_to_frame;

/// Reads extracted PNG frames from a directory with the `image` crate.
pub struct ImageFrameSource;

impl ImageFrameSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for ImageFrameSource {
    fn list(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut frames = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_frame = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(FRAME_EXTENSION));
            if is_frame {
                frames.push(path);
            }
        }
        frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(frames)
    }

    fn load(&self, path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
        let image = image::open(path)?;
        Ok(image_to_frame(image, index))
    }
}
