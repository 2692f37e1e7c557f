use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;

/// Enumerates and decodes extracted frame files.
pub trait FrameSource: Send {
    /// Frame files in `dir`, in capture (filename) order.
    fn list(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>>;

    /// Decodes one frame file; `index` is its position in the listing.
    fn load(&self, path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>>;
}
