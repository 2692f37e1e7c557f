use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::{
    FRAMES_DIR_SUFFIX, HIGHLIGHTS_DIR_SUFFIX, KILL_LOG_SUFFIX, OCR_DEBUG_DIR_SUFFIX,
};

/// Working paths derived from the input video, all siblings of the video
/// and named after its file stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    pub video_path: PathBuf,
    pub frames_dir: PathBuf,
    pub kill_log: PathBuf,
    pub ocr_debug_dir: PathBuf,
    pub highlights_dir: PathBuf,
}

impl OutputLayout {
    pub fn for_video(video_path: &Path) -> Self {
        let stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_dir = video_path.parent().unwrap_or_else(|| Path::new(""));
        let sibling = |suffix: &str| base_dir.join(format!("{stem}{suffix}"));

        Self {
            video_path: video_path.to_path_buf(),
            frames_dir: sibling(FRAMES_DIR_SUFFIX),
            kill_log: sibling(KILL_LOG_SUFFIX),
            ocr_debug_dir: sibling(OCR_DEBUG_DIR_SUFFIX),
            highlights_dir: sibling(HIGHLIGHTS_DIR_SUFFIX),
        }
    }

    /// Creates the frames, debug and highlights directories if missing.
    pub fn create_dirs(&self) -> io::Result<()> {
        for dir in [&self.frames_dir, &self.highlights_dir, &self.ocr_debug_dir] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
