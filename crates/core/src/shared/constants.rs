/// Seconds of footage sampled after the kill-list timestamp.
pub const DEFAULT_DURATION_SECONDS: u32 = 180;
pub const DEFAULT_FPS: u32 = 1;
pub const DEFAULT_FRAME_PREFIX: &str = "end";

pub const DEFAULT_MAP_KEYWORD: &str = "Customs";
pub const DEFAULT_FACTION_KEYWORD: &str = "SCAV";
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Kill-list ROI as fractions of frame width/height: (left, top, right, bottom).
pub const DEFAULT_ROI: (f64, f64, f64, f64) = (0.15, 0.20, 0.85, 0.80);

/// Contrast adjustment passed to `image::imageops::contrast` when enhancing.
pub const DEFAULT_CONTRAST: f32 = 40.0;

pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";
pub const DEFAULT_TESSERACT_PATH: &str = "tesseract";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

pub const DEFAULT_OCR_TIMEOUT_SECONDS: u64 = 60;

/// A hung decoder is killed after this long (10 minutes).
pub const DEFAULT_DECODER_TIMEOUT_SECONDS: u64 = 600;

pub const FRAME_EXTENSION: &str = "png";

pub const FRAMES_DIR_SUFFIX: &str = "_frames";
pub const KILL_LOG_SUFFIX: &str = "_kill_log.txt";
pub const OCR_DEBUG_DIR_SUFFIX: &str = "_ocr_debug";
pub const HIGHLIGHTS_DIR_SUFFIX: &str = "_highlights";

pub const SETTINGS_DIR_NAME: &str = "raidlog";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
