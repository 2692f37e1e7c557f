use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parsing::domain::kill_line_matcher::MatchMode;
use crate::shared::constants::*;
use crate::shared::region_of_interest::{RegionOfInterest, RoiError};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid ROI: {0}")]
    Roi(#[from] RoiError),
    #[error("{0}")]
    Invalid(String),
}

/// Every tunable of a run, built once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub duration_seconds: u32,
    pub fps: u32,
    pub frame_prefix: String,
    pub roi: RegionOfInterest,
    pub map_keyword: String,
    pub faction_keyword: String,
    pub threshold: f64,
    pub match_mode: MatchMode,
    pub enhance: bool,
    pub contrast: f32,
    pub save_debug: bool,
    pub ffmpeg_path: PathBuf,
    pub tesseract_path: PathBuf,
    pub ocr_language: String,
    pub decoder_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
            fps: DEFAULT_FPS,
            frame_prefix: DEFAULT_FRAME_PREFIX.to_string(),
            roi: RegionOfInterest::default(),
            map_keyword: DEFAULT_MAP_KEYWORD.to_string(),
            faction_keyword: DEFAULT_FACTION_KEYWORD.to_string(),
            threshold: DEFAULT_MATCH_THRESHOLD,
            match_mode: MatchMode::WholeLine,
            enhance: false,
            contrast: DEFAULT_CONTRAST,
            save_debug: false,
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            tesseract_path: PathBuf::from(DEFAULT_TESSERACT_PATH),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            decoder_timeout_seconds: DEFAULT_DECODER_TIMEOUT_SECONDS,
        }
    }
}

impl Settings {
    /// `<config dir>/raidlog/settings.json`, if the platform has a config dir.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads the per-user settings file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Loads `path` if it exists. An unreadable, malformed or invalid file
    /// is ignored with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path).and_then(|s| s.validate().map(|()| s)) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.roi.validate()?;
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SettingsError::Invalid(format!(
                "Threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid("FPS must be positive".into()));
        }
        if self.duration_seconds == 0 {
            return Err(SettingsError::Invalid("Duration must be positive".into()));
        }
        if self.decoder_timeout_seconds == 0 {
            return Err(SettingsError::Invalid(
                "Decoder timeout must be positive".into(),
            ));
        }
        if self.map_keyword.trim().is_empty() || self.faction_keyword.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "Map and faction keywords must not be empty".into(),
            ));
        }
        if self.frame_prefix.is_empty() {
            return Err(SettingsError::Invalid("Frame prefix must not be empty".into()));
        }
        Ok(())
    }
}
