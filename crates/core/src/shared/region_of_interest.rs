use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::DEFAULT_ROI;

#[derive(Error, Debug, PartialEq)]
pub enum RoiError {
    #[error("ROI fraction {name}={value} must be between 0.0 and 1.0")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("ROI is empty: {low} must be less than {high}")]
    Empty { low: &'static str, high: &'static str },
    #[error("ROI must be four comma-separated fractions 'left,top,right,bottom', got '{0}'")]
    Syntax(String),
    #[error("ROI covers no pixels on a {width}x{height} frame")]
    NoPixels { width: u32, height: u32 },
}

/// Fractional crop rectangle expected to contain the kill-list text.
///
/// Fractions are resolution-independent; pixel bounds are computed per frame
/// by truncating `dimension * fraction` toward zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for RegionOfInterest {
    fn default() -> Self {
        let (left, top, right, bottom) = DEFAULT_ROI;
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl RegionOfInterest {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, RoiError> {
        let roi = Self {
            left,
            top,
            right,
            bottom,
        };
        roi.validate()?;
        Ok(roi)
    }

    pub fn validate(&self) -> Result<(), RoiError> {
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RoiError::OutOfRange { name, value });
            }
        }
        if self.left >= self.right {
            return Err(RoiError::Empty {
                low: "left",
                high: "right",
            });
        }
        if self.top >= self.bottom {
            return Err(RoiError::Empty {
                low: "top",
                high: "bottom",
            });
        }
        Ok(())
    }

    /// Pixel bounds `(x0, y0, x1, y1)` for a frame of the given size,
    /// half-open on the right and bottom edges.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> Result<(u32, u32, u32, u32), RoiError> {
        let scale = |dim: u32, frac: f64| (dim as f64 * frac) as u32;
        let bounds = (
            scale(width, self.left),
            scale(height, self.top),
            scale(width, self.right),
            scale(height, self.bottom),
        );
        if bounds.0 >= bounds.2 || bounds.1 >= bounds.3 {
            return Err(RoiError::NoPixels { width, height });
        }
        Ok(bounds)
    }
}

impl FromStr for RegionOfInterest {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| RoiError::Syntax(s.to_string()))?;
        match values.as_slice() {
            [left, top, right, bottom] => Self::new(*left, *top, *right, *bottom),
            _ => Err(RoiError::Syntax(s.to_string())),
        }
    }
}
