//! Runtime configuration for the annotation surface.
//!
//! The host may pass a JSON object when mounting; any field it omits falls
//! back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_FONT, DEFAULT_FPS, DEFAULT_INVALID_STROKE, DEFAULT_REMOVE_ICON_URL, DEFAULT_STROKE,
    MIN_HEIGHT_PX, MIN_WIDTH_PX, REMOVE_HANDLE_HALF_PX,
};
use crate::error::SurfaceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Render ticks per second.
    pub fps: u32,
    /// Minimum `abs(width)` of a new annotation.
    pub min_width: f64,
    /// Minimum `abs(height)` of a new annotation.
    pub min_height: f64,
    /// Half-size of the remove handle square.
    pub remove_handle_half: f64,
    /// URL of the remove-glyph image.
    pub remove_icon_url: String,
    /// CSS font used for labels.
    pub font: String,
    /// Outline colour for valid and finalized annotations.
    pub stroke: String,
    /// Outline colour for an in-progress annotation that fails validation.
    pub invalid_stroke: String,
    /// Fill used to clear the surface each frame.
    pub background: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            min_width: MIN_WIDTH_PX,
            min_height: MIN_HEIGHT_PX,
            remove_handle_half: REMOVE_HANDLE_HALF_PX,
            remove_icon_url: DEFAULT_REMOVE_ICON_URL.to_owned(),
            font: DEFAULT_FONT.to_owned(),
            stroke: DEFAULT_STROKE.to_owned(),
            invalid_stroke: DEFAULT_INVALID_STROKE.to_owned(),
            background: DEFAULT_BACKGROUND.to_owned(),
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Config`] for malformed JSON and
    /// [`SurfaceError::InvalidConfig`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, SurfaceError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if self.fps == 0 {
            return Err(SurfaceError::InvalidConfig("fps must be positive"));
        }
        if [self.min_width, self.min_height].iter().any(|v| v.is_nan() || *v < 0.0) {
            return Err(SurfaceError::InvalidConfig("minimum size must be non-negative"));
        }
        if self.remove_handle_half.is_nan() || self.remove_handle_half < 0.0 {
            return Err(SurfaceError::InvalidConfig("remove_handle_half must be non-negative"));
        }
        Ok(())
    }

    /// Render timer period in whole milliseconds (at least 1).
    #[must_use]
    pub fn frame_interval_ms(&self) -> u32 {
        (1000 / self.fps.max(1)).max(1)
    }
}
