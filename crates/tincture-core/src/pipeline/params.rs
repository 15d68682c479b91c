//! Parameters for one pipeline run.
//!
//! `PipelineParams` is passed by value into every call; nothing is read
//! from shared state. All fields default to their identity value.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Blend, brightness and contrast settings applied after the LUT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Mix between the original (0.0) and LUT-mapped (1.0) color. Default: 1.0.
    pub intensity: f32,
    /// Additive offset applied to every channel. 0.0 = neutral.
    pub brightness: f32,
    /// Multiplier around mid-gray 0.5. 1.0 = neutral.
    pub contrast: f32,
}

impl PipelineParams {
    pub const INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=1.0;
    pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = -1.0..=1.0;
    pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.5..=2.0;

    /// Pivot that contrast scales around.
    pub const CONTRAST_PIVOT: f32 = 0.5;

    pub fn new(intensity: f32, brightness: f32, contrast: f32) -> Self {
        Self {
            intensity,
            brightness,
            contrast,
        }
    }

    /// Parse from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field against its declared range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("intensity", self.intensity, Self::INTENSITY_RANGE),
            ("brightness", self.brightness, Self::BRIGHTNESS_RANGE),
            ("contrast", self.contrast, Self::CONTRAST_RANGE),
        ];
        for (field, value, range) in fields {
            if !range.contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Copy with each field clamped into its range. NaN takes the default.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        Self {
            intensity: clamp_to(self.intensity, Self::INTENSITY_RANGE, defaults.intensity),
            brightness: clamp_to(self.brightness, Self::BRIGHTNESS_RANGE, defaults.brightness),
            contrast: clamp_to(self.contrast, Self::CONTRAST_RANGE, defaults.contrast),
        }
    }

    /// True when brightness and contrast leave colors untouched.
    pub fn is_neutral_tone(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 1.0
    }
}

impl Default for PipelineParams {
    /// Full-strength LUT with no tonal adjustment.
    fn default() -> Self {
        Self {
            intensity: 1.0,
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

fn clamp_to(value: f32, range: RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
