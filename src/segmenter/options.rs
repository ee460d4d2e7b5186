//! Per-run segmentation settings.
//!
//! Settings are immutable for the duration of one plate and are usually
//! deserialized from the JSON profile supplied by the caller. Every field has
//! a default, so partial profiles are accepted.

use crate::error::Error;
use crate::threshold::BinarizeParams;
use serde::{Deserialize, Serialize};

/// How the grid is obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Binarize, profile and search boundaries in the image signal.
    #[default]
    Calibrated,
    /// Fixed grid with constant offsets.
    Uniform,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationSettings {
    /// Expected number of colony rows.
    pub rows: usize,
    /// Expected number of colony columns.
    pub columns: usize,
    /// Smallest expected distance between adjacent grid lines (pixels).
    pub min_spacing: usize,
    /// Largest expected distance between adjacent inner grid lines (pixels).
    pub max_spacing: usize,
    /// Maximum edge displacement during breathing; `0` disables it.
    pub breathing_space: usize,
    /// Padding used by the uniform segmenter.
    pub offset: usize,
    /// The image holds one manually isolated colony.
    pub single_colony: bool,
    pub mode: SegmentationMode,
    pub binarize: BinarizeParams,
}

impl Default for SegmentationSettings {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 12,
            min_spacing: 40,
            max_spacing: 200,
            breathing_space: 0,
            offset: 0,
            single_colony: false,
            mode: SegmentationMode::Calibrated,
            binarize: BinarizeParams::default(),
        }
    }
}

impl SegmentationSettings {
    /// Reject settings no plate could satisfy.
    pub fn validate(&self) -> Result<(), Error> {
        if self.rows == 0 || self.columns == 0 {
            return Err(Error::Config(format!(
                "grid shape must be at least 1x1, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.min_spacing > self.max_spacing {
            return Err(Error::Config(format!(
                "min_spacing {} exceeds max_spacing {}",
                self.min_spacing, self.max_spacing
            )));
        }
        if self.binarize.radius == 0 {
            return Err(Error::Config("binarize.radius must be >= 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::{Polarity, ThresholdMethod};

    #[test]
    fn partial_profile_uses_defaults() {
        let json = r#"{
            "rows": 2,
            "columns": 3,
            "binarize": { "method": "sauvola", "polarity": "dark_objects" }
        }"#;
        let settings: SegmentationSettings = serde_json::from_str(json).unwrap();
        assert_eq!((settings.rows, settings.columns), (2, 3));
        assert_eq!(settings.min_spacing, 40);
        assert_eq!(settings.binarize.method, ThresholdMethod::Sauvola);
        assert_eq!(settings.binarize.polarity, Polarity::DarkObjects);
        assert_eq!(settings.binarize.radius, 15);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn inconsistent_settings_are_rejected() {
        let settings = SegmentationSettings {
            min_spacing: 300,
            max_spacing: 100,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        let settings = SegmentationSettings {
            rows: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
