//! Configuration for the editorial and rhythmic authorities.
//!
//! Both configs are plain values built upstream (usually from a
//! [`MarketingPreset`](crate::MarketingPreset) plus an optional brand bias)
//! and are never mutated by the engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shot::ShotPurpose;

/// Configuration for the editorial authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct EditorialConfig {
    // ============================================
    // Trimming targets
    // ============================================
    /// Fraction of the original duration to cut (0.175 = 17.5%).
    #[validate(range(min = 0.0, max = 1.0))]
    pub target_reduction_percent: f64,

    /// Lower edge of the acceptable trim band.
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_reduction_percent: f64,

    /// Upper edge of the acceptable trim band.
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_reduction_percent: f64,

    // ============================================
    // Duration constraints
    // ============================================
    /// Minimum shot length after shortening.
    #[validate(range(exclusive_min = 0.0))]
    pub min_shot_duration: f64,

    /// Emotion shots longer than this become eligible for shortening.
    #[validate(range(exclusive_min = 0.0))]
    pub max_shot_duration: f64,

    // ============================================
    // Opening rules (first N seconds)
    // ============================================
    #[validate(range(min = 0.0))]
    pub opening_duration: f64,
    pub opening_allowed_purposes: Vec<ShotPurpose>,

    // ============================================
    // Ending rules (last N seconds)
    // ============================================
    #[validate(range(min = 0.0))]
    pub ending_duration: f64,
    pub ending_allowed_purposes: Vec<ShotPurpose>,
}

impl Default for EditorialConfig {
    fn default() -> Self {
        Self {
            target_reduction_percent: 0.175, // middle of the 15-20% band
            min_reduction_percent: 0.15,
            max_reduction_percent: 0.20,

            min_shot_duration: 1.5,
            max_shot_duration: 8.0,

            opening_duration: 5.0,
            opening_allowed_purposes: vec![ShotPurpose::Emotion, ShotPurpose::Atmosphere],

            ending_duration: 5.0,
            ending_allowed_purposes: vec![ShotPurpose::Emotion, ShotPurpose::Transition],
        }
    }
}

impl EditorialConfig {
    /// Builder: Set the trim target.
    pub fn with_target_reduction(mut self, percent: f64) -> Self {
        self.target_reduction_percent = percent;
        self
    }

    /// Builder: Set shot duration bounds.
    pub fn with_shot_duration_limits(mut self, min: f64, max: f64) -> Self {
        self.min_shot_duration = min;
        self.max_shot_duration = max;
        self
    }

    /// Builder: Set the opening window length.
    pub fn with_opening_duration(mut self, seconds: f64) -> Self {
        self.opening_duration = seconds;
        self
    }

    /// Builder: Set the ending window length.
    pub fn with_ending_duration(mut self, seconds: f64) -> Self {
        self.ending_duration = seconds;
        self
    }
}

/// Configuration for the rhythmic authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct RhythmConfig {
    // ============================================
    // Variation requirements
    // ============================================
    /// Minimum relative duration change between adjacent shots (0.40 = ±40%).
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_duration_variation: f64,

    /// Maximum consecutive shots sharing one intensity.
    #[validate(range(min = 1))]
    pub max_same_intensity_run: usize,

    // ============================================
    // Emotion shot tightening
    // ============================================
    /// Fraction trimmed from the start (late entry).
    #[validate(range(min = 0.0, max = 1.0))]
    pub emotion_entry_trim: f64,

    /// Fraction trimmed from the end (early exit).
    #[validate(range(min = 0.0, max = 1.0))]
    pub emotion_exit_trim: f64,

    /// Fraction of the shot treated as the untouchable peak.
    #[validate(range(min = 0.0, max = 1.0))]
    pub emotion_peak_preserve: f64,

    // ============================================
    // Intensity duration bounds
    // ============================================
    #[validate(range(exclusive_min = 0.0))]
    pub high_shot_min_duration: f64,

    #[validate(range(exclusive_min = 0.0))]
    pub low_shot_max_duration: f64,

    /// Prefer a breather after high-intensity shots (carried from presets).
    pub force_interstitial_after_high: bool,
}

impl Default for RhythmConfig {
    fn default() -> Self {
        Self {
            min_duration_variation: 0.40,
            max_same_intensity_run: 2,

            emotion_entry_trim: 0.15,
            emotion_exit_trim: 0.20,
            emotion_peak_preserve: 0.65,

            high_shot_min_duration: 1.5,
            low_shot_max_duration: 8.0,

            force_interstitial_after_high: true,
        }
    }
}

impl RhythmConfig {
    /// Builder: Set variation requirements.
    pub fn with_variation(mut self, min_duration_variation: f64, max_run: usize) -> Self {
        self.min_duration_variation = min_duration_variation;
        self.max_same_intensity_run = max_run;
        self
    }

    /// Builder: Set emotion entry/exit trims.
    pub fn with_emotion_trims(mut self, entry: f64, exit: f64) -> Self {
        self.emotion_entry_trim = entry;
        self.emotion_exit_trim = exit;
        self
    }

    /// Builder: Set intensity duration bounds.
    pub fn with_intensity_bounds(mut self, high_min: f64, low_max: f64) -> Self {
        self.high_shot_min_duration = high_min;
        self.low_shot_max_duration = low_max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(EditorialConfig::default().validate().is_ok());
        assert!(RhythmConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_editorial_config() {
        let config = EditorialConfig::default();
        assert!((config.target_reduction_percent - 0.175).abs() < 0.001);
        assert!((config.min_shot_duration - 1.5).abs() < 0.001);
        assert_eq!(config.ending_allowed_purposes.len(), 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RhythmConfig::default()
            .with_variation(0.5, 3)
            .with_emotion_trims(0.1, 0.15);

        assert_eq!(config.max_same_intensity_run, 3);
        assert!((config.min_duration_variation - 0.5).abs() < 0.001);
        assert!((config.emotion_exit_trim - 0.15).abs() < 0.001);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = EditorialConfig::default().with_target_reduction(1.5);
        assert!(config.validate().is_err());

        let config = EditorialConfig::default().with_shot_duration_limits(0.0, 8.0);
        assert!(config.validate().is_err());

        let config = RhythmConfig::default().with_variation(0.4, 0);
        assert!(config.validate().is_err());
    }
}
