//! Marketing-intent presets and brand pacing bias.
//!
//! These are the upstream config sources for the editing engine: a preset
//! fixes the hard constraints for a platform, and a brand bias nudges the
//! derived configs *within* those constraints, never against them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{EditorialConfig, RhythmConfig};
use crate::shot::{BeatIntensity, EndingIntent, ParseEnumError, ShotPurpose};

/// Marketing outcome the video is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarketingIntent {
    /// Short, aggressive, CTA-driven (pre-roll, paid social)
    PaidAd,
    /// Vertical, hook-heavy, engagement-optimized
    SocialReel,
    /// Longer, educational, retention-focused
    YoutubeExplainer,
}

impl MarketingIntent {
    pub const ALL: &'static [MarketingIntent] = &[
        MarketingIntent::PaidAd,
        MarketingIntent::SocialReel,
        MarketingIntent::YoutubeExplainer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketingIntent::PaidAd => "paid_ad",
            MarketingIntent::SocialReel => "social_reel",
            MarketingIntent::YoutubeExplainer => "youtube_explainer",
        }
    }

    /// Hard-constraint preset for this intent.
    pub fn preset(&self) -> MarketingPreset {
        match self {
            MarketingIntent::PaidAd => MarketingPreset::paid_ad(),
            MarketingIntent::SocialReel => MarketingPreset::social_reel(),
            MarketingIntent::YoutubeExplainer => MarketingPreset::youtube_explainer(),
        }
    }
}

impl fmt::Display for MarketingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MarketingIntent {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paid_ad" => Ok(MarketingIntent::PaidAd),
            "social_reel" => Ok(MarketingIntent::SocialReel),
            "youtube_explainer" => Ok(MarketingIntent::YoutubeExplainer),
            _ => Err(ParseEnumError::new("marketing intent", s)),
        }
    }
}

/// Editing-relevant hard constraints for a marketing intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketingPreset {
    pub intent: MarketingIntent,

    // Duration constraints (hard limits)
    pub max_duration_seconds: f64,
    pub min_duration_seconds: f64,
    pub target_duration_seconds: f64,

    /// How aggressively to trim
    pub target_reduction_percent: f64,

    // Opening rules
    pub opening_duration_seconds: f64,
    pub opening_required_purposes: Vec<ShotPurpose>,
    pub opening_required_intensity: BeatIntensity,

    // Ending rules
    pub ending_duration_seconds: f64,
    pub ending_required_intent: EndingIntent,
    pub ending_required_purposes: Vec<ShotPurpose>,

    // Intensity distribution targets (sum to 1.0)
    pub intensity_ratio_high: f64,
    pub intensity_ratio_medium: f64,
    pub intensity_ratio_low: f64,

    // Shot constraints
    pub min_shot_duration: f64,
    pub max_shot_duration: f64,
    pub max_shots: usize,
}

impl MarketingPreset {
    /// Paid media: 15-30s, first 3s must grab, ends on a CTA.
    pub fn paid_ad() -> Self {
        Self {
            intent: MarketingIntent::PaidAd,
            max_duration_seconds: 30.0,
            min_duration_seconds: 15.0,
            target_duration_seconds: 25.0,
            target_reduction_percent: 0.25,
            opening_duration_seconds: 3.0,
            opening_required_purposes: vec![ShotPurpose::Emotion, ShotPurpose::Atmosphere],
            opening_required_intensity: BeatIntensity::High,
            ending_duration_seconds: 3.0,
            ending_required_intent: EndingIntent::Provocation,
            ending_required_purposes: vec![ShotPurpose::Transition],
            intensity_ratio_high: 0.60,
            intensity_ratio_medium: 0.30,
            intensity_ratio_low: 0.10,
            min_shot_duration: 1.5,
            max_shot_duration: 4.0,
            max_shots: 12,
        }
    }

    /// Reels: 30-60s, emotional hook, soft CTA.
    pub fn social_reel() -> Self {
        Self {
            intent: MarketingIntent::SocialReel,
            max_duration_seconds: 60.0,
            min_duration_seconds: 30.0,
            target_duration_seconds: 45.0,
            target_reduction_percent: 0.20,
            opening_duration_seconds: 3.0,
            opening_required_purposes: vec![ShotPurpose::Emotion],
            opening_required_intensity: BeatIntensity::High,
            ending_duration_seconds: 5.0,
            ending_required_intent: EndingIntent::Transition,
            ending_required_purposes: vec![ShotPurpose::Emotion, ShotPurpose::Transition],
            intensity_ratio_high: 0.45,
            intensity_ratio_medium: 0.35,
            intensity_ratio_low: 0.20,
            min_shot_duration: 2.0,
            max_shot_duration: 5.0,
            max_shots: 18,
        }
    }

    /// Explainers: 2-5 minutes, information allowed up front.
    pub fn youtube_explainer() -> Self {
        Self {
            intent: MarketingIntent::YoutubeExplainer,
            max_duration_seconds: 300.0,
            min_duration_seconds: 120.0,
            target_duration_seconds: 180.0,
            target_reduction_percent: 0.15,
            opening_duration_seconds: 8.0,
            opening_required_purposes: vec![
                ShotPurpose::Emotion,
                ShotPurpose::Atmosphere,
                ShotPurpose::Information,
            ],
            opening_required_intensity: BeatIntensity::Medium,
            ending_duration_seconds: 10.0,
            ending_required_intent: EndingIntent::Resolution,
            ending_required_purposes: vec![ShotPurpose::Emotion, ShotPurpose::Transition],
            intensity_ratio_high: 0.25,
            intensity_ratio_medium: 0.45,
            intensity_ratio_low: 0.30,
            min_shot_duration: 3.0,
            max_shot_duration: 8.0,
            max_shots: 45,
        }
    }

    /// Check internal consistency of the preset.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.min_duration_seconds > self.max_duration_seconds {
            errors.push("min_duration > max_duration".to_string());
        }
        if self.target_duration_seconds < self.min_duration_seconds {
            errors.push("target_duration < min_duration".to_string());
        }
        if self.target_duration_seconds > self.max_duration_seconds {
            errors.push("target_duration > max_duration".to_string());
        }

        let intensity_sum =
            self.intensity_ratio_high + self.intensity_ratio_medium + self.intensity_ratio_low;
        if (intensity_sum - 1.0).abs() > 0.01 {
            errors.push(format!("intensity ratios sum to {}, not 1.0", intensity_sum));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Editorial config enforcing this preset's trim and window rules.
    pub fn editorial_config(&self) -> EditorialConfig {
        EditorialConfig {
            target_reduction_percent: self.target_reduction_percent,
            min_shot_duration: self.min_shot_duration,
            max_shot_duration: self.max_shot_duration,
            opening_duration: self.opening_duration_seconds,
            opening_allowed_purposes: self.opening_required_purposes.clone(),
            ending_duration: self.ending_duration_seconds,
            ending_allowed_purposes: self.ending_required_purposes.clone(),
            ..Default::default()
        }
    }

    /// Rhythm config matching this preset's energy.
    pub fn rhythm_config(&self) -> RhythmConfig {
        let (entry, exit) = match self.intent {
            MarketingIntent::PaidAd => (0.20, 0.25),
            MarketingIntent::SocialReel => (0.15, 0.20),
            // More breathing room
            MarketingIntent::YoutubeExplainer => (0.10, 0.15),
        };

        // Stricter variation for high-energy intents
        let (min_duration_variation, max_same_intensity_run) =
            if self.intensity_ratio_high >= 0.5 {
                (0.50, 2)
            } else {
                (0.40, 3)
            };

        RhythmConfig {
            min_duration_variation,
            max_same_intensity_run,
            emotion_entry_trim: entry,
            emotion_exit_trim: exit,
            emotion_peak_preserve: 0.65,
            high_shot_min_duration: self.min_shot_duration,
            low_shot_max_duration: self.max_shot_duration,
            force_interstitial_after_high: self.intent == MarketingIntent::PaidAd,
        }
    }
}

/// Brand pacing preference applied on top of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrandBias {
    /// 0.0 = gentle and contemplative, 1.0 = aggressive and intense.
    pub pacing_aggressiveness: f64,
}

/// Configs after brand bias and SLA clamping, with a trail of what changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BiasedConfigs {
    pub editorial: EditorialConfig,
    pub rhythm: RhythmConfig,
    pub biases_applied: Vec<String>,
}

impl BrandBias {
    pub fn new(pacing_aggressiveness: f64) -> Self {
        Self {
            pacing_aggressiveness: pacing_aggressiveness.clamp(0.0, 1.0),
        }
    }

    /// Bias the given configs, then clamp them back inside the preset's SLA.
    pub fn apply(
        &self,
        preset: &MarketingPreset,
        editorial: EditorialConfig,
        rhythm: RhythmConfig,
    ) -> BiasedConfigs {
        let aggressiveness = self.pacing_aggressiveness.clamp(0.0, 1.0);
        let mut biases_applied = Vec::new();
        let mut editorial = editorial;
        let mut rhythm = rhythm;

        // ±5% around the preset's trim target
        let new_trim = (preset.target_reduction_percent + (aggressiveness - 0.5) * 0.1)
            .clamp(0.10, 0.35);
        if (new_trim - editorial.target_reduction_percent).abs() > 0.01 {
            editorial.target_reduction_percent = new_trim;
            biases_applied.push(format!(
                "trimming: {:.0}% (aggressiveness: {:.0}%)",
                new_trim * 100.0,
                aggressiveness * 100.0
            ));
        }

        let new_entry = (0.15 + aggressiveness * 0.10).min(0.25);
        let new_exit = (0.20 + aggressiveness * 0.10).min(0.30);
        rhythm.emotion_entry_trim = new_entry;
        rhythm.emotion_exit_trim = new_exit;
        biases_applied.push(format!(
            "emotion_trim: {:.0}%/{:.0}%",
            new_entry * 100.0,
            new_exit * 100.0
        ));

        BiasedConfigs {
            editorial: enforce_editorial_sla(editorial, preset),
            rhythm: enforce_rhythm_sla(rhythm, preset),
            biases_applied,
        }
    }
}

fn enforce_editorial_sla(config: EditorialConfig, preset: &MarketingPreset) -> EditorialConfig {
    EditorialConfig {
        min_shot_duration: config.min_shot_duration.max(preset.min_shot_duration),
        max_shot_duration: config.max_shot_duration.min(preset.max_shot_duration),
        opening_duration: config.opening_duration.min(preset.opening_duration_seconds),
        ending_duration: config.ending_duration.min(preset.ending_duration_seconds),
        ..config
    }
}

fn enforce_rhythm_sla(config: RhythmConfig, preset: &MarketingPreset) -> RhythmConfig {
    RhythmConfig {
        emotion_entry_trim: config.emotion_entry_trim.min(0.30),
        emotion_exit_trim: config.emotion_exit_trim.min(0.35),
        emotion_peak_preserve: config.emotion_peak_preserve.max(0.50),
        high_shot_min_duration: config.high_shot_min_duration.max(preset.min_shot_duration),
        low_shot_max_duration: config.low_shot_max_duration.min(preset.max_shot_duration),
        ..config
    }
}
