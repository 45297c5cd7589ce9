//! Decision reports produced by the editing authorities.
//!
//! Reports are built once at the end of an `apply` call and handed to the
//! caller; nothing downstream is expected to change them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shot::{BeatIntensity, EndingIntent, ShotId};

/// A shot whose duration was reduced during the trimming pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShortenedShot {
    pub shot_id: ShotId,
    /// Duration before shortening (seconds)
    pub original: f64,
    /// Duration after shortening (seconds)
    pub new: f64,
    /// Seconds removed
    pub reduction: f64,
}

/// Report of editorial decisions made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EditorialReport {
    // Original state
    pub original_shot_count: usize,
    pub original_duration: f64,

    // After trimming
    pub trimmed_shot_count: usize,
    pub trimmed_duration: f64,
    /// Achieved reduction (0.0-1.0)
    pub reduction_percent: f64,
    /// Requested reduction, for achieved-vs-target comparison
    pub target_reduction_percent: f64,

    // Removed shots
    pub removed_no_purpose: Vec<ShotId>,
    pub removed_information: Vec<ShotId>,
    pub removed_atmosphere: Vec<ShotId>,
    pub removed_transition: Vec<ShotId>,
    pub shortened_shots: Vec<ShortenedShot>,

    // Violations fixed
    pub opening_violations_fixed: usize,
    pub ending_violations_fixed: usize,

    // Quality
    /// Emotion duration / total duration
    pub emotional_density: f64,
    /// Information duration / total duration
    pub information_density: f64,

    // Notes
    pub director_notes: Vec<String>,
    pub biggest_flaw: String,
}

impl EditorialReport {
    /// Total shots removed for any reason.
    pub fn removed_count(&self) -> usize {
        self.removed_no_purpose.len()
            + self.removed_information.len()
            + self.removed_atmosphere.len()
            + self.removed_transition.len()
    }

    /// Seconds saved by shortening (removals excluded).
    pub fn seconds_saved_by_shortening(&self) -> f64 {
        self.shortened_shots.iter().map(|s| s.reduction).sum()
    }
}

/// Report of rhythmic decisions made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RhythmReport {
    // Intensity distribution
    pub low_count: usize,
    pub medium_count: usize,
    pub high_count: usize,

    // Rhythm metrics
    pub average_duration: f64,
    pub duration_variance: f64,
    /// Average relative variation between adjacent shots
    pub duration_variation_achieved: f64,
    pub intensity_changes: usize,
    /// 0 = varied, 1 = flat
    pub monotony_score: f64,
    /// Longest run of identical intensity
    pub max_intensity_run: usize,
    pub attention_dip_count: usize,

    // Corrections made
    pub intensity_runs_broken: usize,
    pub duration_variations_added: usize,
    pub emotion_shots_tightened: usize,

    // Ending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_intent: Option<EndingIntent>,
    pub ending_duration_bias: f64,

    // Notes
    pub rhythm_notes: Vec<String>,
    pub attention_dip_location: String,
}

impl Default for RhythmReport {
    fn default() -> Self {
        Self {
            low_count: 0,
            medium_count: 0,
            high_count: 0,
            average_duration: 0.0,
            duration_variance: 0.0,
            duration_variation_achieved: 0.0,
            intensity_changes: 0,
            monotony_score: 0.0,
            max_intensity_run: 0,
            attention_dip_count: 0,
            intensity_runs_broken: 0,
            duration_variations_added: 0,
            emotion_shots_tightened: 0,
            ending_intent: None,
            ending_duration_bias: 1.0,
            rhythm_notes: Vec::new(),
            attention_dip_location: String::new(),
        }
    }
}

impl RhythmReport {
    /// Count of shots at the given intensity.
    pub fn count_for(&self, intensity: BeatIntensity) -> usize {
        match intensity {
            BeatIntensity::Low => self.low_count,
            BeatIntensity::Medium => self.medium_count,
            BeatIntensity::High => self.high_count,
        }
    }

    /// Whether any corrective stage changed the sequence.
    pub fn has_corrections(&self) -> bool {
        self.intensity_runs_broken > 0
            || self.duration_variations_added > 0
            || self.emotion_shots_tightened > 0
    }
}

/// Comparison between two versions for improvement validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VersionComparison {
    pub v1_shots: usize,
    pub v1_duration: f64,
    pub v1_emotion_score: f64,

    pub v2_shots: usize,
    pub v2_duration: f64,
    pub v2_emotion_score: f64,

    pub improvement_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}
