//! Shot model and its classification enums.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a classification string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Narrative role of a shot within a scene. Set upstream by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotRole {
    /// Sets location/context
    Establishing,
    /// Shows main activity
    Action,
    /// Character response
    Reaction,
    /// Close-up on significant object
    Detail,
    /// Bridges scenes
    Transition,
    /// Part of rapid sequence
    Montage,
    /// Peak dramatic moment
    Climax,
    /// Closing/calming shot
    Resolution,
}

impl ShotRole {
    pub const ALL: &'static [ShotRole] = &[
        ShotRole::Establishing,
        ShotRole::Action,
        ShotRole::Reaction,
        ShotRole::Detail,
        ShotRole::Transition,
        ShotRole::Montage,
        ShotRole::Climax,
        ShotRole::Resolution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotRole::Establishing => "establishing",
            ShotRole::Action => "action",
            ShotRole::Reaction => "reaction",
            ShotRole::Detail => "detail",
            ShotRole::Transition => "transition",
            ShotRole::Montage => "montage",
            ShotRole::Climax => "climax",
            ShotRole::Resolution => "resolution",
        }
    }
}

impl fmt::Display for ShotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShotRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ShotRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == lower)
            .ok_or_else(|| ParseEnumError::new("shot role", s))
    }
}

/// Camera framing of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    ExtremeWide,
    Wide,
    MediumWide,
    #[default]
    Medium,
    MediumClose,
    CloseUp,
    ExtremeClose,
    Cutaway,
    Pov,
}

impl ShotType {
    pub const ALL: &'static [ShotType] = &[
        ShotType::ExtremeWide,
        ShotType::Wide,
        ShotType::MediumWide,
        ShotType::Medium,
        ShotType::MediumClose,
        ShotType::CloseUp,
        ShotType::ExtremeClose,
        ShotType::Cutaway,
        ShotType::Pov,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::ExtremeWide => "extreme_wide",
            ShotType::Wide => "wide",
            ShotType::MediumWide => "medium_wide",
            ShotType::Medium => "medium",
            ShotType::MediumClose => "medium_close",
            ShotType::CloseUp => "close_up",
            ShotType::ExtremeClose => "extreme_close",
            ShotType::Cutaway => "cutaway",
            ShotType::Pov => "pov",
        }
    }

    /// Wide-class framings read as environment rather than subject.
    pub fn is_wide(&self) -> bool {
        matches!(self, ShotType::ExtremeWide | ShotType::Wide)
    }

    /// Close-class framings read as subject interiority.
    pub fn is_close(&self) -> bool {
        matches!(self, ShotType::CloseUp | ShotType::ExtremeClose)
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShotType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ShotType::ALL
            .iter()
            .copied()
            .find(|shot_type| shot_type.as_str() == lower)
            .ok_or_else(|| ParseEnumError::new("shot type", s))
    }
}

/// Editorial purpose of a shot.
///
/// Every shot leaving the editorial pass carries exactly one purpose.
/// The variant order is also the trim order: earlier variants are cut first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotPurpose {
    /// Delivers facts, context, or exposition
    Information,
    /// Establishes mood, tone, or environment
    Atmosphere,
    /// Bridges scenes or shifts narrative beats
    Transition,
    /// Creates or amplifies emotional response
    Emotion,
}

impl ShotPurpose {
    pub const ALL: &'static [ShotPurpose] = &[
        ShotPurpose::Information,
        ShotPurpose::Atmosphere,
        ShotPurpose::Transition,
        ShotPurpose::Emotion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotPurpose::Information => "information",
            ShotPurpose::Atmosphere => "atmosphere",
            ShotPurpose::Transition => "transition",
            ShotPurpose::Emotion => "emotion",
        }
    }

    /// Trimming priority (lower = cut first).
    pub fn trim_priority(&self) -> u8 {
        match self {
            ShotPurpose::Information => 1,
            ShotPurpose::Atmosphere => 2,
            ShotPurpose::Transition => 3,
            ShotPurpose::Emotion => 4,
        }
    }

    /// Emotion shots are the point of the cut and are never removed.
    pub fn is_removable(&self) -> bool {
        !matches!(self, ShotPurpose::Emotion)
    }
}

impl fmt::Display for ShotPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShotPurpose {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "information" => Ok(ShotPurpose::Information),
            "atmosphere" => Ok(ShotPurpose::Atmosphere),
            "transition" => Ok(ShotPurpose::Transition),
            "emotion" => Ok(ShotPurpose::Emotion),
            _ => Err(ParseEnumError::new("shot purpose", s)),
        }
    }
}

/// Rhythmic intensity of a shot. `Medium` is the neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum BeatIntensity {
    /// Breathing room, contemplation, stillness
    Low,
    /// Normal narrative flow
    #[default]
    Medium,
    /// Peak moments, urgency
    High,
}

impl BeatIntensity {
    pub const ALL: &'static [BeatIntensity] =
        &[BeatIntensity::Low, BeatIntensity::Medium, BeatIntensity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeatIntensity::Low => "low",
            BeatIntensity::Medium => "medium",
            BeatIntensity::High => "high",
        }
    }
}

impl fmt::Display for BeatIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BeatIntensity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(BeatIntensity::Low),
            "medium" => Ok(BeatIntensity::Medium),
            "high" => Ok(BeatIntensity::High),
            _ => Err(ParseEnumError::new("beat intensity", s)),
        }
    }
}

/// Closing strategy of the final shot. No neutral endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EndingIntent {
    /// Emotional closure, catharsis, peace
    Resolution,
    /// Lingering question, tension
    Provocation,
    /// Continuation implied
    Transition,
}

impl EndingIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndingIntent::Resolution => "resolution",
            EndingIntent::Provocation => "provocation",
            EndingIntent::Transition => "transition",
        }
    }

    /// Multiplier applied to the final shot's duration.
    pub fn duration_bias(&self) -> f64 {
        match self {
            EndingIntent::Resolution => 1.3,
            EndingIntent::Provocation => 0.7,
            EndingIntent::Transition => 1.0,
        }
    }
}

impl fmt::Display for EndingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EndingIntent {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resolution" => Ok(EndingIntent::Resolution),
            "provocation" => Ok(EndingIntent::Provocation),
            "transition" => Ok(EndingIntent::Transition),
            _ => Err(ParseEnumError::new("ending intent", s)),
        }
    }
}

/// Unique identifier for a shot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ShotId(pub String);

impl ShotId {
    /// Generate a new random shot ID.
    pub fn new() -> Self {
        Self(format!("shot_{}", Uuid::new_v4().simple()))
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ShotId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single planned shot.
///
/// Shots are treated as values: the editing stages never mutate a shot they
/// were handed, they build a changed copy through the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Shot {
    /// Unique shot ID
    #[serde(default)]
    pub id: ShotId,

    /// Position in the sequence (0-based)
    #[serde(default)]
    pub sequence: u32,

    /// Duration in seconds
    pub duration_seconds: f64,

    /// Narrative role assigned by the planner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ShotRole>,

    /// Camera framing
    #[serde(default)]
    pub shot_type: ShotType,

    /// Editorial purpose (None until assigned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<ShotPurpose>,

    /// Rhythmic intensity (None until assigned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<BeatIntensity>,

    /// Ending intent (final shot only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_intent: Option<EndingIntent>,

    /// What/who is the focus
    #[serde(default)]
    pub subject: String,

    /// Free-text visual description, scanned by the keyword heuristics
    #[serde(default)]
    pub visual_description: String,
}

impl Shot {
    /// Create a new shot with neutral classification.
    pub fn new(id: impl Into<ShotId>, sequence: u32, duration_seconds: f64) -> Self {
        Self {
            id: id.into(),
            sequence,
            duration_seconds,
            role: None,
            shot_type: ShotType::default(),
            purpose: None,
            intensity: None,
            ending_intent: None,
            subject: String::new(),
            visual_description: String::new(),
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    pub fn with_role(mut self, role: ShotRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_shot_type(mut self, shot_type: ShotType) -> Self {
        self.shot_type = shot_type;
        self
    }

    pub fn with_purpose(mut self, purpose: ShotPurpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub fn with_intensity(mut self, intensity: BeatIntensity) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_ending_intent(mut self, intent: EndingIntent) -> Self {
        self.ending_intent = Some(intent);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.visual_description = description.into();
        self
    }

    /// Assigned intensity, or the neutral default when unassigned.
    pub fn beat_intensity(&self) -> BeatIntensity {
        self.intensity.unwrap_or_default()
    }

    /// Whether the shot has been classified as emotional.
    pub fn is_emotion(&self) -> bool {
        self.purpose == Some(ShotPurpose::Emotion)
    }
}

/// Sum of shot durations in seconds.
pub fn total_duration(shots: &[Shot]) -> f64 {
    shots.iter().map(|s| s.duration_seconds).sum()
}

/// Ordered shot list as exchanged with the planner and renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ShotList {
    pub shots: Vec<Shot>,
}

impl ShotList {
    pub fn new(shots: Vec<Shot>) -> Self {
        Self { shots }
    }

    pub fn total_duration(&self) -> f64 {
        total_duration(&self.shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_trim_order() {
        let mut purposes = ShotPurpose::ALL.to_vec();
        purposes.sort_by_key(|p| p.trim_priority());
        assert_eq!(purposes, ShotPurpose::ALL.to_vec());
        assert!(!ShotPurpose::Emotion.is_removable());
        assert!(ShotPurpose::Information.is_removable());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("close_up".parse::<ShotType>().unwrap(), ShotType::CloseUp);
        assert_eq!("EMOTION".parse::<ShotPurpose>().unwrap(), ShotPurpose::Emotion);
        assert_eq!("high".parse::<BeatIntensity>().unwrap(), BeatIntensity::High);
        assert_eq!("climax".parse::<ShotRole>().unwrap(), ShotRole::Climax);
        assert!("sideways".parse::<EndingIntent>().is_err());
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let original = Shot::new("s1", 0, 3.0);
        let edited = original.clone().with_purpose(ShotPurpose::Emotion).with_duration(2.0);

        assert_eq!(original.purpose, None);
        assert!((original.duration_seconds - 3.0).abs() < f64::EPSILON);
        assert!(edited.is_emotion());
        assert_eq!(edited.id, original.id);
    }

    #[test]
    fn test_shot_deserializes_with_defaults() {
        let json = r#"{"id": "a", "duration_seconds": 2.5, "role": "reaction"}"#;
        let shot: Shot = serde_json::from_str(json).unwrap();

        assert_eq!(shot.role, Some(ShotRole::Reaction));
        assert_eq!(shot.intensity, None);
        assert_eq!(shot.beat_intensity(), BeatIntensity::Medium);
        assert_eq!(shot.shot_type, ShotType::Medium);
        assert!(shot.purpose.is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ShotId::new();
        let b = ShotId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("shot_"));
    }

    #[test]
    fn test_total_duration() {
        let shots = vec![Shot::new("a", 0, 1.5), Shot::new("b", 1, 2.5)];
        assert!((total_duration(&shots) - 4.0).abs() < 1e-9);
    }
}
