//! Shared data models for the Cutroom shot editing engine.
//!
//! This crate provides Serde-serializable types for:
//! - Shots and their editorial/rhythmic classifications
//! - Editorial and rhythm configuration
//! - Write-once decision reports
//! - Marketing presets and brand pacing bias (config sources)

pub mod config;
pub mod preset;
pub mod report;
pub mod shot;

// Re-export common types
pub use config::{EditorialConfig, RhythmConfig};
pub use preset::{BiasedConfigs, BrandBias, MarketingIntent, MarketingPreset};
pub use report::{EditorialReport, RhythmReport, ShortenedShot, VersionComparison};
pub use shot::{
    total_duration, BeatIntensity, EndingIntent, ParseEnumError, Shot, ShotId, ShotList,
    ShotPurpose, ShotRole, ShotType,
};
