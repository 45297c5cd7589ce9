#![deny(unreachable_patterns)]
//! Shot sequence editing engine.
//!
//! This crate provides:
//! - Purpose, intensity and ending-intent classifiers
//! - The editorial authority (what to cut, what to keep)
//! - The rhythmic authority (how fast, how varied)
//! - A version improvement check for refinement loops
//! - Director's notes rendering
//!
//! Everything except the notes writer is a pure function of its inputs.

pub mod editorial;
pub mod error;
pub mod input;
pub mod intensity;
pub mod notes;
pub mod pipeline;
pub mod purpose;
pub mod rhythm;
pub mod version;

pub use editorial::{passes_structural_guard, resequence, EditorialAuthority};
pub use error::{EditError, EditResult};
pub use input::{validate_config, validate_shots};
pub use intensity::{
    assign_intensities, assign_intensities_and_ending, infer_ending_intent, infer_intensity,
};
pub use notes::{render_director_notes, write_director_notes};
pub use pipeline::{EditOutcome, EditPipeline};
pub use purpose::{assign_purposes, infer_purpose};
pub use rhythm::RhythmicAuthority;
pub use version::validate_version_improvement;
