//! Refinement check: is the newer cut actually better?

use cutroom_models::{total_duration, Shot, VersionComparison};
use tracing::debug;

/// How far the emotion score may slip before a version counts as worse.
const EMOTION_SCORE_TOLERANCE: f64 = 0.1;

/// Decide whether `v2` is a valid improvement over `v1`.
///
/// `v2` must be tighter (fewer shots or shorter) and must not lose more
/// than a small margin of emotional impact.
pub fn validate_version_improvement(
    v1_shots: &[Shot],
    v2_shots: &[Shot],
    v1_emotion_score: f64,
    v2_emotion_score: f64,
) -> VersionComparison {
    let v1_duration = total_duration(v1_shots);
    let v2_duration = total_duration(v2_shots);

    let tighter = v2_shots.len() < v1_shots.len() || v2_duration < v1_duration;
    let emotion_kept = v2_emotion_score >= v1_emotion_score - EMOTION_SCORE_TOLERANCE;

    let failure_reason = if !tighter {
        Some(format!(
            "v2 is not tighter: {} shots/{:.1}s vs v1's {} shots/{:.1}s",
            v2_shots.len(),
            v2_duration,
            v1_shots.len(),
            v1_duration
        ))
    } else if !emotion_kept {
        Some(format!(
            "v2 lost emotional impact: {:.1} vs v1's {:.1}",
            v2_emotion_score, v1_emotion_score
        ))
    } else {
        None
    };

    debug!(
        tighter,
        emotion_kept,
        v1_duration,
        v2_duration,
        "Version improvement checked"
    );

    VersionComparison {
        v1_shots: v1_shots.len(),
        v1_duration,
        v1_emotion_score,
        v2_shots: v2_shots.len(),
        v2_duration,
        v2_emotion_score,
        improvement_valid: tighter && emotion_kept,
        failure_reason,
    }
}
