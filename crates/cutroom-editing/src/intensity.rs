//! Beat intensity and ending intent classification.

use cutroom_models::{BeatIntensity, EndingIntent, Shot, ShotPurpose, ShotRole};

const HIGH_INTENSITY_KEYWORDS: &[&str] = &[
    "battle", "fight", "explosion", "chase", "scream", "attack", "clash", "charge", "urgent",
    "desperate", "climax", "peak",
];

const LOW_INTENSITY_KEYWORDS: &[&str] = &[
    "peaceful", "quiet", "still", "contemplat", "reflection", "sunset", "sunrise", "landscape",
    "silence", "slow",
];

const RESOLUTION_KEYWORDS: &[&str] = &[
    "peace", "rest", "home", "embrace", "smile", "safe", "complete", "finish", "end", "close",
    "settle",
];

const PROVOCATION_KEYWORDS: &[&str] = &[
    "question", "uncertain", "dark", "threat", "shadow", "unknown", "mystery", "ominous",
    "cliff", "edge",
];

/// Shots shorter than this read as urgent.
const SHORT_SHOT_SECONDS: f64 = 2.5;
/// Shots longer than this read as breathing room.
const LONG_SHOT_SECONDS: f64 = 5.0;

/// How many trailing shots are inspected for an emotional ending.
const LATE_WINDOW: usize = 5;
const LATE_EMOTION_THRESHOLD: usize = 3;

pub fn intensity_for_role(role: ShotRole) -> BeatIntensity {
    match role {
        ShotRole::Establishing => BeatIntensity::Low,
        ShotRole::Action => BeatIntensity::High,
        ShotRole::Reaction => BeatIntensity::Medium,
        ShotRole::Detail => BeatIntensity::Low,
        ShotRole::Transition => BeatIntensity::Low,
        ShotRole::Montage => BeatIntensity::High,
        ShotRole::Climax => BeatIntensity::High,
        ShotRole::Resolution => BeatIntensity::Low,
    }
}

pub fn intensity_for_purpose(purpose: ShotPurpose) -> BeatIntensity {
    match purpose {
        ShotPurpose::Information => BeatIntensity::Low,
        ShotPurpose::Emotion => BeatIntensity::High,
        ShotPurpose::Atmosphere => BeatIntensity::Low,
        ShotPurpose::Transition => BeatIntensity::Medium,
    }
}

/// Infer a shot's beat intensity.
///
/// Any intensity already assigned is kept. After that: role, purpose,
/// description keywords, then duration.
pub fn infer_intensity(shot: &Shot) -> BeatIntensity {
    if let Some(intensity) = shot.intensity {
        return intensity;
    }

    if let Some(role) = shot.role {
        return intensity_for_role(role);
    }

    if let Some(purpose) = shot.purpose {
        return intensity_for_purpose(purpose);
    }

    let description = shot.visual_description.to_lowercase();
    if contains_any(&description, HIGH_INTENSITY_KEYWORDS) {
        return BeatIntensity::High;
    }
    if contains_any(&description, LOW_INTENSITY_KEYWORDS) {
        return BeatIntensity::Low;
    }

    if shot.duration_seconds < SHORT_SHOT_SECONDS {
        BeatIntensity::High
    } else if shot.duration_seconds > LONG_SHOT_SECONDS {
        BeatIntensity::Low
    } else {
        BeatIntensity::Medium
    }
}

/// Infer how the final shot should close the sequence.
pub fn infer_ending_intent(final_shot: &Shot, all_shots: &[Shot]) -> EndingIntent {
    let description = final_shot.visual_description.to_lowercase();

    if contains_any(&description, RESOLUTION_KEYWORDS) {
        return EndingIntent::Resolution;
    }
    if contains_any(&description, PROVOCATION_KEYWORDS) {
        return EndingIntent::Provocation;
    }

    // A run of late emotion reads as an arc coming to rest
    if all_shots.len() > LATE_WINDOW {
        let late_emotions = all_shots[all_shots.len() - LATE_WINDOW..]
            .iter()
            .filter(|s| s.is_emotion())
            .count();
        if late_emotions >= LATE_EMOTION_THRESHOLD {
            return EndingIntent::Resolution;
        }
    }

    match final_shot.purpose {
        Some(ShotPurpose::Emotion) => EndingIntent::Resolution,
        Some(ShotPurpose::Transition) => EndingIntent::Transition,
        _ => EndingIntent::Provocation,
    }
}

/// Copy of `shots` with every intensity inferred.
pub fn assign_intensities(shots: &[Shot]) -> Vec<Shot> {
    shots
        .iter()
        .map(|shot| shot.clone().with_intensity(infer_intensity(shot)))
        .collect()
}

/// Assign intensities and give the final shot an ending intent.
///
/// An ending intent already present on the final shot is kept. Unlike the
/// rhythmic authority this touches no durations.
pub fn assign_intensities_and_ending(shots: &[Shot]) -> Vec<Shot> {
    let mut result = assign_intensities(shots);

    if let Some(last) = result.pop() {
        let intent = last
            .ending_intent
            .unwrap_or_else(|| infer_ending_intent(&last, shots));
        result.push(last.with_ending_intent(intent));
    }

    result
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(duration: f64) -> Shot {
        Shot::new("s", 0, duration)
    }

    #[test]
    fn test_explicit_intensity_kept() {
        let s = shot(3.0)
            .with_intensity(BeatIntensity::Low)
            .with_role(ShotRole::Climax);
        assert_eq!(infer_intensity(&s), BeatIntensity::Low);

        // An assigned medium is a decision too, not a gap to fill
        let s = shot(3.0)
            .with_intensity(BeatIntensity::Medium)
            .with_role(ShotRole::Action);
        assert_eq!(infer_intensity(&s), BeatIntensity::Medium);
    }

    #[test]
    fn test_role_then_purpose() {
        let s = shot(3.0)
            .with_role(ShotRole::Reaction)
            .with_purpose(ShotPurpose::Emotion);
        assert_eq!(infer_intensity(&s), BeatIntensity::Medium);

        let s = shot(3.0).with_purpose(ShotPurpose::Emotion);
        assert_eq!(infer_intensity(&s), BeatIntensity::High);

        let s = shot(3.0).with_purpose(ShotPurpose::Transition);
        assert_eq!(infer_intensity(&s), BeatIntensity::Medium);
    }

    #[test]
    fn test_keywords_before_duration() {
        let s = shot(7.0).with_description("A desperate CHASE through the market");
        assert_eq!(infer_intensity(&s), BeatIntensity::High);

        let s = shot(1.0).with_description("Quiet dawn over the harbour");
        assert_eq!(infer_intensity(&s), BeatIntensity::Low);
    }

    #[test]
    fn test_duration_fallback() {
        assert_eq!(infer_intensity(&shot(2.0)), BeatIntensity::High);
        assert_eq!(infer_intensity(&shot(6.0)), BeatIntensity::Low);
        assert_eq!(infer_intensity(&shot(2.5)), BeatIntensity::Medium);
        assert_eq!(infer_intensity(&shot(5.0)), BeatIntensity::Medium);
    }

    #[test]
    fn test_ending_keywords() {
        let last = shot(3.0).with_description("They finally reach home");
        assert_eq!(infer_ending_intent(&last, &[]), EndingIntent::Resolution);

        let last = shot(3.0).with_description("A figure waits in the shadows");
        assert_eq!(infer_ending_intent(&last, &[]), EndingIntent::Provocation);
    }

    #[test]
    fn test_late_emotion_density_resolves() {
        let mut shots: Vec<Shot> = (0..3)
            .map(|_| shot(3.0).with_purpose(ShotPurpose::Information))
            .collect();
        shots.extend((0..3).map(|_| shot(3.0).with_purpose(ShotPurpose::Emotion)));
        let last = shot(3.0).with_purpose(ShotPurpose::Information);

        assert_eq!(infer_ending_intent(&last, &shots), EndingIntent::Resolution);
        // Five shots or fewer skip the density check
        assert_eq!(infer_ending_intent(&last, &shots[1..]), EndingIntent::Provocation);
    }

    #[test]
    fn test_ending_purpose_fallback() {
        let last = shot(3.0).with_purpose(ShotPurpose::Transition);
        assert_eq!(infer_ending_intent(&last, &[]), EndingIntent::Transition);

        let last = shot(3.0).with_purpose(ShotPurpose::Emotion);
        assert_eq!(infer_ending_intent(&last, &[]), EndingIntent::Resolution);

        assert_eq!(infer_ending_intent(&shot(3.0), &[]), EndingIntent::Provocation);
    }

    #[test]
    fn test_assign_intensities_and_ending() {
        let shots = vec![
            shot(1.0),
            shot(3.0).with_purpose(ShotPurpose::Transition),
        ];
        let assigned = assign_intensities_and_ending(&shots);

        assert_eq!(assigned[0].intensity, Some(BeatIntensity::High));
        assert!(assigned[0].ending_intent.is_none());
        assert_eq!(assigned[1].ending_intent, Some(EndingIntent::Transition));
        assert!((assigned[1].duration_seconds - 3.0).abs() < f64::EPSILON);

        assert!(assign_intensities_and_ending(&[]).is_empty());
    }
}
