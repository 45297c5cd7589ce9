//! Director's notes: the plain-text critique handed to the edit room.
//!
//! The document is built only from report fields and the final shot list,
//! so it can be regenerated at any time from a saved [`EditOutcome`].
//!
//! [`EditOutcome`]: crate::pipeline::EditOutcome

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use cutroom_models::{BeatIntensity, EditorialReport, RhythmReport, Shot};
use tracing::info;

use crate::editorial::percent;
use crate::error::{EditError, EditResult};

const RULE_WIDTH: usize = 60;

/// Render the director's notes document.
pub fn render_director_notes(
    shots: &[Shot],
    report: &EditorialReport,
    rhythm: Option<&RhythmReport>,
    generated_at: DateTime<Utc>,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = vec![
        rule.clone(),
        "DIRECTOR'S NOTES - Edit Room Critique".to_string(),
        rule.clone(),
        String::new(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        String::new(),
        "--- VITAL STATS ---".to_string(),
        format!(
            "Original: {} shots, {:.1}s",
            report.original_shot_count, report.original_duration
        ),
        format!(
            "After trim: {} shots, {:.1}s",
            report.trimmed_shot_count, report.trimmed_duration
        ),
        format!("Reduction: {:.1}%", report.reduction_percent * 100.0),
        String::new(),
        format!("Emotional density: {}", percent(report.emotional_density)),
        format!("Information density: {}", percent(report.information_density)),
        String::new(),
        "--- WHAT WAS CUT ---".to_string(),
    ];

    let removed = [
        ("INFORMATION", report.removed_information.len()),
        ("ATMOSPHERE", report.removed_atmosphere.len()),
        ("TRANSITION", report.removed_transition.len()),
    ];
    for (label, count) in removed {
        if count > 0 {
            lines.push(format!("{} shots removed: {}", label, count));
        }
    }
    if !report.shortened_shots.is_empty() {
        lines.push(format!(
            "Shots shortened: {} (saved {:.1}s)",
            report.shortened_shots.len(),
            report.seconds_saved_by_shortening()
        ));
    }

    lines.push(String::new());
    lines.push("--- NOTES ON THE CUT ---".to_string());
    lines.extend(report.director_notes.iter().map(|n| format!("• {}", n)));

    if let Some(rhythm) = rhythm {
        push_rhythm_sections(&mut lines, rhythm);
    }

    lines.extend([
        String::new(),
        "--- THE BIGGEST PROBLEM ---".to_string(),
        report.biggest_flaw.clone(),
        String::new(),
        "--- SHOT BREAKDOWN BY PURPOSE ---".to_string(),
    ]);

    let mut purpose_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for shot in shots {
        let key = shot.purpose.map_or("none", |p| p.as_str());
        *purpose_counts.entry(key).or_default() += 1;
    }
    for (purpose, count) in purpose_counts {
        lines.push(format!("{}: {} shots", purpose.to_uppercase(), count));
    }

    if let Some(rhythm) = rhythm {
        lines.push(String::new());
        lines.push("--- SHOT BREAKDOWN BY INTENSITY ---".to_string());
        for intensity in BeatIntensity::ALL {
            lines.push(format!(
                "{}: {} shots",
                intensity.as_str().to_uppercase(),
                rhythm.count_for(*intensity)
            ));
        }
    }

    lines.extend([
        String::new(),
        rule.clone(),
        "Remember: Rhythm is contrast. Shorter is almost always better.".to_string(),
        rule,
    ]);

    lines.join("\n")
}

fn push_rhythm_sections(lines: &mut Vec<String>, rhythm: &RhythmReport) {
    lines.extend([
        String::new(),
        "--- RHYTHM ANALYSIS ---".to_string(),
        format!(
            "Intensity distribution: LOW={}, MEDIUM={}, HIGH={}",
            rhythm.low_count, rhythm.medium_count, rhythm.high_count
        ),
        format!("Intensity changes: {}", rhythm.intensity_changes),
        format!(
            "Monotony score: {} (0%=dynamic, 100%=flat)",
            percent(rhythm.monotony_score)
        ),
        format!("Duration variance: {:.1}", rhythm.duration_variance),
        String::new(),
    ]);
    lines.extend(rhythm.rhythm_notes.iter().map(|n| format!("• {}", n)));

    if let Some(intent) = rhythm.ending_intent {
        lines.push(String::new());
        lines.push(format!("Ending intent: {}", intent.as_str().to_uppercase()));
    }

    lines.extend([
        String::new(),
        "--- WHERE DID ATTENTION DIP? ---".to_string(),
        rhythm.attention_dip_location.clone(),
    ]);

    if rhythm.has_corrections() {
        lines.push(String::new());
        lines.push("--- RHYTHM CORRECTIONS MADE ---".to_string());
        if rhythm.intensity_runs_broken > 0 {
            lines.push(format!("Intensity runs broken: {}", rhythm.intensity_runs_broken));
        }
        if rhythm.duration_variations_added > 0 {
            lines.push(format!(
                "Duration variations added: {}",
                rhythm.duration_variations_added
            ));
        }
        if rhythm.emotion_shots_tightened > 0 {
            lines.push(format!(
                "EMOTION shots tightened: {}",
                rhythm.emotion_shots_tightened
            ));
        }
    }
}

/// Render the notes and write them to `path`, creating parent directories.
pub fn write_director_notes(
    path: impl AsRef<Path>,
    shots: &[Shot],
    report: &EditorialReport,
    rhythm: Option<&RhythmReport>,
) -> EditResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EditError::write_failed(parent, e))?;
    }

    let document = render_director_notes(shots, report, rhythm, Utc::now());
    std::fs::write(path, document).map_err(|e| EditError::write_failed(path, e))?;

    info!(path = %path.display(), "Director notes generated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cutroom_models::{EndingIntent, ShortenedShot, ShotId, ShotPurpose};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    fn sample() -> (Vec<Shot>, EditorialReport, RhythmReport) {
        let shots = vec![
            Shot::new("a", 0, 3.0)
                .with_purpose(ShotPurpose::Emotion)
                .with_intensity(BeatIntensity::High),
            Shot::new("b", 1, 2.0)
                .with_purpose(ShotPurpose::Atmosphere)
                .with_intensity(BeatIntensity::Low),
        ];
        let report = EditorialReport {
            original_shot_count: 3,
            original_duration: 6.0,
            trimmed_shot_count: 2,
            trimmed_duration: 5.0,
            reduction_percent: 1.0 / 6.0,
            removed_information: vec![ShotId::from("x")],
            shortened_shots: vec![ShortenedShot {
                shot_id: ShotId::from("a"),
                original: 3.5,
                new: 3.0,
                reduction: 0.5,
            }],
            emotional_density: 0.6,
            information_density: 0.0,
            director_notes: vec!["Strong emotional density.".to_string()],
            biggest_flaw: "The edit is solid. Minor polish only.".to_string(),
            ..Default::default()
        };
        let rhythm = RhythmReport {
            low_count: 1,
            high_count: 1,
            intensity_changes: 1,
            ending_intent: Some(EndingIntent::Resolution),
            ending_duration_bias: 1.3,
            intensity_runs_broken: 2,
            attention_dip_location: "Sequence too short to analyze.".to_string(),
            rhythm_notes: vec!["Ending intent: RESOLUTION (duration bias: 1.3x)".to_string()],
            ..Default::default()
        };
        (shots, report, rhythm)
    }

    #[test]
    fn test_render_full_document() {
        let (shots, report, rhythm) = sample();
        let doc = render_director_notes(&shots, &report, Some(&rhythm), fixed_time());

        assert!(doc.starts_with(&"=".repeat(60)));
        assert!(doc.contains("Generated: 2024-03-09 14:05 UTC"));
        assert!(doc.contains("Original: 3 shots, 6.0s"));
        assert!(doc.contains("After trim: 2 shots, 5.0s"));
        assert!(doc.contains("Reduction: 16.7%"));
        assert!(doc.contains("Emotional density: 60%"));
        assert!(doc.contains("INFORMATION shots removed: 1"));
        assert!(!doc.contains("ATMOSPHERE shots removed"));
        assert!(doc.contains("Shots shortened: 1 (saved 0.5s)"));
        assert!(doc.contains("• Strong emotional density."));
        assert!(doc.contains("Intensity distribution: LOW=1, MEDIUM=0, HIGH=1"));
        assert!(doc.contains("Ending intent: RESOLUTION\n"));
        assert!(doc.contains("--- WHERE DID ATTENTION DIP? ---\nSequence too short to analyze."));
        assert!(doc.contains("Intensity runs broken: 2"));
        assert!(!doc.contains("EMOTION shots tightened"));
        assert!(doc.contains("--- THE BIGGEST PROBLEM ---\nThe edit is solid. Minor polish only."));
        assert!(doc.contains("ATMOSPHERE: 1 shots\nEMOTION: 1 shots"));
        assert!(doc.contains("LOW: 1 shots\nMEDIUM: 0 shots\nHIGH: 1 shots"));
        assert!(doc.ends_with(&"=".repeat(60)));
    }

    #[test]
    fn test_render_without_rhythm() {
        let (shots, report, _) = sample();
        let doc = render_director_notes(&shots, &report, None, fixed_time());

        assert!(!doc.contains("RHYTHM ANALYSIS"));
        assert!(!doc.contains("SHOT BREAKDOWN BY INTENSITY"));
        assert!(doc.contains("SHOT BREAKDOWN BY PURPOSE"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (shots, report, rhythm) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("director_notes.txt");

        write_director_notes(&path, &shots, &report, Some(&rhythm)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("DIRECTOR'S NOTES - Edit Room Critique"));
    }

    #[test]
    fn test_write_failure_names_path() {
        let (shots, report, _) = sample();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_director_notes(blocker.join("notes.txt"), &shots, &report, None)
            .unwrap_err();

        match err {
            EditError::Write { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
