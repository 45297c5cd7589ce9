//! Editorial authority: what to cut, what to keep.
//!
//! The authority works through a fixed series of stages, each producing a
//! new shot list:
//!
//! 1. Assign purposes to unclassified shots
//! 2. Drop anything still without a purpose
//! 3. Opening window: information becomes atmosphere
//! 4. Ending window: information and atmosphere become emotion
//! 5. Trim toward the target duration (priority removal, then shortening)
//! 6. Resequence, measure, and critique
//!
//! The goal is not completeness but impact. Under-reaching the trim target
//! because of the structural guard is reported, not raised.

use cutroom_models::{
    total_duration, EditorialConfig, EditorialReport, ShortenedShot, Shot, ShotId, ShotPurpose,
};
use tracing::{debug, info};

use crate::error::EditResult;
use crate::input::{validate_config, validate_shots};
use crate::purpose::assign_purposes;

/// Shortening multiplier applied per pass.
const SHORTEN_FACTOR: f64 = 0.8;

/// Reductions at or below this many seconds are not worth making.
const MIN_MEANINGFUL_REDUCTION: f64 = 0.1;

/// Slack for floating-point comparisons against the trim target.
const DURATION_EPSILON: f64 = 1e-9;

/// Enforces editorial discipline on shot sequences.
#[derive(Debug, Clone, Default)]
pub struct EditorialAuthority {
    config: EditorialConfig,
}

impl EditorialAuthority {
    pub fn new(config: EditorialConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EditorialConfig {
        &self.config
    }

    /// Edit `shots` and report every decision made.
    ///
    /// Fails only when the shot list or config is unusable.
    pub fn apply(&self, shots: &[Shot]) -> EditResult<(Vec<Shot>, EditorialReport)> {
        validate_shots(shots)?;
        validate_config(&self.config)?;

        let mut report = EditorialReport {
            original_shot_count: shots.len(),
            original_duration: total_duration(shots),
            target_reduction_percent: self.config.target_reduction_percent,
            ..Default::default()
        };

        let shots = assign_purposes(shots);

        let (shots, removed) = remove_purposeless(shots);
        report.removed_no_purpose = removed;

        let (shots, opening_fixes) = self.enforce_opening(shots);
        report.opening_violations_fixed = opening_fixes;

        let (shots, ending_fixes) = self.enforce_ending(shots);
        report.ending_violations_fixed = ending_fixes;

        let shots = self.trim_for_impact(shots, report.original_duration, &mut report);
        let shots = resequence(shots);

        report.trimmed_shot_count = shots.len();
        report.trimmed_duration = total_duration(&shots);
        report.reduction_percent = if report.original_duration > 0.0 {
            1.0 - report.trimmed_duration / report.original_duration
        } else {
            0.0
        };

        if report.trimmed_duration > 0.0 {
            report.emotional_density =
                purpose_duration(&shots, ShotPurpose::Emotion) / report.trimmed_duration;
            report.information_density =
                purpose_duration(&shots, ShotPurpose::Information) / report.trimmed_duration;
        }

        report.director_notes = generate_notes(&shots, &report);
        report.biggest_flaw = identify_biggest_flaw(&shots, &report);

        info!(
            original_shots = report.original_shot_count,
            trimmed_shots = report.trimmed_shot_count,
            original_duration = format!("{:.1}s", report.original_duration),
            trimmed_duration = format!("{:.1}s", report.trimmed_duration),
            reduction = format!("{:.1}%", report.reduction_percent * 100.0),
            "Editorial authority applied"
        );

        Ok((shots, report))
    }

    /// Opening must hook: information in the window is recast as atmosphere.
    fn enforce_opening(&self, shots: Vec<Shot>) -> (Vec<Shot>, usize) {
        let opening_end = self.config.opening_duration;
        let mut cumulative = 0.0;
        let mut fixes = 0;
        let mut result = Vec::with_capacity(shots.len());

        for shot in shots {
            let start = cumulative;
            cumulative += shot.duration_seconds;

            if start < opening_end && shot.purpose == Some(ShotPurpose::Information) {
                debug!(
                    shot_id = %shot.id,
                    action = "converted_to_atmosphere",
                    "Opening violation fixed"
                );
                result.push(shot.with_purpose(ShotPurpose::Atmosphere));
                fixes += 1;
            } else {
                result.push(shot);
            }
        }

        (result, fixes)
    }

    /// Ending must land: information and atmosphere in the window become emotion.
    fn enforce_ending(&self, shots: Vec<Shot>) -> (Vec<Shot>, usize) {
        let ending_start = total_duration(&shots) - self.config.ending_duration;
        let mut cumulative = 0.0;
        let mut fixes = 0;
        let mut result = Vec::with_capacity(shots.len());

        for shot in shots {
            cumulative += shot.duration_seconds;
            let in_ending = cumulative > ending_start;

            match shot.purpose {
                Some(ShotPurpose::Information) | Some(ShotPurpose::Atmosphere) if in_ending => {
                    debug!(
                        shot_id = %shot.id,
                        from = ?shot.purpose,
                        action = "converted_to_emotion",
                        "Ending violation fixed"
                    );
                    result.push(shot.with_purpose(ShotPurpose::Emotion));
                    fixes += 1;
                }
                _ => result.push(shot),
            }
        }

        (result, fixes)
    }

    /// Cut toward `original * (1 - target_reduction_percent)` without overshooting.
    fn trim_for_impact(
        &self,
        shots: Vec<Shot>,
        original_duration: f64,
        report: &mut EditorialReport,
    ) -> Vec<Shot> {
        let target = original_duration * (1.0 - self.config.target_reduction_percent);
        let mut current = total_duration(&shots);
        let mut result = shots;

        // Phase A: priority removal
        let max_iterations = 2 * result.len();
        let mut iterations = 0;
        while current - target > DURATION_EPSILON && iterations < max_iterations {
            iterations += 1;

            let Some(idx) = next_removal(&result, current - target) else {
                break;
            };

            let shot = result.remove(idx);
            current -= shot.duration_seconds;
            debug!(
                shot_id = %shot.id,
                purpose = ?shot.purpose,
                duration = shot.duration_seconds,
                "Shot removed for trim"
            );

            match shot.purpose {
                Some(ShotPurpose::Information) => report.removed_information.push(shot.id),
                Some(ShotPurpose::Atmosphere) => report.removed_atmosphere.push(shot.id),
                Some(ShotPurpose::Transition) => report.removed_transition.push(shot.id),
                Some(ShotPurpose::Emotion) | None => {}
            }
        }

        // Phase B: shorten the longest eligible shot
        while current - target > DURATION_EPSILON {
            let Some(idx) = self.longest_shortenable(&result) else {
                break;
            };

            let original = result[idx].duration_seconds;
            let new = (original * SHORTEN_FACTOR)
                .max(self.config.min_shot_duration)
                .max(original - (current - target));
            let reduction = original - new;

            if reduction <= MIN_MEANINGFUL_REDUCTION {
                break;
            }

            let shot = result[idx].clone().with_duration(new);
            debug!(
                shot_id = %shot.id,
                original,
                new,
                "Shot shortened for trim"
            );
            report.shortened_shots.push(ShortenedShot {
                shot_id: shot.id.clone(),
                original,
                new,
                reduction,
            });
            result[idx] = shot;
            current -= reduction;
        }

        result
    }

    /// Longest shot that may still be shortened. Earlier shots win ties.
    fn longest_shortenable(&self, shots: &[Shot]) -> Option<usize> {
        let mut longest: Option<(usize, f64)> = None;

        for (idx, shot) in shots.iter().enumerate() {
            let duration = shot.duration_seconds;
            if duration <= self.config.min_shot_duration {
                continue;
            }
            if shot.is_emotion() && duration <= self.config.max_shot_duration {
                continue;
            }
            if longest.map_or(true, |(_, best)| duration > best) {
                longest = Some((idx, duration));
            }
        }

        longest.map(|(idx, _)| idx)
    }
}

/// Drop shots that still lack a purpose, returning their ids.
fn remove_purposeless(shots: Vec<Shot>) -> (Vec<Shot>, Vec<ShotId>) {
    let (kept, removed): (Vec<Shot>, Vec<Shot>) =
        shots.into_iter().partition(|s| s.purpose.is_some());

    let removed = removed
        .into_iter()
        .map(|shot| {
            debug!(shot_id = %shot.id, "Removed purposeless shot");
            shot.id
        })
        .collect();

    (kept, removed)
}

/// Index of the next shot to remove, if any removal is allowed.
///
/// Candidates go by trim priority, longer first, then list order. A
/// candidate is only taken when it fits inside the remaining gap and the
/// list still passes the structural guard without it.
fn next_removal(shots: &[Shot], gap: f64) -> Option<usize> {
    let mut candidates: Vec<(usize, &Shot)> = shots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.purpose.is_some_and(|p| p.is_removable()))
        .collect();

    candidates.sort_by(|(_, a), (_, b)| {
        trim_priority(a)
            .cmp(&trim_priority(b))
            .then(b.duration_seconds.total_cmp(&a.duration_seconds))
    });

    candidates
        .into_iter()
        .find(|(idx, shot)| {
            if shot.duration_seconds > gap + DURATION_EPSILON {
                return false;
            }
            let remaining: Vec<Shot> = shots
                .iter()
                .enumerate()
                .filter(|(i, _)| i != idx)
                .map(|(_, s)| s.clone())
                .collect();
            passes_structural_guard(&remaining)
        })
        .map(|(idx, _)| idx)
}

/// A cut must keep at least two shots and at least one emotion shot.
pub fn passes_structural_guard(shots: &[Shot]) -> bool {
    shots.len() >= 2 && shots.iter().any(Shot::is_emotion)
}

/// Renumber `sequence` 0..N-1 in list order.
pub fn resequence(shots: Vec<Shot>) -> Vec<Shot> {
    shots
        .into_iter()
        .enumerate()
        .map(|(i, shot)| shot.with_sequence(i as u32))
        .collect()
}

fn generate_notes(shots: &[Shot], report: &EditorialReport) -> Vec<String> {
    let mut notes = Vec::new();
    let avg_duration = average_duration(shots, report);

    // Pacing
    if avg_duration > 5.0 {
        notes.push(format!(
            "Pacing feels slow. Average shot is {:.1}s - consider tightening to under 4s.",
            avg_duration
        ));
    } else if avg_duration < 2.0 {
        notes.push(format!(
            "Pacing is aggressive at {:.1}s average. Some breathing room might help.",
            avg_duration
        ));
    }

    // Information density
    if report.information_density > 0.4 {
        notes.push(format!(
            "Too much information ({} of duration). The audience will tune out. Show, don't tell.",
            percent(report.information_density)
        ));
    } else if report.information_density < 0.1 && report.original_shot_count > 10 {
        notes.push(
            "Very low information content. Make sure the story is still being told.".to_string(),
        );
    }

    // Emotional density
    if report.emotional_density < 0.3 {
        notes.push(format!(
            "Emotional content is only {}. Where's the heart? Add reaction shots.",
            percent(report.emotional_density)
        ));
    } else if report.emotional_density > 0.7 {
        notes.push(
            "Strong emotional density. This could land hard if the visuals deliver.".to_string(),
        );
    }

    if report.trimmed_shot_count > 20 && avg_duration < 3.0 {
        notes.push("Many quick cuts. Make sure there's rhythm, not just speed.".to_string());
    }

    // Trim effectiveness
    if report.reduction_percent < 0.10 {
        notes.push(format!(
            "Only {} trimmed. Be more ruthless - if it doesn't serve, cut it.",
            percent(report.reduction_percent)
        ));
    } else if report.reduction_percent > 0.25 {
        notes.push(format!(
            "Aggressive trim at {}. Make sure narrative clarity survived.",
            percent(report.reduction_percent)
        ));
    }

    // Structure
    if let (Some(first), Some(last)) = (shots.first(), shots.last()) {
        if first.purpose == Some(ShotPurpose::Information) {
            notes.push("Opening with information is a mistake. Hook emotionally first.".to_string());
        }
        if last.purpose == Some(ShotPurpose::Information) {
            notes.push(
                "Ending on information is weak. Close with emotion or provocative transition."
                    .to_string(),
            );
        }
    }

    notes
}

struct Flaw {
    name: &'static str,
    severity: u8,
    message: String,
}

fn identify_biggest_flaw(shots: &[Shot], report: &EditorialReport) -> String {
    let mut flaws = Vec::new();

    if let Some(first) = shots.first() {
        if !first.is_emotion() {
            flaws.push(Flaw {
                name: "opening_not_emotional",
                severity: 3,
                message: "The opening doesn't grab. Lead with emotion.".to_string(),
            });
        }
    }

    if let Some(last) = shots.last() {
        if !matches!(
            last.purpose,
            Some(ShotPurpose::Emotion) | Some(ShotPurpose::Transition)
        ) {
            flaws.push(Flaw {
                name: "ending_weak",
                severity: 3,
                message: "The ending doesn't land. It needs to resolve or provoke.".to_string(),
            });
        }
    }

    let avg_duration = average_duration(shots, report);
    if avg_duration > 6.0 {
        flaws.push(Flaw {
            name: "too_slow",
            severity: 4,
            message: format!("Pacing is glacial at {:.1}s average. Cut deeper.", avg_duration),
        });
    } else if avg_duration > 4.5 {
        flaws.push(Flaw {
            name: "slow",
            severity: 2,
            message: format!(
                "Pacing drags at {:.1}s average. Tighten individual shots.",
                avg_duration
            ),
        });
    }

    if report.information_density > 0.5 {
        flaws.push(Flaw {
            name: "too_informational",
            severity: 4,
            message: format!(
                "This is a lecture, not a story. {} is information.",
                percent(report.information_density)
            ),
        });
    }

    if report.emotional_density < 0.2 {
        flaws.push(Flaw {
            name: "no_heart",
            severity: 5,
            message: "There's no emotional center. Add human moments.".to_string(),
        });
    }

    if report.reduction_percent < 0.08 {
        flaws.push(Flaw {
            name: "not_trimmed",
            severity: 3,
            message: "The edit is flabby. Nothing was really cut.".to_string(),
        });
    }

    // Highest severity wins; on ties the earlier check wins
    let mut worst: Option<Flaw> = None;
    for flaw in flaws {
        if worst.as_ref().map_or(true, |w| flaw.severity > w.severity) {
            worst = Some(flaw);
        }
    }

    match worst {
        Some(flaw) => {
            debug!(flaw = flaw.name, severity = flaw.severity, "Biggest flaw identified");
            flaw.message
        }
        None => "The edit is solid. Minor polish only.".to_string(),
    }
}

fn average_duration(shots: &[Shot], report: &EditorialReport) -> f64 {
    if shots.is_empty() {
        0.0
    } else {
        report.trimmed_duration / shots.len() as f64
    }
}

fn purpose_duration(shots: &[Shot], purpose: ShotPurpose) -> f64 {
    shots
        .iter()
        .filter(|s| s.purpose == Some(purpose))
        .map(|s| s.duration_seconds)
        .sum()
}

fn trim_priority(shot: &Shot) -> u8 {
    shot.purpose.map_or(u8::MAX, |p| p.trim_priority())
}

/// Whole-percent rendering used throughout the notes.
pub(crate) fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
