//! Rhythmic authority: how fast, how varied.
//!
//! Runs after the editorial authority, on a shot list whose membership is
//! already fixed. It never adds or removes shots; it only retimes them and
//! reassigns intensities.
//!
//! # Stages
//!
//! 1. Assign intensities
//! 2. Close on a decided ending (intent, duration bias, intensity)
//! 3. Break runs of identical intensity
//! 4. Enforce adjacent duration contrast
//! 5. Tighten emotion shots: late entry, early exit, keep the peak
//! 6. Measure and critique

use cutroom_models::{BeatIntensity, EndingIntent, RhythmConfig, RhythmReport, Shot};
use tracing::{debug, info};

use crate::editorial::{percent, resequence};
use crate::error::EditResult;
use crate::input::{validate_config, validate_shots};
use crate::intensity::{assign_intensities, infer_ending_intent};

/// Bounds on the final shot after the ending bias.
const ENDING_MIN_SECONDS: f64 = 2.0;
const ENDING_MAX_SECONDS: f64 = 10.0;

/// Extra contrast margin for high/low shots beyond the configured minimum.
const INTENSITY_MARGIN: f64 = 0.1;
/// Medium shots after a shot longer than this are shortened, else lengthened.
const MEDIUM_PIVOT_SECONDS: f64 = 3.5;
/// Duration changes at or below this are not worth making.
const MIN_MEANINGFUL_CHANGE: f64 = 0.3;

/// Emotion shots at or below this length are left alone.
const EMOTION_TIGHTEN_MIN_SECONDS: f64 = 2.0;
const EMOTION_FLOOR_SECONDS: f64 = 1.5;
/// Tightening must bring a shot to at most this fraction of its length.
const EMOTION_MIN_GAIN_RATIO: f64 = 0.9;

/// Lists shorter than this are left untouched by run-breaking and variation.
const MIN_SHOTS_FOR_CORRECTION: usize = 3;

const DIP_METRIC_WINDOW: usize = 3;
const DIP_LOCATION_WINDOW: usize = 4;
const DIP_MIN_SHOTS: usize = 5;

/// Enforces rhythmic discipline on shot sequences.
#[derive(Debug, Clone, Default)]
pub struct RhythmicAuthority {
    config: RhythmConfig,
}

impl RhythmicAuthority {
    pub fn new(config: RhythmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RhythmConfig {
        &self.config
    }

    /// Retime `shots` and report every correction made.
    pub fn apply(&self, shots: &[Shot]) -> EditResult<(Vec<Shot>, RhythmReport)> {
        validate_shots(shots)?;
        validate_config(&self.config)?;

        let mut report = RhythmReport::default();

        let shots = assign_intensities(shots);

        let (shots, intent, bias) = enforce_ending(shots);
        report.ending_intent = intent;
        report.ending_duration_bias = bias;

        let (shots, runs_broken) = self.break_intensity_runs(shots);
        report.intensity_runs_broken = runs_broken;

        let (shots, variations) = self.enforce_duration_variation(shots);
        report.duration_variations_added = variations;

        let (shots, tightened) = self.tighten_emotion_shots(shots);
        report.emotion_shots_tightened = tightened;

        let shots = resequence(shots);

        calculate_metrics(&shots, &mut report);
        report.rhythm_notes = generate_rhythm_notes(&report);
        report.attention_dip_location = find_attention_dip(&shots);

        info!(
            low = report.low_count,
            medium = report.medium_count,
            high = report.high_count,
            intensity_changes = report.intensity_changes,
            monotony_score = format!("{:.2}", report.monotony_score),
            "Rhythmic authority applied"
        );

        Ok((shots, report))
    }

    /// Rewrite the overflow tail of any run longer than the configured maximum.
    ///
    /// Tail shots of a high run alternate medium, low, medium, ...; of a low
    /// run medium, high, medium, ...; of a medium run low on even list
    /// positions and high on odd ones. Scanning resumes at the start of a
    /// rewritten tail, so a tail that merges into the following run is
    /// caught too.
    fn break_intensity_runs(&self, shots: Vec<Shot>) -> (Vec<Shot>, usize) {
        if shots.len() < MIN_SHOTS_FOR_CORRECTION {
            return (shots, 0);
        }

        let max_run = self.config.max_same_intensity_run.max(1);
        let mut result = shots;
        let mut fixes = 0;
        let mut i = 0;

        while i < result.len() {
            let run_intensity = result[i].beat_intensity();
            let run_length = result[i..]
                .iter()
                .take_while(|s| s.beat_intensity() == run_intensity)
                .count();

            if run_length <= max_run {
                i += run_length;
                continue;
            }

            let tail_start = i + max_run;
            for j in tail_start..i + run_length {
                let replacement = run_replacement(run_intensity, j - tail_start, j);
                debug!(
                    shot_id = %result[j].id,
                    from = %run_intensity,
                    to = %replacement,
                    "Intensity run broken"
                );
                result[j] = result[j].clone().with_intensity(replacement);
                fixes += 1;
            }
            i = tail_start;
        }

        (result, fixes)
    }

    /// Push adjacent durations apart when they are too similar.
    fn enforce_duration_variation(&self, shots: Vec<Shot>) -> (Vec<Shot>, usize) {
        if shots.len() < MIN_SHOTS_FOR_CORRECTION {
            return (shots, 0);
        }

        let min_var = self.config.min_duration_variation;
        let mut result = shots;
        let mut fixes = 0;

        for i in 1..result.len() {
            let prev = result[i - 1].duration_seconds;
            let current = result[i].duration_seconds;
            let variation = relative_change(prev, current);

            if variation >= min_var {
                continue;
            }

            let target = match result[i].beat_intensity() {
                BeatIntensity::High => (prev * (1.0 - min_var - INTENSITY_MARGIN))
                    .max(self.config.high_shot_min_duration),
                BeatIntensity::Low => (prev * (1.0 + min_var + INTENSITY_MARGIN))
                    .min(self.config.low_shot_max_duration),
                BeatIntensity::Medium if prev > MEDIUM_PIVOT_SECONDS => prev * (1.0 - min_var),
                BeatIntensity::Medium => prev * (1.0 + min_var),
            };

            if (target - current).abs() > MIN_MEANINGFUL_CHANGE {
                debug!(
                    shot_id = %result[i].id,
                    original = current,
                    new = target,
                    variation,
                    "Duration variation added"
                );
                result[i] = result[i].clone().with_duration(target);
                fixes += 1;
            }
        }

        (result, fixes)
    }

    /// Late entry and early exit on emotion shots, keeping the middle.
    fn tighten_emotion_shots(&self, shots: Vec<Shot>) -> (Vec<Shot>, usize) {
        let mut tightened = 0;

        let result = shots
            .into_iter()
            .map(|shot| {
                let original = shot.duration_seconds;
                if !shot.is_emotion() || original <= EMOTION_TIGHTEN_MIN_SECONDS {
                    return shot;
                }

                let entry_trim = original * self.config.emotion_entry_trim;
                let exit_trim = original * self.config.emotion_exit_trim;
                let new = (original - entry_trim - exit_trim).max(EMOTION_FLOOR_SECONDS);

                if new > original * EMOTION_MIN_GAIN_RATIO {
                    return shot;
                }

                debug!(
                    shot_id = %shot.id,
                    original,
                    new,
                    entry_trim,
                    exit_trim,
                    "Emotion shot tightened"
                );
                tightened += 1;
                shot.with_duration(new)
            })
            .collect();

        (result, tightened)
    }
}

/// Settle the final shot's intent, then bias its duration and intensity.
///
/// A final shot that already carries an intent has had its ending decided,
/// upstream or by an earlier pass, and is left exactly as planned.
fn enforce_ending(mut shots: Vec<Shot>) -> (Vec<Shot>, Option<EndingIntent>, f64) {
    let Some(last) = shots.pop() else {
        return (shots, None, 1.0);
    };

    if let Some(intent) = last.ending_intent {
        debug!(shot_id = %last.id, intent = %intent, "Ending already decided");
        shots.push(last);
        return (shots, Some(intent), 1.0);
    }

    let mut context = shots.clone();
    context.push(last.clone());
    let intent = infer_ending_intent(&last, &context);

    let bias = intent.duration_bias();
    let duration =
        (last.duration_seconds * bias).clamp(ENDING_MIN_SECONDS, ENDING_MAX_SECONDS);
    let intensity = match intent {
        EndingIntent::Provocation => BeatIntensity::High,
        _ => BeatIntensity::Low,
    };

    debug!(
        shot_id = %last.id,
        intent = %intent,
        original = last.duration_seconds,
        new = duration,
        "Ending enforced"
    );

    shots.push(
        last.with_ending_intent(intent)
            .with_duration(duration)
            .with_intensity(intensity),
    );

    (shots, Some(intent), bias)
}

/// Intensity for the `offset`-th overflow shot of a run, at list position `position`.
fn run_replacement(run: BeatIntensity, offset: usize, position: usize) -> BeatIntensity {
    match run {
        BeatIntensity::High if offset % 2 == 0 => BeatIntensity::Medium,
        BeatIntensity::High => BeatIntensity::Low,
        BeatIntensity::Low if offset % 2 == 0 => BeatIntensity::Medium,
        BeatIntensity::Low => BeatIntensity::High,
        BeatIntensity::Medium if position % 2 == 0 => BeatIntensity::Low,
        BeatIntensity::Medium => BeatIntensity::High,
    }
}

fn calculate_metrics(shots: &[Shot], report: &mut RhythmReport) {
    if shots.is_empty() {
        return;
    }

    report.low_count = count_intensity(shots, BeatIntensity::Low);
    report.medium_count = count_intensity(shots, BeatIntensity::Medium);
    report.high_count = count_intensity(shots, BeatIntensity::High);

    let durations: Vec<f64> = shots.iter().map(|s| s.duration_seconds).collect();
    report.average_duration = mean(&durations);

    if durations.len() > 1 {
        report.duration_variance = variance(&durations);
        let variations: Vec<f64> = durations
            .windows(2)
            .filter(|pair| pair[0] > 0.0)
            .map(|pair| relative_change(pair[0], pair[1]))
            .collect();
        report.duration_variation_achieved = mean(&variations);
    }

    let mut changes = 0;
    let mut max_run = 1;
    let mut current_run = 1;
    for pair in shots.windows(2) {
        if pair[1].beat_intensity() != pair[0].beat_intensity() {
            changes += 1;
            current_run = 1;
        } else {
            current_run += 1;
            max_run = max_run.max(current_run);
        }
    }
    report.intensity_changes = changes;
    report.max_intensity_run = max_run;

    report.attention_dip_count = shots
        .windows(DIP_METRIC_WINDOW)
        .filter(|w| count_intensity(w, BeatIntensity::Low) >= DIP_METRIC_WINDOW - 1)
        .count();

    report.monotony_score = if shots.len() > 1 {
        1.0 - changes as f64 / (shots.len() - 1) as f64
    } else {
        0.0
    };
}

fn generate_rhythm_notes(report: &RhythmReport) -> Vec<String> {
    let mut notes = Vec::new();

    // Monotony
    if report.monotony_score > 0.7 {
        notes.push(format!(
            "Rhythm feels FLAT. Monotony score: {}. Add more intensity changes.",
            percent(report.monotony_score)
        ));
    } else if report.monotony_score > 0.5 {
        notes.push(format!(
            "Rhythm is somewhat uniform ({} monotony). Consider more dramatic contrasts.",
            percent(report.monotony_score)
        ));
    } else if report.monotony_score < 0.3 {
        notes.push(format!(
            "Rhythm is DYNAMIC. Good intensity variation ({} changes).",
            report.intensity_changes
        ));
    }

    // Duration variance
    if report.duration_variance < 1.0 {
        notes.push("Shot durations are too uniform. Vary more dramatically.".to_string());
    } else if report.duration_variance > 10.0 {
        notes.push("Strong duration variation. This creates visual rhythm.".to_string());
    }

    // Intensity balance
    let total = report.low_count + report.medium_count + report.high_count;
    if total > 0 {
        let high_share = report.high_count as f64 / total as f64;
        let low_share = report.low_count as f64 / total as f64;

        if high_share > 0.5 {
            notes.push(format!(
                "Too many HIGH intensity shots ({}). The audience needs breathing room.",
                percent(high_share)
            ));
        } else if high_share < 0.15 {
            notes.push(format!(
                "Not enough HIGH intensity ({}). Where are the peaks?",
                percent(high_share)
            ));
        }

        if low_share < 0.1 {
            notes.push("Almost no LOW intensity moments. Add stillness for contrast.".to_string());
        }
    }

    // Tempo
    if report.average_duration > 5.0 {
        notes.push(format!(
            "Tempo is SLOW (avg {:.1}s). Consider more aggressive cuts.",
            report.average_duration
        ));
    } else if report.average_duration < 2.5 {
        notes.push(format!(
            "Tempo is FAST (avg {:.1}s). Make sure it's intentional, not frantic.",
            report.average_duration
        ));
    }

    if let Some(intent) = report.ending_intent {
        notes.push(format!(
            "Ending intent: {} (duration bias: {:.1}x)",
            intent.as_str().to_uppercase(),
            report.ending_duration_bias
        ));
    }

    notes
}

/// Locate the 4-shot window most likely to lose the audience.
///
/// Low intensity and uniform durations both count against a window; the
/// first window with the strictly worst score wins.
fn find_attention_dip(shots: &[Shot]) -> String {
    if shots.len() < DIP_MIN_SHOTS {
        return "Sequence too short to analyze.".to_string();
    }

    let mut worst: Option<(usize, f64)> = None;

    for start in 0..shots.len() - DIP_LOCATION_WINDOW {
        let window = &shots[start..start + DIP_LOCATION_WINDOW];

        let intensity_score: f64 = window
            .iter()
            .map(|s| match s.beat_intensity() {
                BeatIntensity::High => 0.0,
                BeatIntensity::Medium => 0.5,
                BeatIntensity::Low => 1.0,
            })
            .sum();

        let durations: Vec<f64> = window.iter().map(|s| s.duration_seconds).collect();
        let uniformity_penalty = if mean_absolute_deviation(&durations) < 0.5 {
            2.0
        } else {
            0.0
        };

        let score = intensity_score + uniformity_penalty;
        if score > worst.map_or(0.0, |(_, best)| best) {
            worst = Some((start, score));
        }
    }

    match worst {
        Some((start, _)) => format!(
            "Attention likely dips around shots {}-{} (low intensity, uniform pacing).",
            start + 1,
            start + DIP_LOCATION_WINDOW
        ),
        None => "No obvious attention dip detected.".to_string(),
    }
}

fn count_intensity(shots: &[Shot], intensity: BeatIntensity) -> usize {
    shots.iter().filter(|s| s.beat_intensity() == intensity).count()
}

fn relative_change(prev: f64, current: f64) -> f64 {
    if prev > 0.0 {
        (current - prev).abs() / prev
    } else {
        1.0
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = mean(values);
    values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / values.len() as f64
}

fn mean_absolute_deviation(values: &[f64]) -> f64 {
    let center = mean(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    mean(&deviations)
}
