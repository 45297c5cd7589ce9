//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cutroom_editing::{validate_version_improvement, write_director_notes, EditPipeline};
use cutroom_models::{BrandBias, ShotList, VersionComparison};
use tracing::{info, warn};

use crate::args::{CompareArgs, EditArgs};
use crate::config::CliConfig;

/// Files written for one edited input.
#[derive(Debug, Clone, PartialEq)]
pub struct EditedFile {
    pub input: PathBuf,
    pub outcome_path: PathBuf,
    pub notes_path: Option<PathBuf>,
    pub shot_count: usize,
    pub reduction_percent: f64,
}

/// Read a `{"shots": [...]}` JSON file.
pub fn read_shot_list(path: &Path) -> Result<ShotList> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid shot list in {}", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shots".to_string())
}

/// Edit every input with one pipeline. Stops at the first failing file.
pub fn run_edit(args: &EditArgs, config: &CliConfig) -> Result<Vec<EditedFile>> {
    let intent = args.intent.unwrap_or(config.intent);
    let pacing = args.pacing.or(config.pacing);
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.out_dir.clone());
    let write_notes = args.notes || config.write_notes;

    let pipeline = EditPipeline::for_intent(intent, pacing.map(BrandBias::new));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    info!(
        intent = %intent,
        pacing = ?pacing,
        out_dir = %out_dir.display(),
        files = args.inputs.len(),
        "Starting edit"
    );

    let mut edited = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let list = read_shot_list(input)?;
        let outcome = pipeline
            .run(&list.shots)
            .with_context(|| format!("Failed to edit {}", input.display()))?;

        let stem = file_stem(input);
        let outcome_path = out_dir.join(format!("{}.edited.json", stem));
        let json = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(&outcome_path, json)
            .with_context(|| format!("Failed to write {}", outcome_path.display()))?;

        let notes_path = if write_notes {
            let path = out_dir.join(format!("{}.director_notes.txt", stem));
            write_director_notes(&path, &outcome.shots, &outcome.editorial, Some(&outcome.rhythm))?;
            Some(path)
        } else {
            None
        };

        info!(
            input = %input.display(),
            output = %outcome_path.display(),
            shots = outcome.shots.len(),
            "Shot list edited"
        );

        edited.push(EditedFile {
            input: input.clone(),
            outcome_path,
            notes_path,
            shot_count: outcome.shots.len(),
            reduction_percent: outcome.editorial.reduction_percent,
        });
    }

    Ok(edited)
}

/// Compare two versions of a cut.
pub fn run_compare(args: &CompareArgs) -> Result<VersionComparison> {
    let v1 = read_shot_list(&args.v1)?;
    let v2 = read_shot_list(&args.v2)?;

    let comparison = validate_version_improvement(&v1.shots, &v2.shots, args.v1_score, args.v2_score);
    match &comparison.failure_reason {
        Some(reason) => warn!(reason = %reason, "Second version is not an improvement"),
        None => info!("Second version is an improvement"),
    }

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutroom_models::{MarketingIntent, Shot, ShotRole};

    fn write_list(dir: &Path, name: &str, shots: Vec<Shot>) -> PathBuf {
        let path = dir.join(name);
        let json = serde_json::to_string(&ShotList::new(shots)).unwrap();
        std::fs::write(&path, json).unwrap();
        path
    }

    fn scene() -> Vec<Shot> {
        [
            (ShotRole::Establishing, 5.0),
            (ShotRole::Detail, 4.0),
            (ShotRole::Action, 3.0),
            (ShotRole::Reaction, 3.5),
            (ShotRole::Resolution, 4.0),
        ]
        .iter()
        .enumerate()
        .map(|(i, (role, d))| Shot::new(format!("s{}", i), i as u32, *d).with_role(*role))
        .collect()
    }

    #[test]
    fn test_edit_writes_outcome_and_notes() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_list(dir.path(), "scene.json", scene());
        let out_dir = dir.path().join("out");
        let args = EditArgs {
            inputs: vec![input],
            out_dir: Some(out_dir.clone()),
            intent: Some(MarketingIntent::PaidAd),
            pacing: Some(0.5),
            notes: true,
        };

        let edited = run_edit(&args, &CliConfig::default()).unwrap();

        assert_eq!(edited.len(), 1);
        assert_eq!(edited[0].outcome_path, out_dir.join("scene.edited.json"));
        let written = std::fs::read_to_string(&edited[0].outcome_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            value["shots"].as_array().unwrap().len(),
            edited[0].shot_count
        );

        let notes = edited[0].notes_path.as_ref().unwrap();
        assert!(std::fs::read_to_string(notes)
            .unwrap()
            .contains("DIRECTOR'S NOTES"));
    }

    #[test]
    fn test_edit_uses_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_list(dir.path(), "scene.json", scene());
        let config = CliConfig {
            out_dir: dir.path().join("from-env"),
            ..CliConfig::default()
        };
        let args = EditArgs {
            inputs: vec![input],
            out_dir: None,
            intent: None,
            pacing: None,
            notes: false,
        };

        let edited = run_edit(&args, &config).unwrap();

        assert!(edited[0].outcome_path.starts_with(dir.path().join("from-env")));
        assert!(edited[0].notes_path.is_none());
    }

    #[test]
    fn test_edit_rejects_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_list(dir.path(), "empty.json", Vec::new());
        let args = EditArgs {
            inputs: vec![input],
            out_dir: Some(dir.path().join("out")),
            intent: None,
            pacing: None,
            notes: false,
        };

        let err = run_edit(&args, &CliConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("empty.json"));
    }

    #[test]
    fn test_read_shot_list_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_shot_list(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_compare_versions() {
        let dir = tempfile::tempdir().unwrap();
        let v1 = write_list(dir.path(), "v1.json", scene());
        let v2 = write_list(dir.path(), "v2.json", scene()[..4].to_vec());
        let args = CompareArgs {
            v1,
            v2,
            v1_score: 6.0,
            v2_score: 6.5,
        };

        let comparison = run_compare(&args).unwrap();
        assert!(comparison.improvement_valid);
        assert_eq!(comparison.v2_shots, 4);
    }
}
