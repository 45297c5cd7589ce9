//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cutroom_models::MarketingIntent;

/// Cutroom - trim and pace planned shot lists
#[derive(Debug, Parser)]
#[command(name = "cutroom")]
#[command(author = "Cutroom Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Editorial and rhythmic passes over planned shot lists")]
#[command(long_about = r#"
Cutroom takes planned shot lists (JSON) and returns an edited cut: purposes
and intensities assigned, flab trimmed, intensity runs broken, and the
final shot given an ending intent.

Examples:
  cutroom edit scene.json                        # Edit with the default preset
  cutroom edit a.json b.json --intent paid_ad    # Edit several lists as ads
  cutroom edit scene.json --pacing 0.8 --notes   # Aggressive brand, with notes
  cutroom compare v1.json v2.json --v1-score 6.5 --v2-score 7.2
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit one or more shot lists
    Edit(EditArgs),

    /// Check that a refined version is a real improvement
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Shot list JSON files ({"shots": [...]})
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (overrides CUTROOM_OUT_DIR)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Marketing preset: paid_ad, social_reel or youtube_explainer
    #[arg(short, long)]
    pub intent: Option<MarketingIntent>,

    /// Brand pacing aggressiveness, 0 (gentle) to 1 (aggressive)
    #[arg(short, long, value_parser = parse_pacing)]
    pub pacing: Option<f64>,

    /// Also write director's notes for each list
    #[arg(short, long)]
    pub notes: bool,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First version shot list JSON
    pub v1: PathBuf,

    /// Second version shot list JSON
    pub v2: PathBuf,

    /// Emotional quality score of the first version
    #[arg(long)]
    pub v1_score: f64,

    /// Emotional quality score of the second version
    #[arg(long)]
    pub v2_score: f64,
}

fn parse_pacing(value: &str) -> Result<f64, String> {
    let pacing: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (0.0..=1.0).contains(&pacing) {
        Ok(pacing)
    } else {
        Err(format!("pacing must be between 0 and 1, got {}", pacing))
    }
}
