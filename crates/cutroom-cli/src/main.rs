//! Cutroom binary.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use cutroom_cli::{logging, run_compare, run_edit, Cli, CliConfig, Command};

fn main() -> Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    logging::init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::from_env();
    debug!("CLI config: {:?}", config);

    match cli.command {
        Command::Edit(args) => {
            for file in run_edit(&args, &config)? {
                println!(
                    "{} -> {} ({} shots, {:.1}% trimmed)",
                    file.input.display(),
                    file.outcome_path.display(),
                    file.shot_count,
                    file.reduction_percent * 100.0
                );
                if let Some(notes) = file.notes_path {
                    println!("  notes: {}", notes.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare(args) => {
            let comparison = run_compare(&args)?;
            println!("{}", serde_json::to_string_pretty(&comparison)?);
            if comparison.improvement_valid {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
