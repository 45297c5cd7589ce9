//! Command-line front end for the shot editing engine.
//!
//! This crate provides:
//! - Argument parsing for the `edit` and `compare` subcommands
//! - Environment-driven runtime configuration
//! - Tracing subscriber setup

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{Cli, Command, CompareArgs, EditArgs};
pub use commands::{read_shot_list, run_compare, run_edit, EditedFile};
pub use config::CliConfig;
