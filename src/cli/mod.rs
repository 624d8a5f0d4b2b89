//! Command-line interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod output;

pub use commands::Commands;

/// Browse, search and load agent skills with progressive disclosure.
#[derive(Parser, Debug)]
#[command(name = "skilldex", version, about, propagate_version = true)]
pub struct Cli {
    /// Config file to use instead of the global and project files
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skill source to scan; repeat to scan several, in order. Must come
    /// before the subcommand
    #[arg(long = "skill-path", value_name = "PATH")]
    pub skill_paths: Vec<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
