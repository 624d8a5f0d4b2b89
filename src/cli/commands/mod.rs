//! CLI command implementations
//!
//! Each subcommand has its own module with an Args struct and a `run()`.

use clap::Subcommand;

pub mod doctor;
pub mod info;
pub mod list;
pub mod load;
pub mod search;
pub mod tools;
pub mod validate;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered skills
    List(list::ListArgs),

    /// Show details for one skill
    Info(info::InfoArgs),

    /// Search skills by name, description, category or tags
    Search(search::SearchArgs),

    /// Load a skill's full instructions
    Load(load::LoadArgs),

    /// Show the tools a skill declares
    Tools(tools::ToolsArgs),

    /// Check a skill against bundle conventions
    Validate(validate::ValidateArgs),

    /// Report discovery sources, collisions and errors
    Doctor(doctor::DoctorArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::List(args) => list::run(ctx, args),
        Commands::Info(args) => info::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Load(args) => load::run(ctx, args),
        Commands::Tools(args) => tools::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Doctor(args) => doctor::run(ctx, args),
    }
}
