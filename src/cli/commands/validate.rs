//! skilldex validate - Check a skill against bundle conventions

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Skill name
    pub name: String,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let warnings = ctx.client.validate_skill(&args.name)?;

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "skill": args.name,
            "valid": warnings.is_empty(),
            "warnings": warnings,
        }));
    }

    if warnings.is_empty() {
        println!("{} {}", console::style("ok").green().bold(), args.name);
        return Ok(());
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("{}: {} warning(s)", args.name, warnings.len()));
    for warning in &warnings {
        layout.bullet(&format!("{}: {}", warning.field, warning.message));
    }
    emit_human(layout);
    Ok(())
}
