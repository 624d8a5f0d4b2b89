//! skilldex doctor - Discovery diagnostics

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Rescan sources before reporting
    #[arg(long)]
    pub rescan: bool,
}

pub fn run(ctx: &AppContext, args: &DoctorArgs) -> Result<()> {
    let diag = if args.rescan || !ctx.client.diagnostics().built {
        ctx.client.rebuild()
    } else {
        ctx.client.diagnostics()
    };

    if ctx.robot_mode {
        return emit_json(&diag);
    }

    let mut layout = HumanLayout::new();
    layout
        .title("skilldex doctor")
        .kv("Skills", &diag.skills.to_string())
        .kv("Collisions", &diag.collision_count.to_string())
        .kv("Errors", &diag.discovery_errors.len().to_string());
    if let Some(built_at) = diag.built_at {
        layout.kv("Scanned", &built_at.to_rfc3339());
    }
    layout
        .kv("Descriptor", &ctx.config.discovery.descriptor)
        .kv("Eager", &ctx.config.discovery.eager.to_string())
        .kv(
            "Chars/token",
            &ctx.client.estimator().chars_per_token().to_string(),
        );

    layout.blank().section("Sources");
    for source in &diag.sources {
        let marker = if diag.missing_sources.contains(source) {
            console::style("missing").yellow().to_string()
        } else {
            console::style("ok").green().to_string()
        };
        layout.bullet(&format!("{} [{marker}]", source.display()));
    }

    if !diag.collisions.is_empty() {
        layout.blank().section("Collisions");
        for collision in &diag.collisions {
            layout.bullet(&format!(
                "{}: {} replaced by {}",
                collision.name,
                collision.replaced.display(),
                collision.winner.display()
            ));
        }
    }

    if !diag.discovery_errors.is_empty() {
        layout.blank().section("Discovery errors");
        for error in &diag.discovery_errors {
            layout.bullet(&format!("{}: {}", error.path.display(), error.reason));
        }
    }

    emit_human(layout);
    Ok(())
}
