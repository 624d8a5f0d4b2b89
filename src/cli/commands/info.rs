//! skilldex info - Show details for one skill

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::core::skill::SkillMetadata;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Skill name
    pub name: String,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    #[serde(flatten)]
    metadata: &'a SkillMetadata,
    instruction_tokens: u64,
    resources: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &InfoArgs) -> Result<()> {
    let content = ctx.client.load_skill(&args.name)?;
    let meta = &content.metadata;
    let report = InfoReport {
        metadata: meta,
        instruction_tokens: ctx.client.estimator().estimate(&content.instructions),
        resources: content
            .resources
            .iter()
            .map(|r| r.display().to_string())
            .collect(),
    };

    if ctx.robot_mode {
        return emit_json(&report);
    }

    let mut layout = HumanLayout::new();
    layout
        .title(&meta.name)
        .kv("Description", &meta.description)
        .kv("Category", &meta.category)
        .kv("Source", &meta.source_path.display().to_string())
        .kv("Tokens", &report.instruction_tokens.to_string());
    if let Some(version) = &meta.version {
        layout.kv("Version", version);
    }
    if let Some(skill_type) = meta.skill_type {
        layout.kv("Type", skill_type.as_str());
    }
    if let Some(author) = &meta.author {
        layout.kv("Author", author);
    }
    if let Some(license) = &meta.license {
        layout.kv("License", license);
    }
    if !meta.tags.is_empty() {
        layout.kv("Tags", &meta.tags.join(", "));
    }
    if !meta.tools.is_empty() {
        layout.blank().section("Tools");
        for tool in &meta.tools {
            layout.bullet(tool);
        }
    }
    if !report.resources.is_empty() {
        layout.blank().section("Resources");
        for resource in &report.resources {
            layout.bullet(resource);
        }
    }
    emit_human(layout);
    Ok(())
}
