//! skilldex load - Load a skill's full instructions

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_json, HumanLayout};
use crate::core::prompt::render_skill_prompt;
use crate::core::skill::SkillContent;
use crate::core::usage::UsageStats;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Skill name
    pub name: String,

    /// Wrap the instructions in a `<skill>` prompt block
    #[arg(long)]
    pub prompt: bool,

    /// Report token usage after loading
    #[arg(long)]
    pub stats: bool,
}

#[derive(Serialize)]
struct LoadReport<'a> {
    #[serde(flatten)]
    content: &'a SkillContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<UsageStats>,
}

pub fn run(ctx: &AppContext, args: &LoadArgs) -> Result<()> {
    let content = ctx.client.load_skill(&args.name)?;
    let prompt = args.prompt.then(|| render_skill_prompt(&content));
    let stats = args.stats.then(|| ctx.client.get_token_usage_stats());

    if ctx.robot_mode {
        return emit_json(&LoadReport {
            content: &content,
            prompt,
            stats,
        });
    }

    match &prompt {
        Some(prompt) => print!("{prompt}"),
        None => print!("{}", content.instructions),
    }
    if let Some(stats) = stats {
        let mut layout = HumanLayout::new();
        layout
            .blank()
            .section("Token usage")
            .kv("Loaded", &stats.load_tokens.to_string())
            .kv("Listed", &stats.list_tokens.to_string())
            .kv("Searched", &stats.search_tokens.to_string())
            .kv("Total", &stats.total_tokens.to_string())
            .kv("Upfront", &stats.upfront_tokens.to_string())
            .kv("Saved", &format!("{:.1}%", stats.savings_percent));
        eprintln!("{}", layout.build());
    }
    Ok(())
}
