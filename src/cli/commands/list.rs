//! skilldex list - List discovered skills

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::core::prompt::render_catalog_prompt;
use crate::core::search::SearchQuery;
use crate::core::skill::SkillMetadata;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Keep skills carrying any of these tags
    #[arg(long, short, num_args = 1..)]
    pub tags: Vec<String>,

    /// Keep skills in this category
    #[arg(long, short)]
    pub category: Option<String>,

    /// Print the `<available_skills>` prompt block instead of a table
    #[arg(long)]
    pub prompt: bool,
}

#[derive(Serialize)]
struct ListReport<'a> {
    count: usize,
    skills: &'a [SkillMetadata],
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let mut filter = SearchQuery::default().with_tags(args.tags.iter().cloned());
    filter.category.clone_from(&args.category);

    let skills: Vec<SkillMetadata> = ctx
        .client
        .discover_metadata()
        .into_iter()
        .filter(|meta| filter.admits(meta))
        .collect();
    debug!(target: "list", count = skills.len(), tags = ?args.tags, "listing skills");

    if args.prompt {
        print!("{}", render_catalog_prompt(&skills));
        return Ok(());
    }
    if ctx.robot_mode {
        return emit_json(&ListReport {
            count: skills.len(),
            skills: &skills,
        });
    }

    if skills.is_empty() {
        println!("No skills found");
        return Ok(());
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("{} skill(s)", skills.len()));
    for meta in &skills {
        layout.push_line(console::style(&meta.name).cyan().bold().to_string());
        layout.push_line(format!("  {}", meta.description));
        layout.push_line(format!("  category: {}", meta.category));
        if !meta.tags.is_empty() {
            layout.push_line(format!("  tags: {}", meta.tags.join(", ")));
        }
        layout.blank();
    }
    emit_human(layout);
    Ok(())
}
