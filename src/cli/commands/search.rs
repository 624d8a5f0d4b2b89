//! skilldex search - Search skills

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::client::SkillMatch;
use crate::core::search::SearchQuery;
use crate::core::skill::SkillType;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search terms; omit to list everything that passes the filters
    pub query: Option<String>,

    /// Keep skills carrying any of these tags
    #[arg(long, short, num_args = 1..)]
    pub tags: Vec<String>,

    /// Keep skills in this category
    #[arg(long, short)]
    pub category: Option<String>,

    /// Keep skills by this author (exact match)
    #[arg(long)]
    pub author: Option<String>,

    /// Keep skills of this type: workflow, tool, knowledge or domain-expert
    #[arg(long = "type", value_name = "TYPE")]
    pub skill_type: Option<SkillType>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    count: usize,
    results: &'a [SkillMatch],
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let text = args.query.clone().unwrap_or_default();
    let mut query = SearchQuery::text(text.as_str()).with_tags(args.tags.iter().cloned());
    query.category.clone_from(&args.category);
    query.author.clone_from(&args.author);
    query.skill_type = args.skill_type;

    let mut results = ctx.client.search(&query);
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    if ctx.robot_mode {
        return emit_json(&SearchReport {
            query: &text,
            count: results.len(),
            results: &results,
        });
    }

    if results.is_empty() {
        println!("No skills match '{text}'");
        return Ok(());
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("{} match(es)", results.len()));
    for hit in &results {
        let tier = hit
            .tier
            .map(|tier| format!(" ({tier:?})").to_lowercase())
            .unwrap_or_default();
        layout.push_line(format!(
            "{}{}",
            console::style(&hit.metadata.name).cyan().bold(),
            console::style(tier).dim()
        ));
        layout.push_line(format!("  {}", hit.metadata.description));
    }
    emit_human(layout);
    Ok(())
}
