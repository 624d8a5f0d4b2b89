//! skilldex tools - Show the tools a skill declares

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Skill name
    pub name: String,
}

pub fn run(ctx: &AppContext, args: &ToolsArgs) -> Result<()> {
    let tools = ctx.client.get_tool_names(&args.name)?;

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "skill": args.name,
            "tools": tools,
        }));
    }

    if tools.is_empty() {
        println!("{} declares no tools", args.name);
    }
    for tool in &tools {
        println!("{tool}");
    }
    Ok(())
}
