//! Narrow interface for agent-framework adapters.
//!
//! Adapters register the four tools described by [`tool_specs`] with their
//! framework and forward calls to [`invoke_tool`]. They never see the index
//! or the client internals.

use serde::Serialize;
use serde_json::{Value, json};

use crate::client::SkillsClient;
use crate::core::skill::SkillMetadata;
use crate::error::{Result, SkillsError};

pub const LIST_TOOL: &str = "list_available_skills";
pub const SEARCH_TOOL: &str = "search_skills";
pub const LOAD_TOOL: &str = "load_skill_instructions";
pub const TOOLS_TOOL: &str = "get_skill_tools";

pub trait SkillProvider: Send + Sync {
    fn list_metadata(&self) -> Vec<SkillMetadata>;

    fn search(&self, query: &str) -> Vec<SkillMetadata>;

    fn load_instructions(&self, name: &str) -> Result<String>;

    fn tool_names(&self, name: &str) -> Result<Vec<String>>;

    fn tool_specs(&self) -> Vec<ToolSpec> {
        tool_specs()
    }
}

impl SkillProvider for SkillsClient {
    fn list_metadata(&self) -> Vec<SkillMetadata> {
        self.discover_metadata()
    }

    fn search(&self, query: &str) -> Vec<SkillMetadata> {
        self.search_skills(query)
    }

    fn load_instructions(&self, name: &str) -> Result<String> {
        self.get_instructions(name)
    }

    fn tool_names(&self, name: &str) -> Result<Vec<String>> {
        self.get_tool_names(name)
    }
}

/// A tool an adapter exposes to its agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn skill_name_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "skill_name": {
                "type": "string",
                "description": "Name of the skill, as listed by list_available_skills"
            }
        },
        "required": ["skill_name"]
    })
}

#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: LIST_TOOL,
            description: "List all available skills with their descriptions. Use this first to see \
                          what capabilities exist before loading any instructions.",
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolSpec {
            name: SEARCH_TOOL,
            description: "Search for skills matching a task or capability, e.g. 'pdf' or \
                          'spreadsheet'.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search terms" }
                },
                "required": ["query"]
            }),
        },
        ToolSpec {
            name: LOAD_TOOL,
            description: "Load the full instructions for one skill. Only do this once a skill is \
                          relevant to the task.",
            input_schema: skill_name_schema(),
        },
        ToolSpec {
            name: TOOLS_TOOL,
            description: "List the tools a skill declares, without loading its instructions.",
            input_schema: skill_name_schema(),
        },
    ]
}

/// Dispatch one tool call by name. Arguments follow the tool's input schema.
pub fn invoke_tool(provider: &dyn SkillProvider, tool: &str, args: &Value) -> Result<Value> {
    match tool {
        LIST_TOOL => {
            let skills = provider.list_metadata();
            Ok(json!({
                "total_skills": skills.len(),
                "skills": skills.iter().map(summary).collect::<Vec<_>>(),
            }))
        }
        SEARCH_TOOL => {
            let query = string_arg(tool, args, "query")?;
            let skills = provider.search(query);
            Ok(json!({
                "query": query,
                "matches_found": skills.len(),
                "skills": skills.iter().map(summary).collect::<Vec<_>>(),
            }))
        }
        LOAD_TOOL => {
            let name = string_arg(tool, args, "skill_name")?;
            let instructions = provider.load_instructions(name)?;
            Ok(json!({
                "skill_name": name,
                "instructions": instructions,
            }))
        }
        TOOLS_TOOL => {
            let name = string_arg(tool, args, "skill_name")?;
            let tools = provider.tool_names(name)?;
            Ok(json!({
                "skill_name": name,
                "total_tools": tools.len(),
                "tools": tools,
            }))
        }
        other => Err(SkillsError::InvalidToolCall {
            tool: other.to_string(),
            reason: "no such tool".to_string(),
        }),
    }
}

fn summary(meta: &SkillMetadata) -> Value {
    json!({
        "name": meta.name,
        "description": meta.description,
        "category": meta.category,
        "tags": meta.tags,
    })
}

fn string_arg<'a>(tool: &str, args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| SkillsError::InvalidToolCall {
            tool: tool.to_string(),
            reason: format!("missing string argument `{key}`"),
        })
}
