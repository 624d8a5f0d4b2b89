//! E2E Scenario: an agent driving the tool interface
//!
//! The adapter sees only `SkillProvider`; this walks the list → search →
//! tools → load sequence an agent would follow.

use serde_json::json;

use skilldex::adapter::{
    LIST_TOOL, LOAD_TOOL, SEARCH_TOOL, SkillProvider, TOOLS_TOOL, invoke_tool,
};
use skilldex::client::{ClientConfig, SkillsClient};
use skilldex::test_utils::fixtures::{SkillFixture, descriptor};

#[test]
fn test_agent_tool_sequence() {
    let fixture = SkillFixture::new();
    for (name, description) in [
        ("pdf", "Work with PDF documents"),
        ("xlsx", "Spreadsheets"),
        ("pptx", "Slide decks"),
        ("docx", "Word documents"),
    ] {
        fixture.create_bundle(
            "skills",
            name,
            &descriptor(name, description, &["run"], &format!("How to use {name}.\n").repeat(60)),
        );
    }
    let client = SkillsClient::new(ClientConfig::new([fixture.path("skills")]));
    let provider: &dyn SkillProvider = &client;

    let specs = provider.tool_specs();
    assert_eq!(specs.len(), 4);

    let listed = invoke_tool(provider, LIST_TOOL, &json!({})).unwrap();
    assert_eq!(listed["total_skills"], 4);

    let found = invoke_tool(provider, SEARCH_TOOL, &json!({ "query": "documents" })).unwrap();
    assert_eq!(found["matches_found"], 2);
    assert_eq!(found["skills"][0]["name"], "docx");

    let tools = invoke_tool(provider, TOOLS_TOOL, &json!({ "skill_name": "pdf" })).unwrap();
    assert_eq!(tools["total_tools"], 1);
    assert!(!client.is_loaded("pdf"));

    let loaded = invoke_tool(provider, LOAD_TOOL, &json!({ "skill_name": "pdf" })).unwrap();
    assert!(loaded["instructions"].as_str().unwrap().starts_with("How to use pdf."));

    let stats = client.get_token_usage_stats();
    assert_eq!(stats.loads_of("pdf"), 1);
    assert!(stats.savings_percent > 50.0, "savings {}", stats.savings_percent);
}
