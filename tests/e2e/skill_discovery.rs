//! E2E Scenario: discover → search → load → rebuild
//!
//! Exercises a realistic library spread across a user source and a project
//! source, where the project overrides one user skill.

use std::path::PathBuf;

use skilldex::client::{ClientConfig, SkillsClient};
use skilldex::core::search::MatchTier;
use skilldex::test_utils::fixtures::SkillFixture;
use skilldex::{Result, SkillsError};

const PDF: &str = "---
name: pdf
description: Extract text and tables from PDF files, fill forms, merge documents
category: documents
tools: [extract_text, fill_form, merge]
tags: [office, forms]
---
# PDF processing

1. Run `scripts/extract.py` for text.
2. Read [the forms guide](reference/forms.md) before filling forms.
";

const XLSX: &str = "---
name: xlsx
description: Create and edit spreadsheets with formulas and charts
category: documents
allowed-tools: read_sheet, write_sheet
---
Use openpyxl. Never hardcode computed values.
";

const PDF_PROJECT: &str = "---
name: pdf
description: Project-specific PDF rules
category: documents
---
Use the company letterhead.
";

fn build_library() -> SkillFixture {
    let fixture = SkillFixture::new();
    fixture.create_bundle("user", "pdf", PDF);
    fixture.create_file("user/pdf/scripts/extract.py", "print('extract')\n");
    fixture.create_file("user/pdf/reference/forms.md", "# Forms\n");
    fixture.create_bundle("user", "xlsx", XLSX);
    fixture.create_bundle("user", ".hidden", "---\nname: hidden\ndescription: h\n---\n");
    fixture.create_bundle("user", "broken", "---\nname: broken\n");
    fixture
}

#[test]
fn test_user_library_workflow() -> Result<()> {
    let fixture = build_library();
    let client = SkillsClient::new(ClientConfig::new([fixture.path("user")]).eager(false));

    // Step 1: discovery skips hidden and broken bundles
    let names: Vec<String> = client
        .discover_metadata()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["pdf", "xlsx"]);
    let diag = client.diagnostics();
    assert_eq!(diag.discovery_errors.len(), 1);
    assert_eq!(diag.materialized, 0);

    // Step 2: search without loading
    let hits = client.search(&"forms".into());
    assert_eq!(hits[0].metadata.name, "pdf");
    assert_eq!(hits[0].tier, Some(MatchTier::Description));
    assert_eq!(client.get_tool_names("xlsx")?, vec!["read_sheet", "write_sheet"]);
    assert!(!client.is_loaded("pdf"));

    // Step 3: load and inspect resources
    let pdf = client.load_skill("pdf")?;
    assert!(pdf.instructions.starts_with("# PDF processing"));
    assert_eq!(
        pdf.resources,
        vec![
            PathBuf::from("reference/forms.md"),
            PathBuf::from("scripts/extract.py"),
        ]
    );
    assert_eq!(client.read_resource("pdf", "reference/forms.md")?, b"# Forms\n");
    assert!(client.validate_skill("pdf")?.is_empty());

    let stats = client.get_token_usage_stats();
    assert_eq!(stats.loads_of("pdf"), 1);
    assert_eq!(stats.loads_of("xlsx"), 0);
    assert!(stats.upfront_tokens > 0);
    Ok(())
}

#[test]
fn test_project_source_overrides_user_source() -> Result<()> {
    let fixture = build_library();
    let client = SkillsClient::new(ClientConfig::new([
        fixture.path("user"),
        fixture.path("project"),
    ]));
    assert_eq!(
        client.get_metadata("pdf")?.description,
        "Extract text and tables from PDF files, fill forms, merge documents"
    );

    // Step 1: a project skill appears; rebuild picks it up and it wins
    fixture.create_bundle("project", "pdf-overrides", PDF_PROJECT);
    let diag = client.rebuild();
    assert_eq!(diag.collision_count, 1);
    assert_eq!(diag.collisions[0].winner, fixture.path("project/pdf-overrides/SKILL.md"));
    assert_eq!(client.get_instructions("pdf")?, "Use the company letterhead.\n");

    // Step 2: the winner keeps its scan position, after xlsx
    let names: Vec<String> = client
        .discover_metadata()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["xlsx", "pdf"]);

    // Step 3: the user copy's resources are no longer reachable
    let err = client.read_resource("pdf", "reference/forms.md").unwrap_err();
    assert!(matches!(err, SkillsError::ResourceNotFound { .. }));
    Ok(())
}
