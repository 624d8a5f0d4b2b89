use std::path::{Path, PathBuf};

use skilldex::SkillsError;
use skilldex::core::parser::DescriptorParser;
use skilldex::test_utils::{TestCase, run_table_tests};

const FULL: &str = "---
name: pdf
description: Read, merge and split PDF files
category: documents
tools: [extract, merge]
version: 1.2
author: Docs Team
license: MIT
tags: [office, pdf]
resources: [reference/forms.md]
---
# PDF

See [the guide](reference/guide.md) and [forms](reference/forms.md).
";

#[test]
fn parses_every_frontmatter_field() {
    let parsed = DescriptorParser::parse_str(FULL, Path::new("skills/pdf/SKILL.md")).unwrap();
    let meta = &parsed.metadata;
    assert_eq!(meta.name, "pdf");
    assert_eq!(meta.category, "documents");
    assert_eq!(meta.tools, vec!["extract", "merge"]);
    assert_eq!(meta.version.as_deref(), Some("1.2"));
    assert_eq!(meta.author.as_deref(), Some("Docs Team"));
    assert_eq!(meta.license.as_deref(), Some("MIT"));
    assert_eq!(meta.tags, vec!["office", "pdf"]);
    assert!(parsed.instructions.starts_with("# PDF\n"));
    assert_eq!(
        parsed.resources,
        vec![
            PathBuf::from("reference/forms.md"),
            PathBuf::from("reference/guide.md")
        ]
    );
}

#[test]
fn render_then_parse_is_stable() {
    let source = Path::new("skills/pdf/SKILL.md");
    let parsed = DescriptorParser::parse_str(FULL, source).unwrap();
    let rendered = DescriptorParser::render(&parsed).unwrap();
    let reparsed = DescriptorParser::parse_str(&rendered, source).unwrap();
    assert_eq!(reparsed, parsed);
}

#[test]
fn descriptor_errors() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "no fence",
            input: "name: pdf\n",
            expected: "malformed_descriptor",
        },
        TestCase {
            name: "unterminated",
            input: "---\nname: pdf\ndescription: d\n",
            expected: "malformed_descriptor",
        },
        TestCase {
            name: "bad yaml",
            input: "---\nname: [unclosed\n---\n",
            expected: "malformed_descriptor",
        },
        TestCase {
            name: "missing name",
            input: "---\ndescription: d\n---\n",
            expected: "missing_required_field",
        },
        TestCase {
            name: "blank description",
            input: "---\nname: pdf\ndescription: \"  \"\n---\n",
            expected: "missing_required_field",
        },
    ];

    run_table_tests(cases, |input| {
        DescriptorParser::parse_str(input, Path::new("SKILL.md"))
            .map(|_| "ok")
            .unwrap_or_else(|err| err.code())
    })
}

#[test]
fn missing_field_names_the_field() {
    let err = DescriptorParser::parse_str("---\nname: pdf\n---\n", Path::new("x/SKILL.md"))
        .unwrap_err();
    match err {
        SkillsError::MissingRequiredField { field, location } => {
            assert_eq!(field, "description");
            assert_eq!(location, "x/SKILL.md");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
