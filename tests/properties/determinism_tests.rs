use std::path::Path;

use proptest::prelude::*;

use skilldex::core::parser::DescriptorParser;
use skilldex::core::search::{SearchQuery, rank};
use skilldex::core::skill::SkillMetadata;
use skilldex::core::tokens::TokenEstimator;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}(-[a-z0-9]{1,6}){0,2}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.()]{0,60}[A-Za-z0-9.]"
}

/// Flow-sequence items, quoted so words like `true` stay strings.
fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

proptest! {
    #[test]
    fn test_estimate_is_monotonic(base in ".{0,200}", extra in ".{0,50}") {
        let est = TokenEstimator::default();
        let longer = format!("{base}{extra}");
        prop_assert!(est.estimate(&longer) >= est.estimate(&base));
    }

    #[test]
    fn test_estimate_matches_ceiling(text in ".{0,300}", ratio in 1usize..16) {
        let est = TokenEstimator::new(ratio);
        let chars = text.chars().count() as u64;
        prop_assert_eq!(est.estimate(&text), chars.div_ceil(ratio as u64));
    }

    #[test]
    fn test_render_parse_round_trip(
        name in name_strategy(),
        description in text_strategy(),
        tools in prop::collection::vec("[a-z_]{1,12}", 0..4),
        tags in prop::collection::vec("[a-z]{1,8}", 0..3),
        body in "[^\\r]{0,200}",
    ) {
        let mut text = format!("---\nname: \"{name}\"\ndescription: \"{description}\"\n");
        if !tools.is_empty() {
            text.push_str(&format!("tools: [{}]\n", quoted(&tools)));
        }
        if !tags.is_empty() {
            text.push_str(&format!("tags: [{}]\n", quoted(&tags)));
        }
        text.push_str("---\n");
        text.push_str(&body);

        let source = Path::new("skills/x/SKILL.md");
        let parsed = DescriptorParser::parse_str(&text, source).unwrap();
        let rendered = DescriptorParser::render(&parsed).unwrap();
        let reparsed = DescriptorParser::parse_str(&rendered, source).unwrap();
        prop_assert_eq!(&reparsed.metadata, &parsed.metadata);
        prop_assert_eq!(&reparsed.instructions, &body);
    }

    #[test]
    fn test_blank_search_keeps_discovery_order(names in prop::collection::vec(name_strategy(), 0..20)) {
        let skills: Vec<SkillMetadata> = names
            .iter()
            .map(|n| SkillMetadata::new(n.clone(), "description"))
            .collect();
        let hits = rank(&skills, &SearchQuery::text(""));
        let ranked: Vec<&str> = hits.iter().map(|h| h.metadata.name.as_str()).collect();
        let original: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(ranked, original);
    }

    #[test]
    fn test_search_tiers_are_sorted(
        names in prop::collection::vec(name_strategy(), 1..20),
        query in "[a-z]{1,3}",
    ) {
        let skills: Vec<SkillMetadata> = names
            .iter()
            .enumerate()
            .map(|(i, n)| SkillMetadata::new(n.clone(), format!("{} tool {i}", names[names.len() - 1 - i])))
            .collect();
        let hits = rank(&skills, &SearchQuery::text(query.as_str()));
        prop_assert!(hits.windows(2).all(|w| w[0].tier <= w[1].tier));
        let positions: Vec<usize> = hits
            .iter()
            .map(|h| skills.iter().position(|s| std::ptr::eq(s, h.metadata)).unwrap())
            .collect();
        for pair in hits.iter().zip(&positions).collect::<Vec<_>>().windows(2) {
            if pair[0].0.tier == pair[1].0.tier {
                prop_assert!(pair[0].1 < pair[1].1);
            }
        }
    }
}
