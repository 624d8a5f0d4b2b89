use skilldex::core::search::{MatchTier, SearchQuery, rank};
use skilldex::core::skill::SkillMetadata;
use skilldex::test_utils::{TestCase, run_table_tests};

fn catalog() -> Vec<SkillMetadata> {
    let mut xlsx = SkillMetadata::new("xlsx", "Spreadsheets and charts");
    xlsx.category = "office".into();
    let mut pptx = SkillMetadata::new("pptx", "Slide decks");
    pptx.category = "office".into();
    pptx.tags = vec!["presentation".into()];
    let mut charting = SkillMetadata::new("charting", "Plot data from spreadsheets");
    charting.category = "data".into();
    vec![xlsx, pptx, charting]
}

#[test]
fn query_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "blank keeps discovery order",
            input: "",
            expected: vec!["xlsx", "pptx", "charting"],
        },
        TestCase {
            name: "name before description",
            input: "chart",
            expected: vec!["charting", "xlsx"],
        },
        TestCase {
            name: "category tier",
            input: "OFFICE",
            expected: vec!["xlsx", "pptx"],
        },
        TestCase {
            name: "tag tier",
            input: "presentation",
            expected: vec!["pptx"],
        },
        TestCase {
            name: "all keywords in one field",
            input: "plot spreadsheets",
            expected: vec!["charting"],
        },
        TestCase {
            name: "no match",
            input: "kubernetes",
            expected: vec![],
        },
    ];

    let skills = catalog();
    run_table_tests(cases, |text| {
        rank(&skills, &SearchQuery::text(text))
            .into_iter()
            .map(|hit| hit.metadata.name.as_str())
            .collect::<Vec<_>>()
    })
}

#[test]
fn description_match_never_outranks_name_match() {
    let skills = catalog();
    let hits = rank(&skills, &SearchQuery::text("spreadsheets"));
    let tiers: Vec<_> = hits.iter().map(|h| h.tier).collect();
    assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(tiers[0], Some(MatchTier::Description));
}
