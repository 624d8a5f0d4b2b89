use std::collections::HashSet;

use proptest::prelude::*;

use skilldex::client::{ClientConfig, SkillsClient};
use skilldex::test_utils::fixtures::{SkillFixture, descriptor};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_duplicates_collapse_to_last_scanned(
        // Each entry is the skill name used by one bundle, in scan order.
        bundles in prop::collection::vec(0usize..4, 1..12),
    ) {
        let fixture = SkillFixture::new();
        for (pos, name_id) in bundles.iter().enumerate() {
            let name = format!("skill-{name_id}");
            fixture.create_bundle(
                "skills",
                &format!("b{pos:02}"),
                &descriptor(&name, &format!("bundle {pos}"), &[], "body"),
            );
        }
        let client = SkillsClient::new(ClientConfig::new([fixture.path("skills")]));

        let listed = client.discover_metadata();
        let unique: HashSet<_> = listed.iter().map(|m| m.name.clone()).collect();
        prop_assert_eq!(unique.len(), listed.len());
        prop_assert_eq!(unique.len(), bundles.iter().collect::<HashSet<_>>().len());

        for meta in &listed {
            let last = bundles
                .iter()
                .rposition(|id| format!("skill-{id}") == meta.name)
                .unwrap();
            prop_assert_eq!(&meta.description, &format!("bundle {last}"));
        }
        prop_assert_eq!(
            client.diagnostics().collision_count,
            bundles.len() - unique.len()
        );
    }

    #[test]
    fn test_load_counts_match_calls(loads in prop::collection::vec(0usize..3, 0..20)) {
        let fixture = SkillFixture::new();
        for i in 0..3 {
            fixture.create_skill("skills", &format!("s{i}"), "d");
        }
        let client = SkillsClient::new(ClientConfig::new([fixture.path("skills")]));

        let mut last_total = 0;
        for id in &loads {
            client.load_skill(&format!("s{id}")).unwrap();
            let total = client.get_token_usage_stats().total_tokens;
            prop_assert!(total >= last_total);
            last_total = total;
        }

        let stats = client.get_token_usage_stats();
        for i in 0..3usize {
            let expected = loads.iter().filter(|id| **id == i).count() as u64;
            prop_assert_eq!(stats.loads_of(&format!("s{i}")), expected);
        }
    }
}
