use std::path::PathBuf;

use skilldex::SkillsError;
use skilldex::client::ClientConfig;
use skilldex::config::Config;
use skilldex::test_utils::fixtures::SkillFixture;
use skilldex::test_utils::{TestCase, run_table_tests};

#[test]
fn config_sections_from_toml() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "empty",
            input: "",
            expected: (Vec::<String>::new(), true, "SKILL.md".to_string(), true, 4usize),
        },
        TestCase {
            name: "discovery only",
            input: "[discovery]\npaths = [\"~/skills\", \"/opt/skills\"]\neager = false\n",
            expected: (
                vec!["~/skills".to_string(), "/opt/skills".to_string()],
                false,
                "SKILL.md".to_string(),
                true,
                4,
            ),
        },
        TestCase {
            name: "everything",
            input: "[discovery]\ndescriptor = \"skill.md\"\nfollow_env = false\n\n[tokens]\nchars_per_token = 3\n",
            expected: (Vec::new(), true, "skill.md".to_string(), false, 3),
        },
    ];

    run_table_tests(cases, |raw| {
        let config = Config::from_toml_str(raw).expect("parse config");
        (
            config.discovery.paths,
            config.discovery.eager,
            config.discovery.descriptor,
            config.discovery.follow_env,
            config.tokens.chars_per_token,
        )
    })
}

#[test]
fn invalid_values_are_config_errors() {
    for raw in [
        "[tokens]\nchars_per_token = 0\n",
        "[discovery]\ndescriptor = \"\"\n",
        "[discovery]\neager = \"maybe\"\n",
        "[unknown]\nkey = 1\n",
    ] {
        let err = Config::from_toml_str(raw).unwrap_err();
        assert!(matches!(err, SkillsError::Config(_)), "{raw}");
    }
}

#[test]
fn explicit_file_replaces_file_layers() {
    let fixture = SkillFixture::new();
    let path = fixture.create_file("explicit.toml", "[tokens]\nchars_per_token = 2\n");
    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.tokens.chars_per_token, 2);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let fixture = SkillFixture::new();
    let err = Config::load(Some(fixture.path("nope.toml").as_path())).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn client_config_follows_config() {
    let mut config = Config::from_toml_str(
        "[discovery]\npaths = [\"/a\", \"/b\"]\neager = false\nfollow_env = false\ndescriptor = \"README.md\"\n[tokens]\nchars_per_token = 5\n",
    )
    .unwrap();
    let client = ClientConfig::from(&config);
    assert_eq!(client.sources, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    assert!(!client.eager);
    assert_eq!(client.descriptor, "README.md");
    assert_eq!(client.chars_per_token, 5);

    config.discovery.paths.clear();
    let defaults = ClientConfig::from(&config);
    assert_eq!(defaults.sources.len(), 2);
    assert_eq!(defaults.sources[1], PathBuf::from("skills"));
}
