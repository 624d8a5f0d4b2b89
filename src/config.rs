//! Layered configuration.
//!
//! Defaults, then `<config dir>/skilldex/config.toml`, then `./.skilldex.toml`
//! (or a single explicit file), then `SKILLDEX_*` environment overrides.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::discovery::DEFAULT_DESCRIPTOR;
use crate::core::tokens::DEFAULT_CHARS_PER_TOKEN;
use crate::error::{Result, SkillsError};

/// Extra skill sources, separated like `PATH`.
pub const AGENT_SKILLS_PATH_ENV: &str = "AGENT_SKILLS_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub tokens: TokensConfig,
}

impl Config {
    /// Layered load: defaults, then the global and project files (or only
    /// the explicit file), then `SKILLDEX_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("SKILLDEX_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                SkillsError::Config(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project()? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a single TOML document over the defaults. No env overrides.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|err| SkillsError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skilldex/config.toml"))
    }

    #[must_use]
    pub fn project_path() -> PathBuf {
        PathBuf::from(".skilldex.toml")
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_project() -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::project_path())
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            SkillsError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            SkillsError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.discovery {
            self.discovery.merge(patch);
        }
        if let Some(patch) = patch.tokens {
            self.tokens.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(values) = env_list("SKILLDEX_PATHS") {
            self.discovery.paths = merge_unique(values, &self.discovery.paths);
        }
        if let Some(value) = env_bool("SKILLDEX_EAGER")? {
            self.discovery.eager = value;
        }
        if let Some(value) = env_string("SKILLDEX_DESCRIPTOR") {
            self.discovery.descriptor = value;
        }
        if let Some(value) = env_usize("SKILLDEX_CHARS_PER_TOKEN")? {
            self.tokens.chars_per_token = value;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let descriptor = self.discovery.descriptor.trim();
        if descriptor.is_empty() || descriptor.contains(['/', '\\']) {
            return Err(SkillsError::Config(format!(
                "descriptor must be a plain file name, got {:?}",
                self.discovery.descriptor
            )));
        }
        if self.tokens.chars_per_token == 0 {
            return Err(SkillsError::Config(
                "tokens.chars_per_token must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Ordered, de-duplicated scan sources with `~` expanded.
    ///
    /// Falls back to `~/.agent-skills` and `./skills` when no paths are
    /// configured; `AGENT_SKILLS_PATH` entries come last when enabled.
    #[must_use]
    pub fn skill_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = if self.discovery.paths.is_empty() {
            default_skill_paths()
        } else {
            self.discovery.paths.iter().map(|p| expand_home(p)).collect()
        };
        if self.discovery.follow_env {
            if let Some(raw) = std::env::var_os(AGENT_SKILLS_PATH_ENV) {
                paths.extend(
                    std::env::split_paths(&raw)
                        .filter(|p| !p.as_os_str().is_empty())
                        .map(|p| expand_home(&p.to_string_lossy())),
                );
            }
        }

        let mut seen = HashSet::new();
        paths.retain(|p| seen.insert(p.clone()));
        paths
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub paths: Vec<String>,
    pub eager: bool,
    pub descriptor: String,
    pub follow_env: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            eager: true,
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
            follow_env: true,
        }
    }
}

impl DiscoveryConfig {
    fn merge(&mut self, patch: DiscoveryPatch) {
        if let Some(values) = patch.paths {
            self.paths = values;
        }
        if let Some(value) = patch.eager {
            self.eager = value;
        }
        if let Some(value) = patch.descriptor {
            self.descriptor = value;
        }
        if let Some(value) = patch.follow_env {
            self.follow_env = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    pub chars_per_token: usize,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

impl TokensConfig {
    fn merge(&mut self, patch: TokensPatch) {
        if let Some(value) = patch.chars_per_token {
            self.chars_per_token = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub discovery: Option<DiscoveryPatch>,
    pub tokens: Option<TokensPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiscoveryPatch {
    pub paths: Option<Vec<String>>,
    pub eager: Option<bool>,
    pub descriptor: Option<String>,
    pub follow_env: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokensPatch {
    pub chars_per_token: Option<usize>,
}

fn default_skill_paths() -> Vec<PathBuf> {
    vec![expand_home("~/.agent-skills"), PathBuf::from("skills")]
}

/// Expand a leading `~` to the home directory. Other paths pass through.
#[must_use]
pub fn expand_home(raw: &str) -> PathBuf {
    let Some(rest) = raw.strip_prefix('~') else {
        return PathBuf::from(raw);
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        return PathBuf::from(raw);
    }
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.into_iter().chain(existing.iter().cloned()) {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_bool(key: &str) -> Result<Option<bool>> {
    let Some(value) = env_string(key) else {
        return Ok(None);
    };
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(SkillsError::Config(format!(
            "invalid {key} value {value} (expected true|false)"
        ))),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match env_string(key) {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|err| SkillsError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    env_string(key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
