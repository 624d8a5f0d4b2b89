//! Skill records: the always-resident metadata and the on-demand content.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category assigned when a descriptor does not declare one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Kind of capability a skill provides, from the optional `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillType {
    Workflow,
    Tool,
    Knowledge,
    DomainExpert,
}

impl SkillType {
    pub const ALL: [Self; 4] = [Self::Workflow, Self::Tool, Self::Knowledge, Self::DomainExpert];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workflow => "workflow",
            Self::Tool => "tool",
            Self::Knowledge => "knowledge",
            Self::DomainExpert => "domain-expert",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("unknown skill type `{wanted}` (expected workflow, tool, knowledge or domain-expert)")
            })
    }
}

/// Lightweight summary of a skill, kept in memory for every indexed skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Location of the descriptor this record was parsed from.
    pub source_path: PathBuf,
    /// Declared tool names, in declaration order.
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub skill_type: Option<SkillType>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SkillMetadata {
    /// Minimal record with defaults for every optional field.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: DEFAULT_CATEGORY.to_string(),
            source_path: PathBuf::new(),
            tools: Vec::new(),
            version: None,
            author: None,
            license: None,
            skill_type: None,
            tags: Vec::new(),
        }
    }

    /// Directory holding the descriptor, i.e. the skill bundle root.
    #[must_use]
    pub fn bundle_dir(&self) -> &Path {
        self.source_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// The text an agent sees for this skill in a listing.
    #[must_use]
    pub fn listing_text(&self) -> String {
        let mut text = format!("{}: {} [{}]", self.name, self.description, self.category);
        if !self.tools.is_empty() {
            text.push_str(" tools: ");
            text.push_str(&self.tools.join(", "));
        }
        text
    }
}

/// Full content of a skill, materialized the first time it is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillContent {
    pub metadata: SkillMetadata,
    /// Descriptor body after the frontmatter, passed through untouched.
    pub instructions: String,
    /// Bundle-relative paths of auxiliary resources. Never read eagerly.
    pub resources: Vec<PathBuf>,
}

impl SkillContent {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    #[must_use]
    pub fn has_resource(&self, relative: &Path) -> bool {
        self.resources.iter().any(|r| r == relative)
    }
}
