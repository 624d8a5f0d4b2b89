//! Descriptor parser.
//!
//! A descriptor is a `---` fenced YAML frontmatter block followed by a
//! free-text instructions body. Parsing is a pure function of the text; the
//! `source` path is only recorded in the metadata and used in error messages.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillsError};

use super::skill::{DEFAULT_CATEGORY, SkillMetadata, SkillType};

const FENCE: &str = "---";

/// Markdown link targets: `[text](target)`.
static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\(\s*<?([^)\s>]+)>?(?:\s+[^)]*)?\)").expect("link regex is valid")
});

/// Result of parsing one descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDescriptor {
    pub metadata: SkillMetadata,
    pub instructions: String,
    /// Resources listed under the `resources` frontmatter key.
    pub declared_resources: Vec<PathBuf>,
    /// Declared resources followed by relative links found in the body.
    pub resources: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(alias = "allowed-tools", alias = "allowed_tools")]
    tools: Option<ToolList>,
    version: Option<serde_yaml::Value>,
    author: Option<String>,
    license: Option<String>,
    #[serde(rename = "type")]
    skill_type: Option<SkillType>,
    tags: Option<Vec<String>>,
    resources: Option<Vec<String>>,
}

/// Just the `version` key, read as the scalar's source text.
#[derive(Debug, Default, Deserialize)]
struct RawVersion {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolList {
    List(Vec<String>),
    Inline(String),
}

impl ToolList {
    fn into_names(self) -> Vec<String> {
        let raw = match self {
            Self::List(items) => items,
            Self::Inline(text) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(str::to_string)
                .collect(),
        };
        raw.into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct RenderedFrontmatter<'a> {
    name: &'a str,
    description: &'a str,
    category: &'a str,
    #[serde(skip_serializing_if = "is_empty_slice")]
    tools: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    skill_type: Option<SkillType>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resources: Vec<String>,
}

fn is_empty_slice(items: &&[String]) -> bool {
    items.is_empty()
}

pub struct DescriptorParser;

impl DescriptorParser {
    /// Parse descriptor text into metadata, instructions, and resource refs.
    pub fn parse_str(content: &str, source: &Path) -> Result<ParsedDescriptor> {
        let location = source.display().to_string();
        let (frontmatter, body) = split_frontmatter(content, &location)?;

        let fm = parse_frontmatter(frontmatter, &location)?;

        let name = required(fm.name, "name", &location)?;
        let description = required(fm.description, "description", &location)?;
        let category = fm
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let declared_resources: Vec<PathBuf> = fm
            .resources
            .unwrap_or_default()
            .iter()
            .filter_map(|raw| normalize_relative(raw))
            .collect();
        let mut resources = declared_resources.clone();
        for link in body_links(body) {
            if !resources.contains(&link) {
                resources.push(link);
            }
        }

        let metadata = SkillMetadata {
            name,
            description,
            category,
            source_path: source.to_path_buf(),
            tools: fm.tools.map(ToolList::into_names).unwrap_or_default(),
            version: raw_version(frontmatter)
                .or_else(|| fm.version.as_ref().and_then(scalar_to_string)),
            author: optional(fm.author),
            license: optional(fm.license),
            skill_type: fm.skill_type,
            tags: fm
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        };

        Ok(ParsedDescriptor {
            metadata,
            instructions: body.to_string(),
            declared_resources,
            resources,
        })
    }

    /// Read and parse a descriptor file.
    pub fn parse_path(path: &Path) -> Result<ParsedDescriptor> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            SkillsError::malformed(path.display().to_string(), format!("read descriptor: {err}"))
        })?;
        Self::parse_str(&content, path)
    }

    /// Serialize a parsed descriptor back into descriptor text.
    pub fn render(parsed: &ParsedDescriptor) -> Result<String> {
        let meta = &parsed.metadata;
        let frontmatter = RenderedFrontmatter {
            name: &meta.name,
            description: &meta.description,
            category: &meta.category,
            tools: &meta.tools,
            version: meta.version.as_deref(),
            author: meta.author.as_deref(),
            license: meta.license.as_deref(),
            skill_type: meta.skill_type,
            tags: &meta.tags,
            resources: parsed
                .declared_resources
                .iter()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .collect(),
        };
        let yaml = serde_yaml::to_string(&frontmatter).map_err(|err| {
            SkillsError::malformed(meta.source_path.display().to_string(), format!("render frontmatter: {err}"))
        })?;

        let mut out = String::with_capacity(yaml.len() + parsed.instructions.len() + 8);
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&parsed.instructions);
        Ok(out)
    }
}

/// Split text into the frontmatter block and the verbatim body.
fn split_frontmatter<'a>(content: &'a str, location: &str) -> Result<(&'a str, &'a str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.trim_start_matches(['\n', '\r']);

    let mut lines = content.split_inclusive('\n');
    let first = lines.next().unwrap_or_default();
    if first.trim_end() != FENCE {
        return Err(SkillsError::malformed(location, "missing frontmatter fence"));
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Ok((&content[start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(SkillsError::malformed(location, "unterminated frontmatter block"))
}

fn parse_frontmatter(block: &str, location: &str) -> Result<Frontmatter> {
    let value: serde_yaml::Value = serde_yaml::from_str(block).map_err(|err| {
        SkillsError::malformed(location, format!("frontmatter is not valid YAML: {err}"))
    })?;
    match value {
        serde_yaml::Value::Null => Ok(Frontmatter::default()),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value).map_err(|err| {
            SkillsError::malformed(location, format!("invalid frontmatter field: {err}"))
        }),
        _ => Err(SkillsError::malformed(
            location,
            "frontmatter is not a block of key-value pairs",
        )),
    }
}

fn required(value: Option<String>, field: &'static str, location: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SkillsError::MissingRequiredField {
            location: location.to_string(),
            field,
        })
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Source text of `version`, so `1.10` stays "1.10" instead of the float 1.1.
fn raw_version(frontmatter: &str) -> Option<String> {
    serde_yaml::from_str::<RawVersion>(frontmatter)
        .ok()
        .and_then(|raw| optional(raw.version))
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => optional(Some(s.clone())),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn body_links(body: &str) -> Vec<PathBuf> {
    LINK_TARGET
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| normalize_relative(m.as_str()))
        .collect()
}

/// Normalize a bundle-relative reference. Absolute paths, URLs, anchors and
/// anything escaping the bundle are rejected.
fn normalize_relative(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') || raw.starts_with('/') || raw.contains("://") {
        return None;
    }
    if raw.starts_with("mailto:") {
        return None;
    }
    let raw = raw.split(['#', '?']).next().unwrap_or_default();

    let mut out = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if out.as_os_str().is_empty() { None } else { Some(out) }
}
