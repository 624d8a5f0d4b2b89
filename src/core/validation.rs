//! Skill validation

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::skill::SkillContent;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid name pattern"));

/// A validation warning (not an error)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

impl ValidationWarning {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Check a loaded skill against the bundle conventions.
///
/// Nothing here rejects a skill; discovery already accepted it.
#[must_use]
pub fn validate(content: &SkillContent) -> Vec<ValidationWarning> {
    let mut warnings = vec![];
    let meta = &content.metadata;

    if meta.name.chars().count() > MAX_NAME_LEN {
        warnings.push(ValidationWarning::new(
            "name",
            format!("name is longer than {MAX_NAME_LEN} characters"),
        ));
    }
    if !NAME_PATTERN.is_match(&meta.name) {
        warnings.push(ValidationWarning::new(
            "name",
            "name should be lowercase letters, digits and single hyphens",
        ));
    }

    if meta.description.chars().count() > MAX_DESCRIPTION_LEN {
        warnings.push(ValidationWarning::new(
            "description",
            format!("description is longer than {MAX_DESCRIPTION_LEN} characters"),
        ));
    }

    if content.instructions.trim().is_empty() {
        warnings.push(ValidationWarning::new(
            "instructions",
            "skill has no instructions body",
        ));
    }

    let bundle = meta.bundle_dir();
    for resource in &content.resources {
        if !bundle.join(resource).is_file() {
            warnings.push(ValidationWarning::new(
                "resources",
                format!("referenced resource {} is missing from the bundle", resource.display()),
            ));
        }
    }

    warnings
}
