//! Error types for skilldex.

use thiserror::Error;

/// Errors produced by discovery, the index, and the disclosure client.
#[derive(Debug, Error)]
pub enum SkillsError {
    #[error("malformed descriptor at {location}: {reason}")]
    MalformedDescriptor { location: String, reason: String },

    #[error("descriptor at {location} is missing required field `{field}`")]
    MissingRequiredField { location: String, field: &'static str },

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    #[error("resource `{resource}` not found in skill `{skill}`")]
    ResourceNotFound { skill: String, resource: String },

    #[error("invalid tool call `{tool}`: {reason}")]
    InvalidToolCall { tool: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SkillsError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedDescriptor { .. } => "malformed_descriptor",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::UnknownSkill(_) => "unknown_skill",
            Self::ResourceNotFound { .. } => "resource_not_found",
            Self::InvalidToolCall { .. } => "invalid_tool_call",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
        }
    }

    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillsError>;
