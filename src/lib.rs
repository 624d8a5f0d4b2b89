//! skilldex - progressive-disclosure skill discovery for AI agents.
//!
//! Skills are folders holding a `SKILL.md` descriptor. The
//! [`SkillsClient`] indexes their metadata up front and reads full
//! instructions only when a skill is loaded, tracking how many context
//! tokens that saves.

pub mod adapter;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod test_utils;

pub use adapter::{SkillProvider, ToolSpec};
pub use client::{ClientConfig, SkillMatch, SkillsClient};
pub use error::{Result, SkillsError};
