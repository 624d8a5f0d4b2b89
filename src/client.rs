//! Progressive-disclosure client.
//!
//! The client is the only entry point agents and adapters use. Listing and
//! search touch metadata only; full instructions are read the first time a
//! skill is loaded. Every operation is charged to a [`UsageTracker`] so
//! callers can see how much context was saved versus loading everything.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::core::discovery::{DEFAULT_DESCRIPTOR, Scanner};
use crate::core::index::{IndexDiagnostics, SkillIndex};
use crate::core::search::{self, MatchTier, SearchQuery};
use crate::core::skill::{SkillContent, SkillMetadata};
use crate::core::tokens::{DEFAULT_CHARS_PER_TOKEN, TokenEstimator};
use crate::core::usage::{OperationKind, UsageStats, UsageTracker};
use crate::core::validation::{self, ValidationWarning};
use crate::error::{Result, SkillsError};

/// Engine settings for a [`SkillsClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Sources scanned in order. Later sources win name collisions.
    pub sources: Vec<PathBuf>,
    /// Build the index at construction instead of on first access.
    pub eager: bool,
    pub descriptor: String,
    pub chars_per_token: usize,
}

impl ClientConfig {
    #[must_use]
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            eager: true,
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }

    #[must_use]
    pub const fn eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    #[must_use]
    pub fn descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = descriptor.into();
        self
    }

    #[must_use]
    pub const fn chars_per_token(mut self, chars_per_token: usize) -> Self {
        self.chars_per_token = chars_per_token;
        self
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.skill_paths())
            .eager(config.discovery.eager)
            .descriptor(config.discovery.descriptor.clone())
            .chars_per_token(config.tokens.chars_per_token)
    }
}

/// A search result with the field tier that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillMatch {
    pub metadata: SkillMetadata,
    /// `None` when the query text was blank.
    pub tier: Option<MatchTier>,
}

#[derive(Debug)]
pub struct SkillsClient {
    index: RwLock<SkillIndex>,
    estimator: TokenEstimator,
    usage: Mutex<UsageTracker>,
}

impl SkillsClient {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let scanner = Scanner::new(config.sources, config.descriptor);
        let mut index = SkillIndex::new(scanner);
        if config.eager {
            index.rebuild();
        }
        Self {
            index: RwLock::new(index),
            estimator: TokenEstimator::new(config.chars_per_token),
            usage: Mutex::new(UsageTracker::new()),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ClientConfig::from(config))
    }

    #[must_use]
    pub const fn estimator(&self) -> TokenEstimator {
        self.estimator
    }

    fn ensure_built(&self) {
        if self.index.read().is_built() {
            return;
        }
        let mut index = self.index.write();
        if !index.is_built() {
            debug!("building skill index on first access");
            index.rebuild();
        }
    }

    /// Rescan every source, dropping cached content. Usage stats are kept.
    pub fn rebuild(&self) -> IndexDiagnostics {
        self.index.write().rebuild()
    }

    /// Metadata for every indexed skill, in discovery order.
    pub fn discover_metadata(&self) -> Vec<SkillMetadata> {
        self.ensure_built();
        let skills: Vec<SkillMetadata> = self.index.read().iter().cloned().collect();
        self.charge_listing(OperationKind::List, skills.iter());
        skills
    }

    pub fn search_skills(&self, query: &str) -> Vec<SkillMetadata> {
        self.search(&SearchQuery::text(query))
            .into_iter()
            .map(|hit| hit.metadata)
            .collect()
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<SkillMatch> {
        self.ensure_built();
        let index = self.index.read();
        let hits: Vec<SkillMatch> = search::rank(index.iter(), query)
            .into_iter()
            .map(|hit| SkillMatch {
                metadata: hit.metadata.clone(),
                tier: hit.tier,
            })
            .collect();
        drop(index);
        debug!(query = %query.text, hits = hits.len(), "searched skills");
        self.charge_listing(OperationKind::Search, hits.iter().map(|hit| &hit.metadata));
        hits
    }

    /// Full content for `name`. The first call reads the descriptor from
    /// disk; later calls return the cached value.
    pub fn load_skill(&self, name: &str) -> Result<Arc<SkillContent>> {
        self.ensure_built();
        let content = self.index.read().get_content(name)?;
        let tokens = self.estimator.estimate(&content.instructions);
        self.usage.lock().record_load(name, tokens);
        debug!(skill = name, tokens, "loaded skill");
        Ok(content)
    }

    pub fn get_instructions(&self, name: &str) -> Result<String> {
        self.load_skill(name)
            .map(|content| content.instructions.clone())
    }

    /// Declared tools, read from metadata without loading the skill.
    pub fn get_tool_names(&self, name: &str) -> Result<Vec<String>> {
        self.ensure_built();
        self.index
            .read()
            .get_metadata(name)
            .map(|meta| meta.tools.clone())
    }

    pub fn get_metadata(&self, name: &str) -> Result<SkillMetadata> {
        self.ensure_built();
        self.index.read().get_metadata(name).cloned()
    }

    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.index.read().is_loaded(name)
    }

    /// Usage so far, compared against the cost of loading every indexed
    /// skill's instructions up front.
    pub fn get_token_usage_stats(&self) -> UsageStats {
        let index = self.index.read();
        let upfront: u64 = index
            .instruction_lengths()
            .map(|(_, chars)| self.estimator.estimate_chars(chars))
            .sum();
        drop(index);
        self.usage.lock().snapshot(upfront)
    }

    pub fn diagnostics(&self) -> IndexDiagnostics {
        self.index.read().diagnostics()
    }

    /// Convention warnings for one skill. Not charged as a load.
    pub fn validate_skill(&self, name: &str) -> Result<Vec<ValidationWarning>> {
        self.ensure_built();
        let content = self.index.read().get_content(name)?;
        Ok(validation::validate(&content))
    }

    /// Bytes of a resource listed for `name`, addressed relative to the
    /// bundle. Paths that are not listed or that escape the bundle are
    /// reported as missing.
    pub fn read_resource(&self, name: &str, relative: impl AsRef<Path>) -> Result<Vec<u8>> {
        let relative = relative.as_ref();
        self.ensure_built();
        let content = self.index.read().get_content(name)?;
        let not_found = || SkillsError::ResourceNotFound {
            skill: name.to_string(),
            resource: relative.display().to_string(),
        };

        let normalized = normalize_relative(relative).ok_or_else(not_found)?;
        if !content.has_resource(&normalized) {
            return Err(not_found());
        }

        let bundle = content
            .metadata
            .bundle_dir()
            .canonicalize()
            .map_err(|_| not_found())?;
        let target = bundle
            .join(&normalized)
            .canonicalize()
            .map_err(|_| not_found())?;
        if !target.starts_with(&bundle) || !target.is_file() {
            return Err(not_found());
        }
        Ok(std::fs::read(target)?)
    }

    fn charge_listing<'a>(&self, kind: OperationKind, skills: impl Iterator<Item = &'a SkillMetadata>) {
        let tokens: u64 = skills
            .map(|meta| self.estimator.estimate(&meta.listing_text()))
            .sum();
        self.usage.lock().record(kind, tokens);
    }
}

/// Strip `.` components; reject absolute paths and `..`.
fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!out.as_os_str().is_empty()).then_some(out)
}
