//! Skill index: the authoritative name → skill mapping.
//!
//! Metadata for every skill is resident once the index is built. Full content
//! is materialized lazily, at most once per name per index lifetime, behind a
//! per-entry load state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SkillsError};

use super::discovery::{DiscoveryError, Scanner};
use super::parser::DescriptorParser;
use super::skill::{SkillContent, SkillMetadata};

/// Bundle folders whose files are listed as resources of a skill.
pub const RESOURCE_DIRS: [&str; 3] = ["scripts", "references", "assets"];

#[derive(Debug)]
enum LoadState {
    Unloaded,
    Loading,
    Loaded(Arc<SkillContent>),
}

#[derive(Debug)]
struct IndexEntry {
    metadata: SkillMetadata,
    instructions_chars: usize,
    state: Mutex<LoadState>,
    ready: Condvar,
}

/// A duplicate name seen during a rebuild. The later bundle wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub name: String,
    pub replaced: PathBuf,
    pub winner: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexDiagnostics {
    pub built: bool,
    pub built_at: Option<DateTime<Utc>>,
    pub sources: Vec<PathBuf>,
    pub missing_sources: Vec<PathBuf>,
    pub skills: usize,
    pub collision_count: usize,
    pub collisions: Vec<Collision>,
    pub discovery_errors: Vec<DiscoveryError>,
    pub materialized: usize,
}

#[derive(Debug)]
pub struct SkillIndex {
    scanner: Scanner,
    entries: Vec<IndexEntry>,
    positions: HashMap<String, usize>,
    collisions: Vec<Collision>,
    discovery_errors: Vec<DiscoveryError>,
    missing_sources: Vec<PathBuf>,
    built_at: Option<DateTime<Utc>>,
    materializations: AtomicUsize,
}

impl SkillIndex {
    #[must_use]
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            entries: Vec::new(),
            positions: HashMap::new(),
            collisions: Vec::new(),
            discovery_errors: Vec::new(),
            missing_sources: Vec::new(),
            built_at: None,
            materializations: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.built_at.is_some()
    }

    /// Drop all state, rescan, and insert results in scan order.
    pub fn rebuild(&mut self) -> IndexDiagnostics {
        let report = self.scanner.scan();

        let mut winners: HashMap<&str, usize> = HashMap::with_capacity(report.skills.len());
        let mut collisions = Vec::new();
        for (pos, skill) in report.skills.iter().enumerate() {
            let name = skill.metadata.name.as_str();
            if let Some(prev) = winners.insert(name, pos) {
                let replaced = &report.skills[prev].metadata.source_path;
                warn!(
                    skill = name,
                    replaced = %replaced.display(),
                    winner = %skill.metadata.source_path.display(),
                    "duplicate skill name, keeping the later one"
                );
                collisions.push(Collision {
                    name: name.to_string(),
                    replaced: replaced.clone(),
                    winner: skill.metadata.source_path.clone(),
                });
            }
        }
        let keep: Vec<bool> = report
            .skills
            .iter()
            .enumerate()
            .map(|(pos, skill)| winners.get(skill.metadata.name.as_str()) == Some(&pos))
            .collect();
        drop(winners);

        self.entries = report
            .skills
            .into_iter()
            .zip(keep)
            .filter_map(|(skill, keep)| keep.then_some(skill))
            .map(|skill| IndexEntry {
                metadata: skill.metadata,
                instructions_chars: skill.instructions_chars,
                state: Mutex::new(LoadState::Unloaded),
                ready: Condvar::new(),
            })
            .collect();
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.metadata.name.clone(), pos))
            .collect();
        self.collisions = collisions;
        self.discovery_errors = report.errors;
        self.missing_sources = report.missing_sources;
        self.materializations = AtomicUsize::new(0);
        self.built_at = Some(Utc::now());

        info!(
            skills = self.len(),
            collisions = self.collisions.len(),
            errors = self.discovery_errors.len(),
            "skill index rebuilt"
        );
        self.diagnostics()
    }

    /// Indexed metadata in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillMetadata> {
        self.entries.iter().map(|entry| &entry.metadata)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_metadata(&self, name: &str) -> Result<&SkillMetadata> {
        self.entry(name).map(|entry| &entry.metadata)
    }

    /// Instruction length of each indexed skill, known from the scan.
    pub fn instruction_lengths(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|entry| (entry.metadata.name.as_str(), entry.instructions_chars))
    }

    /// Full content for `name`, parsed from disk on first request only.
    ///
    /// Concurrent first requests for the same name wait for the single
    /// in-flight parse. A failed parse leaves the entry unloaded.
    pub fn get_content(&self, name: &str) -> Result<Arc<SkillContent>> {
        let entry = self.entry(name)?;

        let mut state = entry.state.lock();
        loop {
            if let LoadState::Loaded(content) = &*state {
                return Ok(Arc::clone(content));
            }
            if matches!(*state, LoadState::Unloaded) {
                break;
            }
            entry.ready.wait(&mut state);
        }
        *state = LoadState::Loading;
        drop(state);

        let result = self.materialize(entry);

        let mut state = entry.state.lock();
        let outcome = match result {
            Ok(content) => {
                let content = Arc::new(content);
                *state = LoadState::Loaded(Arc::clone(&content));
                Ok(content)
            }
            Err(err) => {
                *state = LoadState::Unloaded;
                Err(err)
            }
        };
        drop(state);
        entry.ready.notify_all();
        outcome
    }

    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.entry(name)
            .is_ok_and(|entry| matches!(*entry.state.lock(), LoadState::Loaded(_)))
    }

    #[must_use]
    pub fn diagnostics(&self) -> IndexDiagnostics {
        IndexDiagnostics {
            built: self.is_built(),
            built_at: self.built_at,
            sources: self.scanner.sources().to_vec(),
            missing_sources: self.missing_sources.clone(),
            skills: self.len(),
            collision_count: self.collisions.len(),
            collisions: self.collisions.clone(),
            discovery_errors: self.discovery_errors.clone(),
            materialized: self.materializations.load(Ordering::SeqCst),
        }
    }

    fn entry(&self, name: &str) -> Result<&IndexEntry> {
        self.positions
            .get(name)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| SkillsError::UnknownSkill(name.to_string()))
    }

    fn materialize(&self, entry: &IndexEntry) -> Result<SkillContent> {
        let meta = &entry.metadata;
        debug!(skill = %meta.name, path = %meta.source_path.display(), "materializing skill content");

        let parsed = DescriptorParser::parse_path(&meta.source_path)?;
        if parsed.metadata.name != meta.name {
            return Err(SkillsError::malformed(
                meta.source_path.display().to_string(),
                format!(
                    "declared name changed from `{}` to `{}` since discovery",
                    meta.name, parsed.metadata.name
                ),
            ));
        }

        let mut resources = parsed.resources;
        for found in bundle_resources(meta.bundle_dir()) {
            if !resources.contains(&found) {
                resources.push(found);
            }
        }

        self.materializations.fetch_add(1, Ordering::SeqCst);
        Ok(SkillContent {
            metadata: meta.clone(),
            instructions: parsed.instructions,
            resources,
        })
    }
}

/// Files under the conventional resource folders, relative to the bundle.
fn bundle_resources(bundle: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for dir in RESOURCE_DIRS {
        let root = bundle.join(dir);
        if !root.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            if let Ok(relative) = entry.path().strip_prefix(bundle) {
                found.push(relative.to_path_buf());
            }
        }
    }
    found
}
