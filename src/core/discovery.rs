//! Discovery scanner.
//!
//! Walks the configured source paths in order and yields every skill bundle
//! whose descriptor parses. Scan order is significant: the index resolves
//! duplicate names by keeping the last one scanned.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::parser::DescriptorParser;
use super::skill::SkillMetadata;

/// Descriptor file name expected at the root of every bundle.
pub const DEFAULT_DESCRIPTOR: &str = "SKILL.md";

/// A bundle whose descriptor parsed during the scan.
#[derive(Debug, Clone)]
pub struct DiscoveredSkill {
    pub metadata: SkillMetadata,
    /// Character length of the instructions body, for upfront-cost accounting.
    pub instructions_chars: usize,
}

/// A bundle that was found but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryError {
    /// Folder name of the bundle.
    pub bundle: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    /// Parsed bundles in source order, then directory order.
    pub skills: Vec<DiscoveredSkill>,
    pub errors: Vec<DiscoveryError>,
    /// Configured sources that did not exist at scan time.
    pub missing_sources: Vec<PathBuf>,
}

#[derive(Debug, Default)]
struct SourceScan {
    skills: Vec<DiscoveredSkill>,
    errors: Vec<DiscoveryError>,
    missing: bool,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    sources: Vec<PathBuf>,
    descriptor: String,
}

impl Scanner {
    #[must_use]
    pub fn new(sources: Vec<PathBuf>, descriptor: impl Into<String>) -> Self {
        Self {
            sources,
            descriptor: descriptor.into(),
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Scan every source. Sources are read in parallel and reassembled in
    /// configured order.
    #[must_use]
    pub fn scan(&self) -> ScanReport {
        let per_source: Vec<SourceScan> = self
            .sources
            .par_iter()
            .map(|source| self.scan_source(source))
            .collect();

        let mut report = ScanReport::default();
        for (source, scan) in self.sources.iter().zip(per_source) {
            if scan.missing {
                report.missing_sources.push(source.clone());
            }
            report.skills.extend(scan.skills);
            report.errors.extend(scan.errors);
        }

        debug!(
            sources = self.sources.len(),
            skills = report.skills.len(),
            errors = report.errors.len(),
            "scan complete"
        );
        report
    }

    fn scan_source(&self, source: &Path) -> SourceScan {
        if !source.exists() {
            debug!(source = %source.display(), "skill source does not exist, skipping");
            return SourceScan {
                missing: true,
                ..SourceScan::default()
            };
        }

        let mut scan = SourceScan::default();
        for bundle in self.candidates(source) {
            let descriptor = bundle.join(&self.descriptor);
            if !descriptor.is_file() {
                debug!(bundle = %bundle.display(), "no descriptor, skipping");
                continue;
            }
            match DescriptorParser::parse_path(&descriptor) {
                Ok(parsed) => {
                    debug!(skill = %parsed.metadata.name, path = %descriptor.display(), "discovered skill");
                    scan.skills.push(DiscoveredSkill {
                        instructions_chars: parsed.instructions.chars().count(),
                        metadata: parsed.metadata,
                    });
                }
                Err(err) => {
                    let bundle_name = bundle
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| bundle.display().to_string());
                    warn!(bundle = %bundle_name, error = %err, "skipping unparseable skill");
                    scan.errors.push(DiscoveryError {
                        bundle: bundle_name,
                        path: descriptor,
                        reason: err.to_string(),
                    });
                }
            }
        }
        scan
    }

    /// Bundle directories under one source, in stable enumeration order.
    fn candidates(&self, source: &Path) -> Vec<PathBuf> {
        if source.is_file() {
            let is_descriptor = source
                .file_name()
                .is_some_and(|name| name == self.descriptor.as_str());
            return match source.parent() {
                Some(parent) if is_descriptor => vec![parent.to_path_buf()],
                _ => {
                    debug!(source = %source.display(), "source file is not a descriptor");
                    Vec::new()
                }
            };
        }

        if source.join(&self.descriptor).is_file() {
            return vec![source.to_path_buf()];
        }

        WalkDir::new(source)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(source = %source.display(), error = %err, "unreadable entry in skill source");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}
