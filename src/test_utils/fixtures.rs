use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::discovery::DEFAULT_DESCRIPTOR;

/// Isolated filesystem for building skill bundles in tests.
pub struct SkillFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for SkillFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file under the fixture root, creating parent folders.
    pub fn create_file(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `<source>/<bundle>/SKILL.md` and return its path.
    pub fn create_bundle(&self, source: &str, bundle: &str, content: &str) -> PathBuf {
        self.create_file(&format!("{source}/{bundle}/{DEFAULT_DESCRIPTOR}"), content)
    }

    /// Write a minimal valid skill whose folder matches its name.
    pub fn create_skill(&self, source: &str, name: &str, description: &str) -> PathBuf {
        self.create_bundle(source, name, &descriptor(name, description, &[], ""))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Descriptor text with optional tools and body.
#[must_use]
pub fn descriptor(name: &str, description: &str, tools: &[&str], body: &str) -> String {
    let mut out = format!("---\nname: {name}\ndescription: {description}\n");
    if !tools.is_empty() {
        out.push_str("tools:\n");
        for tool in tools {
            out.push_str("  - ");
            out.push_str(tool);
            out.push('\n');
        }
    }
    out.push_str("---\n");
    out.push_str(body);
    out
}
