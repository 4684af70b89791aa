//! Path resolution for a Composer project
//!
//! - `composer.json` at the project root
//! - `<vendor-dir>/composer/installed.json` for the installed package set
//! - the generated map, relative to the project root unless absolute

use std::path::{Path, PathBuf};

pub const COMPOSER_JSON: &str = "composer.json";
pub const INSTALLED_JSON: &str = "installed.json";

#[derive(Debug, Clone)]
pub enum PathError {
    /// The project root does not exist or is not a directory
    ProjectNotFound(PathBuf),
    /// The project has no composer.json
    ComposerJsonMissing(PathBuf),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ProjectNotFound(path) => {
                write!(f, "Project directory not found: {}", path.display())
            }
            PathError::ComposerJsonMissing(path) => {
                write!(f, "No composer.json found at {}", path.display())
            }
        }
    }
}

impl std::error::Error for PathError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub composer_json: PathBuf,
    pub vendor_dir: PathBuf,
    pub installed_json: PathBuf,
    pub output: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(root: &Path, vendor_dir: &str, output: &str) -> Result<Self, PathError> {
        if !root.is_dir() {
            return Err(PathError::ProjectNotFound(root.to_path_buf()));
        }

        let vendor_dir = root.join(vendor_dir);
        Ok(ProjectPaths {
            root: root.to_path_buf(),
            composer_json: root.join(COMPOSER_JSON),
            installed_json: vendor_dir.join("composer").join(INSTALLED_JSON),
            vendor_dir,
            output: root.join(output),
        })
    }

    /// Point the vendor dir (and installed.json with it) somewhere else under the root
    pub fn set_vendor_dir(&mut self, vendor_dir: &str) {
        self.vendor_dir = self.root.join(vendor_dir);
        self.installed_json = self.vendor_dir.join("composer").join(INSTALLED_JSON);
    }

    /// Path to composer.json, or an error if the project does not have one
    pub fn require_composer_json(&self) -> Result<&Path, PathError> {
        if self.composer_json.is_file() {
            Ok(&self.composer_json)
        } else {
            Err(PathError::ComposerJsonMissing(self.root.clone()))
        }
    }
}
