//! package.json access
//!
//! The manifest is always read fresh from disk. `npm version` rewrites it
//! between the two reads a release performs.

use crate::core::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the project manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Lockfiles staged alongside the manifest when present
pub const LOCKFILES: &[&str] = &["package-lock.json", "npm-shrinkwrap.json"];

/// The subset of package.json a release needs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub scripts: HashMap<String, String>,
}

impl Manifest {
    /// Path of the manifest inside a project directory
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(MANIFEST_FILE)
    }

    /// Read and parse the manifest of a project
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(project_dir);
        debug!("Reading manifest {}", path.display());

        let content = std::fs::read_to_string(&path).map_err(|source| {
            ConfigError::ManifestUnreadable {
                path: path.clone(),
                source,
            }
        })?;

        Self::from_json(&content).map_err(|source| ConfigError::ManifestInvalid { path, source })
    }

    /// Parse manifest JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the manifest and require a non-empty version field
    pub fn load_version(project_dir: &Path) -> Result<String, ConfigError> {
        let manifest = Self::load(project_dir)?;
        manifest
            .version()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingVersion {
                path: Self::path_in(project_dir),
            })
    }

    /// The version field, if present and non-blank
    pub fn version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Whether a `test` script is declared
    pub fn has_test_script(&self) -> bool {
        self.scripts
            .get("test")
            .is_some_and(|script| !script.trim().is_empty())
    }
}

/// Files to stage for the release commit: the manifest plus any lockfile
/// that exists next to it
pub fn release_files(project_dir: &Path) -> Vec<String> {
    let mut files = vec![MANIFEST_FILE.to_string()];
    files.extend(
        LOCKFILES
            .iter()
            .filter(|name| project_dir.join(name).is_file())
            .map(|name| name.to_string()),
    );
    files
}
