//! Release configuration resolved from command-line options and package.json

use crate::core::{
    error::ConfigError,
    manifest::Manifest,
    message::MessageTemplate,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw options as supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Version specifier forwarded to `npm version`
    pub specifier: Option<String>,

    /// Commit message template
    pub message: Option<String>,

    /// Tag message template (falls back to the commit template)
    pub tag: Option<String>,

    /// Skip the uncommitted-changes check
    pub force: bool,

    /// Skip the test step
    pub no_test: bool,
}

/// Immutable configuration for one release run
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub specifier: String,
    pub commit_message: MessageTemplate,
    pub tag_message: MessageTemplate,
    pub force: bool,
    pub no_test: bool,

    /// Directory holding package.json; every command runs here
    pub project_dir: PathBuf,

    /// Version read from the manifest before the run
    pub old_version: String,

    /// Whether the manifest declared a test script at startup
    pub has_test_script: bool,
}

impl ReleaseConfig {
    /// Resolve options against the manifest in `project_dir`.
    ///
    /// The manifest is checked first so a missing package.json is reported
    /// even when no specifier was given.
    pub fn resolve(options: ReleaseOptions, project_dir: &Path) -> Result<Self, ConfigError> {
        let manifest = Manifest::load(project_dir)?;
        let old_version = manifest
            .version()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingVersion {
                path: Manifest::path_in(project_dir),
            })?;

        let specifier = options
            .specifier
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSpecifier)?;

        let commit_message = options
            .message
            .map(MessageTemplate::new)
            .unwrap_or_default();
        let tag_message = options
            .tag
            .map(MessageTemplate::new)
            .unwrap_or_else(|| commit_message.clone());

        debug!(
            "Resolved release config: {} -> {} (force={}, no_test={})",
            old_version, specifier, options.force, options.no_test
        );

        Ok(Self {
            specifier,
            commit_message,
            tag_message,
            force: options.force,
            no_test: options.no_test,
            project_dir: project_dir.to_path_buf(),
            old_version,
            has_test_script: manifest.has_test_script(),
        })
    }
}
