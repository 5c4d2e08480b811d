//! Error taxonomy for configuration and release runs

use crate::core::step::StepKind;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit status for every failed run
pub const EXIT_FAILURE: i32 = 1;

/// Errors detected before any step runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No version supplied.")]
    MissingSpecifier,

    #[error("Could not open a package.json. ({}: {source})", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open a package.json. ({}: {source})", .path.display())]
    ManifestInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No version in package.json found.")]
    MissingVersion { path: PathBuf },
}

/// Errors that abort a release run
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// A step's external action reported failure
    #[error("{message}")]
    StepFailed {
        step: StepKind,
        message: String,
        exit_code: Option<i32>,
    },

    /// Tests were requested but the manifest declares no test script
    #[error("{message}")]
    MissingTestScript { message: String },

    /// A step needed the bumped version before it was known
    #[error("The new version is unknown at step '{}'.", .step.label())]
    NewVersionUnknown { step: StepKind },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReleaseError {
    /// The step this error is attributed to, if any
    pub fn step(&self) -> Option<StepKind> {
        match self {
            ReleaseError::StepFailed { step, .. } => Some(*step),
            ReleaseError::MissingTestScript { .. } => Some(StepKind::Test),
            ReleaseError::NewVersionUnknown { step } => Some(*step),
            ReleaseError::Config(_) => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}
