//! Step domain model and the fixed release sequence

use crate::core::config::ReleaseConfig;
use std::fmt;

/// The nine release steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    CheckClean,
    Test,
    BumpVersion,
    ResetStaged,
    Stage,
    Commit,
    Tag,
    Push,
    Publish,
}

impl StepKind {
    pub const ALL: [StepKind; 9] = [
        StepKind::CheckClean,
        StepKind::Test,
        StepKind::BumpVersion,
        StepKind::ResetStaged,
        StepKind::Stage,
        StepKind::Commit,
        StepKind::Tag,
        StepKind::Push,
        StepKind::Publish,
    ];

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::CheckClean => "Checking",
            StepKind::Test => "Testing",
            StepKind::BumpVersion => "Updating version",
            StepKind::ResetStaged => "Resetting",
            StepKind::Stage => "Staging",
            StepKind::Commit => "Committing",
            StepKind::Tag => "Tagging",
            StepKind::Push => "Pushing",
            StepKind::Publish => "Publishing",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decides from configuration whether a step is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipPredicate {
    Never,
    /// `-f, --force`
    WhenForced,
    /// `-n, --no-test`
    WhenTestsDisabled,
}

impl SkipPredicate {
    /// The reason the step is skipped, or `None` if it runs
    pub fn evaluate(&self, config: &ReleaseConfig) -> Option<&'static str> {
        match self {
            SkipPredicate::Never => None,
            SkipPredicate::WhenForced if config.force => Some("--force given"),
            SkipPredicate::WhenTestsDisabled if config.no_test => Some("--no-test given"),
            _ => None,
        }
    }
}

/// A single step of the release pipeline
#[derive(Debug, Clone)]
pub struct Step {
    pub kind: StepKind,

    /// Notice printed before the step acts
    pub start_message: &'static str,

    pub skip: SkipPredicate,

    /// Diagnostic printed when the step fails
    pub failure_message: &'static str,
}

impl Step {
    pub fn new(kind: StepKind) -> Self {
        let (start_message, skip, failure_message) = match kind {
            StepKind::CheckClean => (
                "Checking for uncommitted changes...",
                SkipPredicate::WhenForced,
                "There are uncommitted changes in the working tree. To skip this check use -f.",
            ),
            StepKind::Test => ("Testing...", SkipPredicate::WhenTestsDisabled, "Testing failed."),
            StepKind::BumpVersion => (
                "Updating version...",
                SkipPredicate::Never,
                "Updating version failed.",
            ),
            StepKind::ResetStaged => (
                "Resetting staged changes...",
                SkipPredicate::Never,
                "Resetting staged changes failed.",
            ),
            StepKind::Stage => ("Staging...", SkipPredicate::Never, "Staging failed."),
            StepKind::Commit => ("Committing...", SkipPredicate::Never, "Committing failed."),
            StepKind::Tag => ("Tagging...", SkipPredicate::Never, "Tagging failed."),
            StepKind::Push => ("Pushing...", SkipPredicate::Never, "Pushing failed."),
            StepKind::Publish => ("Publishing...", SkipPredicate::Never, "npm publish failed."),
        };

        Self {
            kind,
            start_message,
            skip,
            failure_message,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Evaluate this step's skip predicate
    pub fn skip_reason(&self, config: &ReleaseConfig) -> Option<&'static str> {
        self.skip.evaluate(config)
    }
}

/// Message used when tests are requested but none are declared
pub const MISSING_TEST_SCRIPT: &str =
    "No test script found in package.json. To skip testing use -n.";

/// The release sequence. Order is fixed.
pub fn release_steps() -> Vec<Step> {
    StepKind::ALL.iter().copied().map(Step::new).collect()
}

/// Tag name for a released version
pub fn tag_name(version: &str) -> String {
    format!("v{}", version)
}
