//! test-tag-publish - test, tag and publish an npm package in one command

pub mod cli;
pub mod core;
pub mod execution;
pub mod runner;

// Re-export commonly used types
pub use core::{ReleaseConfig, ReleaseError, ReleaseOptions, RunState, Step, StepKind, StepState};
pub use execution::{ExecutionEvent, ReleaseEngine, StepExecutor};
pub use runner::{CommandOutcome, CommandRunner, CommandSpec, RunnerError, SubprocessRunner};
