//! Test utility functions for release scenarios
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use test_tag_publish::core::{
    manifest::MANIFEST_FILE, ReleaseConfig, ReleaseError, ReleaseOptions, RunState, StepKind,
    StepState,
};
use test_tag_publish::execution::{ExecutionEvent, ReleaseEngine};
use test_tag_publish::runner::{CommandOutcome, CommandRunner, CommandSpec, RunnerError};

/// Spy runner: records every command instead of spawning it.
///
/// Commands whose line starts with a registered prefix exit with code 1.
/// `npm ... version <specifier>` rewrites package.json the way npm would.
#[derive(Clone, Default)]
pub struct SpyRunner {
    commands: Arc<Mutex<Vec<CommandSpec>>>,
    failing: Arc<Vec<String>>,
}

impl SpyRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every command whose line starts with one of `prefixes`
    pub fn failing(prefixes: &[&str]) -> Self {
        Self {
            commands: Arc::default(),
            failing: Arc::new(prefixes.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(CommandSpec::command_line)
            .collect()
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().unwrap().clone()
    }

    pub fn invoked(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|line| line.starts_with(prefix))
    }
}

#[async_trait]
impl CommandRunner for SpyRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutcome, RunnerError> {
        self.commands.lock().unwrap().push(command.clone());

        let line = command.command_line();
        if self.failing.iter().any(|prefix| line.starts_with(prefix.as_str())) {
            return Ok(CommandOutcome::from_code(1));
        }

        if command.program == "npm" && command.args.iter().any(|a| a == "version") {
            let specifier = command.args.last().cloned().unwrap_or_default();
            let dir = command.cwd.clone().expect("commands run in the project dir");
            if npm_version(&dir, &specifier).is_err() {
                return Ok(CommandOutcome::from_code(1));
            }
        }

        Ok(CommandOutcome::from_code(0))
    }
}

/// Minimal stand-in for `npm version <specifier>`
fn npm_version(dir: &Path, specifier: &str) -> Result<(), String> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    let mut manifest: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| e.to_string())?;

    let current = manifest["version"].as_str().ok_or("no version")?;
    let mut version = semver::Version::parse(current).map_err(|e| e.to_string())?;
    match specifier {
        "major" => {
            version.major += 1;
            version.minor = 0;
            version.patch = 0;
        }
        "minor" => {
            version.minor += 1;
            version.patch = 0;
        }
        "patch" => version.patch += 1,
        explicit => version = semver::Version::parse(explicit).map_err(|e| e.to_string())?,
    }
    version.pre = semver::Prerelease::EMPTY;

    manifest["version"] = serde_json::Value::String(version.to_string());
    let rendered = serde_json::to_string_pretty(&manifest).map_err(|e| e.to_string())?;
    std::fs::write(&path, rendered).map_err(|e| e.to_string())
}

/// A throwaway npm project
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    /// Project at `version` with a declared test script
    pub fn new(version: &str) -> Self {
        Self::with_manifest(&format!(
            r#"{{"name": "demo", "version": "{}", "scripts": {{"test": "mocha"}}}}"#,
            version
        ))
    }

    /// Project at `version` without a test script
    pub fn without_tests(version: &str) -> Self {
        Self::with_manifest(&format!(r#"{{"name": "demo", "version": "{}"}}"#, version))
    }

    pub fn with_manifest(manifest: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), manifest).unwrap();
        Self { dir }
    }

    pub fn with_lockfile(self) -> Self {
        std::fs::write(self.dir.path().join("package-lock.json"), "{}").unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Version currently on disk
    pub fn version(&self) -> String {
        let content = std::fs::read_to_string(self.path().join(MANIFEST_FILE)).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&content).unwrap();
        manifest["version"].as_str().unwrap().to_string()
    }
}

/// Options for a release with the given specifier and default flags
pub fn options(specifier: &str) -> ReleaseOptions {
    ReleaseOptions {
        specifier: Some(specifier.to_string()),
        ..Default::default()
    }
}

/// Outcome of a release run in tests
pub struct ReleaseTestResult {
    pub result: Result<(), ReleaseError>,
    pub state: Option<RunState>,
    pub events: Vec<ExecutionEvent>,
}

impl ReleaseTestResult {
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && self.state.as_ref().is_some_and(RunState::is_complete)
    }

    pub fn exit_code(&self) -> i32 {
        match &self.result {
            Ok(()) => 0,
            Err(err) => err.exit_code(),
        }
    }

    pub fn error(&self) -> &ReleaseError {
        self.result.as_ref().expect_err("release should have failed")
    }

    pub fn state(&self) -> &RunState {
        self.state.as_ref().expect("release never started")
    }

    pub fn step_state(&self, kind: StepKind) -> &StepState {
        self.state()
            .step_state(kind)
            .unwrap_or_else(|| panic!("Step {:?} not found in result", kind))
    }

    /// Steps that actually ran an action, in order
    pub fn started_steps(&self) -> Vec<StepKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::StepStarted { step, .. } => Some(*step),
                _ => None,
            })
            .collect()
    }
}

/// Resolve configuration and run a release against the spy runner
pub async fn run_release(
    project: &TestProject,
    options: ReleaseOptions,
    runner: SpyRunner,
) -> ReleaseTestResult {
    let config = match ReleaseConfig::resolve(options, project.path()) {
        Ok(config) => config,
        Err(err) => {
            return ReleaseTestResult {
                result: Err(err.into()),
                state: None,
                events: Vec::new(),
            }
        }
    };

    let mut engine = ReleaseEngine::new(runner);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    engine.add_event_handler(move |event| sink.lock().unwrap().push(event.clone()));

    let mut state = RunState::new(&config.old_version, &StepKind::ALL);
    let result = engine.execute(&config, &mut state).await;
    let events = events.lock().unwrap().clone();

    ReleaseTestResult {
        result,
        state: Some(state),
        events,
    }
}

/// Assert a step ran to completion
pub fn assert_step_completed(result: &ReleaseTestResult, kind: StepKind) {
    let state = result.step_state(kind);
    assert!(
        matches!(state, StepState::Completed { .. }),
        "Step {:?} should be completed, but was in state: {:?}",
        kind,
        state
    );
}

/// Assert a step was skipped by configuration
pub fn assert_step_skipped(result: &ReleaseTestResult, kind: StepKind) {
    let state = result.step_state(kind);
    assert!(
        matches!(state, StepState::Skipped { .. }),
        "Step {:?} should be skipped, but was in state: {:?}",
        kind,
        state
    );
}

/// Assert a step failed with a message containing `expected_error`
pub fn assert_step_failed(result: &ReleaseTestResult, kind: StepKind, expected_error: &str) {
    match result.step_state(kind) {
        StepState::Failed { error, .. } => assert!(
            error.contains(expected_error),
            "Step {:?} error:\n{}\n\ndoes not contain:\n{}",
            kind,
            error,
            expected_error
        ),
        other => panic!("Step {:?} should have failed, but was in state: {:?}", kind, other),
    }
}

/// Assert every step after `kind` was never reached
pub fn assert_nothing_after(result: &ReleaseTestResult, kind: StepKind) {
    let after = StepKind::ALL.iter().skip_while(|k| **k != kind).skip(1);
    for later in after {
        assert_eq!(
            result.step_state(*later),
            &StepState::Pending,
            "Step {:?} should not have run after {:?}",
            later,
            kind
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spy_bumps_like_npm() {
        let project = TestProject::new("1.2.3");
        npm_version(project.path(), "minor").unwrap();
        assert_eq!(project.version(), "1.3.0");
        npm_version(project.path(), "major").unwrap();
        assert_eq!(project.version(), "2.0.0");
        npm_version(project.path(), "4.5.6").unwrap();
        assert_eq!(project.version(), "4.5.6");
    }
}
