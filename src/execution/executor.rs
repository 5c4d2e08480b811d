//! Step executor - performs one release step against the command runner

use crate::{
    core::{
        error::ReleaseError,
        manifest::{release_files, Manifest},
        step::{tag_name, Step, StepKind, MISSING_TEST_SCRIPT},
        ReleaseConfig, RunState,
    },
    runner::{CommandRunner, CommandSpec},
};
use tracing::{debug, info};

/// Notified before each external command is started
pub type CommandCallback<'a> = &'a (dyn Fn(&CommandSpec) + Send + Sync);

/// Executes a single step
pub struct StepExecutor<R> {
    runner: R,
}

impl<R: CommandRunner> StepExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build the command a step runs. Fails only when the step needs the
    /// new version and it is not known yet.
    pub fn command_for(
        &self,
        step: &Step,
        config: &ReleaseConfig,
        state: &RunState,
    ) -> Result<CommandSpec, ReleaseError> {
        let new_version = || {
            state
                .new_version
                .as_deref()
                .ok_or(ReleaseError::NewVersionUnknown { step: step.kind })
        };

        let spec = match step.kind {
            StepKind::CheckClean => CommandSpec::new("git", ["diff", "--quiet"]),
            StepKind::Test => CommandSpec::new("npm", ["test"]),
            StepKind::BumpVersion => CommandSpec::new(
                "npm",
                [
                    "--no-git-tag-version".to_string(),
                    "version".to_string(),
                    config.specifier.clone(),
                ],
            ),
            StepKind::ResetStaged => CommandSpec::new("git", ["reset", "--quiet"]),
            StepKind::Stage => {
                let mut args = vec!["add".to_string()];
                args.extend(release_files(&config.project_dir));
                CommandSpec::new("git", args)
            }
            StepKind::Commit => CommandSpec::new(
                "git",
                [
                    "commit".to_string(),
                    "-m".to_string(),
                    config.commit_message.format(new_version()?),
                ],
            ),
            StepKind::Tag => {
                let version = new_version()?;
                CommandSpec::new(
                    "git",
                    [
                        "tag".to_string(),
                        "-a".to_string(),
                        tag_name(version),
                        "-m".to_string(),
                        config.tag_message.format(version),
                    ],
                )
            }
            StepKind::Push => CommandSpec::new("git", ["push", "--follow-tags"]),
            StepKind::Publish => CommandSpec::new("npm", ["publish"]),
        };

        Ok(spec.current_dir(&config.project_dir))
    }

    /// Execute a step and return its success notice
    pub async fn execute(
        &self,
        step: &Step,
        config: &ReleaseConfig,
        state: &mut RunState,
        on_command: Option<CommandCallback<'_>>,
    ) -> Result<String, ReleaseError> {
        info!("Executing step: {}", step.label());

        if step.kind == StepKind::Test && !config.has_test_script {
            info!("No test script declared; refusing to release untested");
            return Err(ReleaseError::MissingTestScript {
                message: MISSING_TEST_SCRIPT.to_string(),
            });
        }

        let spec = self.command_for(step, config, state)?;
        if let Some(callback) = on_command {
            callback(&spec);
        }

        let failed = |exit_code: Option<i32>| ReleaseError::StepFailed {
            step: step.kind,
            message: step.failure_message.to_string(),
            exit_code,
        };

        let outcome = self.runner.run(&spec).await.map_err(|e| {
            debug!("Step {} could not run: {}", step.label(), e);
            failed(None)
        })?;

        if !outcome.success() {
            debug!("Step {} failed with exit code {:?}", step.label(), outcome.code);
            return Err(failed(outcome.code));
        }

        if step.kind == StepKind::BumpVersion {
            // npm rewrote package.json; the new version is whatever it wrote
            let new_version = Manifest::load_version(&config.project_dir).map_err(|e| {
                debug!("Could not re-read manifest after version bump: {}", e);
                failed(outcome.code)
            })?;
            debug!("Manifest now at version {}", new_version);
            state.new_version = Some(new_version.clone());
            return Ok(format!(
                "Version updated from {} to {}",
                state.old_version, new_version
            ));
        }

        Ok(format!("{} completed.", step.label()))
    }
}
