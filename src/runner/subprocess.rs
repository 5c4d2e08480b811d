//! Shell subprocess runner - streams output straight to the terminal

use crate::runner::{CommandOutcome, CommandRunner, CommandSpec, RunnerError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs commands through the platform shell with inherited stdio.
///
/// Going through the shell lets quoted message arguments reach git as a
/// single argument.
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(spec: &CommandSpec) -> Command {
        let line = spec.command_line();

        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        };

        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        };

        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, RunnerError> {
        debug!("Spawning: {}", spec);

        let status = Self::shell_command(spec)
            .status()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        let outcome = CommandOutcome {
            code: status.code(),
        };
        if !outcome.success() {
            debug!("'{}' exited with {:?}", spec, outcome.code);
        }
        Ok(outcome)
    }
}
