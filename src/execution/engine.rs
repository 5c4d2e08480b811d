//! Release engine - drives the fixed step sequence to completion or first failure

use crate::{
    core::{
        error::ReleaseError,
        state::{RunState, StepState},
        step::{release_steps, Step, StepKind},
        ReleaseConfig,
    },
    execution::StepExecutor,
    runner::{CommandRunner, CommandSpec},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Events that can occur during a release run
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    ReleaseStarted {
        old_version: String,
        specifier: String,
    },
    StepStarted {
        step: StepKind,
        message: String,
    },
    CommandStarted {
        step: StepKind,
        command: CommandSpec,
    },
    StepSkipped {
        step: StepKind,
        reason: String,
    },
    StepCompleted {
        step: StepKind,
        message: String,
    },
    StepFailed {
        step: StepKind,
        error: String,
    },
    ReleaseCompleted {
        new_version: String,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;

/// Runs the release steps in order, stopping at the first failure
pub struct ReleaseEngine<R> {
    executor: StepExecutor<R>,
    steps: Vec<Step>,
    event_handlers: Vec<EventHandler>,
}

impl<R: CommandRunner> ReleaseEngine<R> {
    pub fn new(runner: R) -> Self {
        Self {
            executor: StepExecutor::new(runner),
            steps: release_steps(),
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Execute the whole release.
    ///
    /// On failure the returned error carries the failed step's diagnostic and
    /// `state` shows how far the release got. Nothing is rolled back.
    pub async fn execute(
        &self,
        config: &ReleaseConfig,
        state: &mut RunState,
    ) -> Result<(), ReleaseError> {
        info!(
            "Starting release from {} with specifier {}",
            config.old_version, config.specifier
        );
        self.emit_event(ExecutionEvent::ReleaseStarted {
            old_version: config.old_version.clone(),
            specifier: config.specifier.clone(),
        });
        state.start();

        for (index, step) in self.steps.iter().enumerate() {
            state.current_step = index;

            if let Some(reason) = step.skip_reason(config) {
                info!("Skipping step {}: {}", step.label(), reason);
                state.set_step_state(
                    step.kind,
                    StepState::Skipped {
                        reason: reason.to_string(),
                    },
                );
                self.emit_event(ExecutionEvent::StepSkipped {
                    step: step.kind,
                    reason: reason.to_string(),
                });
                continue;
            }

            self.execute_step(step, config, state).await?;
        }

        state.complete();
        let new_version = state.new_version.clone().unwrap_or_default();
        info!("Release finished at version {}", new_version);
        self.emit_event(ExecutionEvent::ReleaseCompleted { new_version });
        Ok(())
    }

    async fn execute_step(
        &self,
        step: &Step,
        config: &ReleaseConfig,
        state: &mut RunState,
    ) -> Result<(), ReleaseError> {
        let started_at = Utc::now();
        state.set_step_state(step.kind, StepState::Running { started_at });
        self.emit_event(ExecutionEvent::StepStarted {
            step: step.kind,
            message: step.start_message.to_string(),
        });

        let on_command = |command: &CommandSpec| {
            self.emit_event(ExecutionEvent::CommandStarted {
                step: step.kind,
                command: command.clone(),
            });
        };

        match self
            .executor
            .execute(step, config, state, Some(&on_command))
            .await
        {
            Ok(message) => {
                state.set_step_state(
                    step.kind,
                    StepState::Completed {
                        started_at,
                        completed_at: Utc::now(),
                    },
                );
                self.emit_event(ExecutionEvent::StepCompleted {
                    step: step.kind,
                    message,
                });
                Ok(())
            }
            Err(err) => {
                info!("Release aborted at step {}: {}", step.label(), err);
                state.set_step_state(
                    step.kind,
                    StepState::Failed {
                        error: err.to_string(),
                        failed_at: Utc::now(),
                    },
                );
                state.fail();
                self.emit_event(ExecutionEvent::StepFailed {
                    step: step.kind,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
