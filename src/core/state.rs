//! Execution state models

use crate::core::step::StepKind;
use chrono::{DateTime, Utc};

/// Overall release run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Run has not started
    Pending,
    /// Run is in progress
    Running,
    /// Every step completed or was skipped
    Completed,
    /// A step failed and the run stopped
    Failed,
}

/// State of a single step
#[derive(Debug, Clone, PartialEq)]
pub enum StepState {
    /// Not reached yet
    Pending,
    /// External action in flight
    Running {
        started_at: DateTime<Utc>,
    },
    /// Step completed successfully
    Completed {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Step was skipped by configuration
    Skipped {
        reason: String,
    },
    /// Step failed; the run stopped here
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

/// Mutable state threaded through one release run
#[derive(Debug, Clone)]
pub struct RunState {
    pub status: ExecutionStatus,

    /// Index of the step being executed
    pub current_step: usize,

    /// Version before the run
    pub old_version: String,

    /// Version after the bump; `None` until the bump step succeeds
    pub new_version: Option<String>,

    /// Per-step state, in release order
    pub steps: Vec<(StepKind, StepState)>,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunState {
    pub fn new(old_version: impl Into<String>, kinds: &[StepKind]) -> Self {
        Self {
            status: ExecutionStatus::Pending,
            current_step: 0,
            old_version: old_version.into(),
            new_version: None,
            steps: kinds.iter().map(|k| (*k, StepState::Pending)).collect(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn start(&mut self) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    pub fn fail(&mut self) {
        self.status = ExecutionStatus::Failed;
        self.finished_at = Some(Utc::now());
    }

    /// State of a step
    pub fn step_state(&self, kind: StepKind) -> Option<&StepState> {
        self.steps.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }

    pub fn set_step_state(&mut self, kind: StepKind, state: StepState) {
        if let Some((_, slot)) = self.steps.iter_mut().find(|(k, _)| *k == kind) {
            *slot = state;
        }
    }

    /// Steps whose external action ran to success
    pub fn completed_steps(&self) -> Vec<StepKind> {
        self.steps
            .iter()
            .filter(|(_, s)| matches!(s, StepState::Completed { .. }))
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.status == ExecutionStatus::Completed
    }

    pub fn has_failed(&self) -> bool {
        self.status == ExecutionStatus::Failed
    }

    /// Wall-clock duration of a finished run
    pub fn duration(&self) -> Option<std::time::Duration> {
        let (start, end) = (self.started_at?, self.finished_at?);
        end.signed_duration_since(start).to_std().ok()
    }
}
