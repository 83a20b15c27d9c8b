/// Domain types for the execution pipeline

use crate::domain::error::DomainError;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::lineup::LineupMutation;
use crate::domain::values::transfer::TransferRequest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Execution mode for a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    DryRun,
    Apply,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::DryRun => write!(f, "dry_run"),
            ExecutionMode::Apply => write!(f, "apply"),
        }
    }
}

/// Which half of the two-phase transfer submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStage {
    /// Dry submission; never changes remote state.
    Validation,
    Commit,
}

/// What went wrong at a failed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum FailureCause {
    Remote(String),
    Transport(String),
    StaleSnapshot(String),
    Other(String),
}

impl From<DomainError> for FailureCause {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::RemoteRejected(msg) => FailureCause::Remote(msg),
            DomainError::Transport(msg) => FailureCause::Transport(msg),
            DomainError::StaleSnapshot(msg) => FailureCause::StaleSnapshot(msg),
            other => FailureCause::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCause::Remote(msg) => write!(f, "remote rejected: {msg}"),
            FailureCause::Transport(msg) => write!(f, "transport failure: {msg}"),
            FailureCause::StaleSnapshot(msg) => write!(f, "stale snapshot: {msg}"),
            FailureCause::Other(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ExecutionFailure {
    /// Nothing after the transfer step was attempted.
    TransferRejected {
        stage: TransferStage,
        cause: FailureCause,
    },
    /// The lineup step failed. Committed transfers are not undone.
    LineupRejected {
        transfers_committed: bool,
        cause: FailureCause,
    },
}

/// Coordinator state. Every state other than `Pending` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExecutionState {
    Pending,
    Skipped { reason: String },
    Failed { failure: ExecutionFailure },
    Applied,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionState::Pending)
    }
}

/// Operator-facing classification of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pending,
    Skipped,
    Applied,
    Failed,
    /// Transfers are committed but the lineup was not applied; needs manual follow-up.
    PartialSuccess,
    /// A commit request failed in transit; the remote may or may not have applied it.
    Ambiguous,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pending => write!(f, "pending"),
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Applied => write!(f, "applied"),
            Outcome::Failed => write!(f, "failed"),
            Outcome::PartialSuccess => write!(f, "partial_success"),
            Outcome::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Result of one coordinator invocation
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub gameweek: Gameweek,
    pub state: ExecutionState,
    pub transfers: Vec<TransferRequest>,
    pub transfer_chip: Option<String>,
    pub lineup: Option<LineupMutation>,
}

impl ExecutionReport {
    pub fn new(gameweek: Gameweek) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            gameweek,
            state: ExecutionState::Pending,
            transfers: Vec::new(),
            transfer_chip: None,
            lineup: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match &self.state {
            ExecutionState::Pending => Outcome::Pending,
            ExecutionState::Skipped { .. } => Outcome::Skipped,
            ExecutionState::Applied => Outcome::Applied,
            ExecutionState::Failed { failure } => match failure {
                ExecutionFailure::TransferRejected {
                    stage: TransferStage::Commit,
                    cause: FailureCause::Transport(_),
                } => Outcome::Ambiguous,
                ExecutionFailure::TransferRejected { .. } => Outcome::Failed,
                ExecutionFailure::LineupRejected {
                    transfers_committed: true,
                    ..
                } => Outcome::PartialSuccess,
                ExecutionFailure::LineupRejected { .. } => Outcome::Failed,
            },
        }
    }

    pub fn is_partial_success(&self) -> bool {
        self.outcome() == Outcome::PartialSuccess
    }
}
