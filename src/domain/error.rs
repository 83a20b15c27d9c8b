use crate::domain::values::validation::RejectionReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote rejected: {0}")]
    RemoteRejected(String),

    #[error("Reasoning error: {0}")]
    Reasoning(String),

    /// Planner input no longer matches the snapshot the decision was validated against.
    #[error("Stale snapshot: {0}")]
    StaleSnapshot(String),

    #[error("Decision rejected: {0}")]
    Rejected(RejectionReport),
}

impl DomainError {
    /// True for failures where the remote side may or may not have applied the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, DomainError::Transport(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Parse(e.to_string())
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
