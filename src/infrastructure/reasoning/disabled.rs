use crate::domain::entities::decision::DecisionDraft;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_provider::{DecisionContext, DecisionProvider};
use async_trait::async_trait;

/// Stands in when no reasoning backend is configured. Read-only commands work;
/// anything that needs a decision fails with a config error.
pub struct DisabledProvider;

#[async_trait]
impl DecisionProvider for DisabledProvider {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn propose(&self, _context: &DecisionContext) -> Result<DecisionDraft, DomainError> {
        Err(DomainError::Config(
            "no decision source: set GOOGLE_AI_API_KEY or pass --decision-file".into(),
        ))
    }
}
