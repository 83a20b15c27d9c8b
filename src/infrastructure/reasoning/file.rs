use super::parse::parse_draft;
use crate::domain::entities::decision::DecisionDraft;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_provider::{DecisionContext, DecisionProvider};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Reads a prepared decision from disk instead of asking a model.
pub struct FileDecisionProvider {
    path: PathBuf,
}

impl FileDecisionProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DecisionProvider for FileDecisionProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn propose(&self, context: &DecisionContext) -> Result<DecisionDraft, DomainError> {
        info!(path = %self.path.display(), gameweek = %context.gameweek, "Reading decision file");
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::NotFound(format!("decision file {}: {e}", self.path.display()))
        })?;
        parse_draft(&text)
    }
}
