pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::run::{RunOptions, RunReport, RunUseCase, StatusReport};
use crate::config::AppConfig;
use crate::domain::entities::decision::{DecisionDraft, ValidatedDecision};
use crate::domain::entities::roster::AccountId;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_provider::DecisionProvider;
use crate::domain::ports::game_api::GameApi;
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::score::ScoredPlayer;
use crate::infrastructure::fpl::{FplClient, FplConfig};
use crate::infrastructure::reasoning::disabled::DisabledProvider;
use crate::infrastructure::reasoning::file::FileDecisionProvider;
use crate::infrastructure::reasoning::gemini::GeminiProvider;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct SquadPilot {
    run_uc: RunUseCase,
}

impl SquadPilot {
    /// Wire the real adapters. Authentication is attempted here; ending up
    /// without a session is allowed and leads to advisory mode.
    pub async fn new(
        config: &AppConfig,
        rules: GameRules,
        decision_file: Option<PathBuf>,
    ) -> Result<Self, DomainError> {
        let fpl_config = FplConfig {
            base_url: config.base_url.clone(),
            rules: rules.clone(),
            ..FplConfig::default()
        };
        let api = FplClient::connect(fpl_config, &config.auth_strategies(), config.account_id).await;
        info!(session = ?api.session_strategy(), "Game API ready");

        let provider: Arc<dyn DecisionProvider> = match (decision_file, &config.gemini_api_key) {
            (Some(path), _) => Arc::new(FileDecisionProvider::new(path)),
            (None, Some(key)) => Arc::new(GeminiProvider::new(
                key.clone(),
                Some(config.gemini_model.clone()),
            )),
            (None, None) => Arc::new(DisabledProvider),
        };

        Ok(Self::with_providers(Arc::new(api), provider, rules, config.account_id))
    }

    pub fn with_providers(
        api: Arc<dyn GameApi>,
        provider: Arc<dyn DecisionProvider>,
        rules: GameRules,
        account: AccountId,
    ) -> Self {
        Self {
            run_uc: RunUseCase::new(api, provider, rules, account),
        }
    }

    pub async fn run(&self, options: RunOptions) -> Result<RunReport, DomainError> {
        self.run_uc.run(options).await
    }

    pub async fn validate(
        &self,
        draft: DecisionDraft,
        gameweek: Option<Gameweek>,
    ) -> Result<ValidatedDecision, DomainError> {
        self.run_uc.validate_draft(draft, gameweek).await
    }

    pub async fn status(&self, gameweek: Option<Gameweek>) -> Result<StatusReport, DomainError> {
        self.run_uc.status(gameweek).await
    }

    pub async fn scores(
        &self,
        gameweek: Option<Gameweek>,
        limit: usize,
    ) -> Result<Vec<ScoredPlayer>, DomainError> {
        self.run_uc.scores(gameweek, limit).await
    }
}
