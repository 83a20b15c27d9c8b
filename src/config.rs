//! Process configuration from the environment (after `.env` is loaded).

use crate::domain::entities::roster::AccountId;
use crate::domain::error::DomainError;
use crate::domain::values::game_rules::GameRules;
use crate::infrastructure::fpl::client::DEFAULT_BASE_URL;
use crate::infrastructure::fpl::AuthStrategy;
use crate::infrastructure::reasoning::gemini::DEFAULT_MODEL;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub account_id: AccountId,
    pub email: Option<String>,
    pub password: Option<String>,
    pub cookie: Option<String>,
    pub use_bearer: bool,
    pub base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let account_id = get("FPL_MANAGER_ID")
            .ok_or_else(|| DomainError::Config("FPL_MANAGER_ID is not set".into()))?
            .parse::<AccountId>()
            .map_err(|e| DomainError::Config(format!("FPL_MANAGER_ID is not a number: {e}")))?;

        let use_bearer = get("FPL_USE_BEARER")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            account_id,
            email: get("FPL_EMAIL"),
            password: get("FPL_PASSWORD"),
            cookie: get("FPL_COOKIE"),
            use_bearer,
            base_url: get("FPL_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gemini_api_key: get("GOOGLE_AI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    /// Login first when both credentials are present, then the browser cookie.
    pub fn auth_strategies(&self) -> Vec<AuthStrategy> {
        let mut strategies = Vec::new();
        if let (Some(email), Some(password)) = (&self.email, &self.password) {
            strategies.push(AuthStrategy::login(email.clone(), password.clone()));
        }
        if let Some(cookie) = &self.cookie {
            strategies.push(AuthStrategy::Cookie {
                cookie: cookie.clone(),
                bearer: self.use_bearer,
            });
        }
        strategies
    }
}

/// Default FPL rules, or a variant read from a JSON file.
pub fn load_rules(path: Option<&Path>) -> Result<GameRules, DomainError> {
    let Some(path) = path else {
        return Ok(GameRules::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Config(format!("rules file {}: {e}", path.display())))?;
    GameRules::from_json(&json).map_err(DomainError::Config)
}
