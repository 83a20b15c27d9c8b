use crate::domain::entities::decision::DecisionDraft;
use crate::domain::entities::player::PlayerId;
use crate::domain::error::DomainError;
use crate::domain::values::chip::Chip;
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::score::ScoredPlayer;
use async_trait::async_trait;
use serde::Serialize;

/// Everything a reasoning service sees when proposing a decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionContext {
    pub gameweek: Gameweek,
    /// Current squad in slot order.
    pub squad: Vec<PlayerId>,
    pub bank: Option<u32>,
    pub free_transfers: Option<u32>,
    pub chips_available: Vec<Chip>,
    /// Scored catalog, best value first.
    pub players: Vec<ScoredPlayer>,
    /// One "HOME vs AWAY" line per fixture.
    pub fixtures: Vec<String>,
    pub rules: GameRules,
}

impl DecisionContext {
    pub fn squad_players(&self) -> impl Iterator<Item = &ScoredPlayer> {
        self.players.iter().filter(|p| self.squad.contains(&p.id))
    }
}

/// Source of candidate decisions. Output is untrusted and must be validated.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    async fn propose(&self, context: &DecisionContext) -> Result<DecisionDraft, DomainError>;
}
