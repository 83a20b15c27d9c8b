//! End-to-end weekly pipeline: fetch, score, propose, validate, then either
//! print the plan or hand it to the execution coordinator.

use crate::application::execute::ExecutionCoordinator;
use crate::application::idempotency::{GuardVerdict, IdempotencyGuard};
use crate::application::scoring::score_players;
use crate::application::summary::RunSummary;
use crate::application::validate::RuleValidator;
use crate::domain::entities::decision::{DecisionDraft, ValidatedDecision};
use crate::domain::entities::league::{next_gameweek, Fixture, LeagueData};
use crate::domain::entities::player::PlayerId;
use crate::domain::entities::roster::{AccountId, AccountSnapshot};
use crate::domain::error::DomainError;
use crate::domain::ports::decision_provider::{DecisionContext, DecisionProvider};
use crate::domain::ports::game_api::GameApi;
use crate::domain::values::chip::Chip;
use crate::domain::values::execution::{ExecutionMode, ExecutionReport};
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::score::ScoredPlayer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub mode: ExecutionMode,
    /// Overrides the next-deadline lookup.
    pub gameweek: Option<Gameweek>,
    /// Fail instead of falling back to advisory mode when there is no session.
    pub require_team: bool,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub gameweek: Gameweek,
    pub deadline: Option<DateTime<Utc>>,
    /// Mode actually used; an advisory run never applies.
    pub mode: ExecutionMode,
    /// True when the roster came from public picks instead of the account.
    pub advisory: bool,
    pub provider: String,
    pub decision: ValidatedDecision,
    pub execution: Option<ExecutionReport>,
    #[serde(skip)]
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SquadLine {
    pub slot: u8,
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: String,
    pub status: String,
    pub captain: bool,
    pub vice_captain: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub gameweek: Gameweek,
    pub deadline: Option<DateTime<Utc>>,
    pub authenticated: bool,
    pub bank: Option<u32>,
    pub free_transfers: Option<u32>,
    pub chips_available: Option<Vec<Chip>>,
    /// `None` when the history could not be read (no session).
    pub already_applied: Option<bool>,
    pub squad: Vec<SquadLine>,
}

/// Data every command needs before doing its own thing.
struct Prepared {
    gameweek: Gameweek,
    deadline: Option<DateTime<Utc>>,
    league: LeagueData,
    fixtures: Vec<Fixture>,
}

pub struct RunUseCase {
    api: Arc<dyn GameApi>,
    provider: Arc<dyn DecisionProvider>,
    rules: GameRules,
    account: AccountId,
}

impl RunUseCase {
    pub fn new(
        api: Arc<dyn GameApi>,
        provider: Arc<dyn DecisionProvider>,
        rules: GameRules,
        account: AccountId,
    ) -> Self {
        Self {
            api,
            provider,
            rules,
            account,
        }
    }

    pub async fn run(&self, options: RunOptions) -> Result<RunReport, DomainError> {
        let prepared = self.prepare(options.gameweek).await?;
        let gameweek = prepared.gameweek;
        let account = self.load_account(gameweek, options.require_team).await?;
        let advisory = !account.authenticated;
        if advisory {
            warn!(%gameweek, "No usable session; running in advisory mode");
        }
        // Without a session nothing can be submitted; the plan is still shown.
        let mode = if options.mode == ExecutionMode::Apply && advisory {
            warn!(%gameweek, "--apply needs an authenticated session; showing the plan only");
            ExecutionMode::DryRun
        } else {
            options.mode
        };

        let players = score_players(&prepared.league, &prepared.fixtures, gameweek);
        let context = self.context(&prepared, &account, players);
        info!(provider = self.provider.name(), %gameweek, "Requesting decision");
        let draft = self.provider.propose(&context).await?;

        let decision = self.check(draft, &account, &prepared.league, gameweek)?;

        let execution = match mode {
            ExecutionMode::DryRun => None,
            ExecutionMode::Apply => {
                let coordinator = ExecutionCoordinator::new(self.api.clone(), self.rules.clone());
                Some(
                    coordinator
                        .execute(self.account, decision.clone(), &account, &prepared.league.catalog)
                        .await?,
                )
            }
        };

        let summary = RunSummary {
            mode,
            decision: &decision,
            account: &account,
            catalog: &prepared.league.catalog,
            rules: &self.rules,
            execution: execution.as_ref(),
        }
        .render();
        if mode == ExecutionMode::DryRun {
            info!("Dry run, nothing submitted\n{summary}");
        }

        Ok(RunReport {
            gameweek,
            deadline: prepared.deadline,
            mode,
            advisory,
            provider: self.provider.name().to_string(),
            decision,
            execution,
            summary,
        })
    }

    /// Validate an externally supplied draft against live data without executing it.
    pub async fn validate_draft(
        &self,
        draft: DecisionDraft,
        gameweek: Option<Gameweek>,
    ) -> Result<ValidatedDecision, DomainError> {
        let prepared = self.prepare(gameweek).await?;
        let account = self.load_account(prepared.gameweek, false).await?;
        self.check(draft, &account, &prepared.league, prepared.gameweek)
    }

    pub async fn status(&self, gameweek: Option<Gameweek>) -> Result<StatusReport, DomainError> {
        let prepared = self.prepare(gameweek).await?;
        let gameweek = prepared.gameweek;
        let account = self.load_account(gameweek, false).await?;

        let already_applied = if account.authenticated {
            let history = self.api.fetch_transfer_history(self.account).await?;
            Some(IdempotencyGuard::check(gameweek, &history) != GuardVerdict::Clear)
        } else {
            None
        };

        let league = &prepared.league;
        let squad = account
            .roster
            .entries()
            .iter()
            .map(|e| {
                let player = league.catalog.get(e.player_id);
                SquadLine {
                    slot: e.slot,
                    id: e.player_id,
                    name: league.catalog.name_of(e.player_id),
                    team: player
                        .map(|p| league.team_short_name(p.team_id))
                        .unwrap_or_default(),
                    position: player
                        .map(|p| p.position.short_name().to_string())
                        .unwrap_or_default(),
                    status: player.map(|p| p.status.to_string()).unwrap_or_default(),
                    captain: e.is_captain,
                    vice_captain: e.is_vice_captain,
                }
            })
            .collect();

        Ok(StatusReport {
            gameweek,
            deadline: prepared.deadline,
            authenticated: account.authenticated,
            bank: account.bank,
            free_transfers: account.free_transfers,
            chips_available: account.chips_available,
            already_applied,
            squad,
        })
    }

    pub async fn scores(
        &self,
        gameweek: Option<Gameweek>,
        limit: usize,
    ) -> Result<Vec<ScoredPlayer>, DomainError> {
        let prepared = self.prepare(gameweek).await?;
        let mut scored = score_players(&prepared.league, &prepared.fixtures, prepared.gameweek);
        scored.truncate(limit);
        Ok(scored)
    }

    async fn prepare(&self, gameweek: Option<Gameweek>) -> Result<Prepared, DomainError> {
        // With a known gameweek the two public reads are independent.
        let (league, fixtures, gameweek) = match gameweek {
            Some(gw) => {
                let (league, fixtures) =
                    tokio::try_join!(self.api.fetch_league_data(), self.api.fetch_fixtures(gw))?;
                (league, fixtures, gw)
            }
            None => {
                let league = self.api.fetch_league_data().await?;
                let (gw, _) = next_gameweek(&league.events, Utc::now()).ok_or_else(|| {
                    DomainError::NotFound("no upcoming gameweek; the season may be over".into())
                })?;
                let fixtures = self.api.fetch_fixtures(gw).await?;
                (league, fixtures, gw)
            }
        };
        let deadline = league
            .events
            .iter()
            .find(|e| e.id == gameweek)
            .and_then(|e| e.deadline);
        info!(%gameweek, ?deadline, players = league.catalog.len(), fixtures = fixtures.len(), "League data loaded");
        Ok(Prepared {
            gameweek,
            deadline,
            league,
            fixtures,
        })
    }

    async fn load_account(
        &self,
        gameweek: Gameweek,
        require_team: bool,
    ) -> Result<AccountSnapshot, DomainError> {
        if self.api.has_session() {
            match self.api.fetch_roster(self.account).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) if require_team => return Err(e),
                Err(e) => warn!(error = %e, "Account roster unavailable; falling back to public picks"),
            }
        } else if require_team {
            return Err(DomainError::Unauthorized(
                "no usable session and a team was required".into(),
            ));
        }

        let previous = gameweek.previous().ok_or_else(|| {
            DomainError::NotFound(format!("no gameweek before {gameweek} to read public picks from"))
        })?;
        self.api.fetch_public_roster(self.account, previous).await
    }

    fn check(
        &self,
        draft: DecisionDraft,
        account: &AccountSnapshot,
        league: &LeagueData,
        gameweek: Gameweek,
    ) -> Result<ValidatedDecision, DomainError> {
        let validator = RuleValidator::new(self.rules.clone());
        match validator.validate(draft, account, &league.catalog, gameweek) {
            Ok(decision) => {
                for advisory in decision.advisories() {
                    warn!(%gameweek, "{advisory}");
                }
                Ok(decision)
            }
            Err(report) => {
                warn!(%gameweek, "Decision rejected: {report}");
                Err(DomainError::Rejected(report))
            }
        }
    }

    fn context(
        &self,
        prepared: &Prepared,
        account: &AccountSnapshot,
        players: Vec<ScoredPlayer>,
    ) -> DecisionContext {
        let league = &prepared.league;
        let fixtures = prepared
            .fixtures
            .iter()
            .map(|f| {
                format!(
                    "{} vs {}",
                    league.team_short_name(f.home_team),
                    league.team_short_name(f.away_team)
                )
            })
            .collect();
        DecisionContext {
            gameweek: prepared.gameweek,
            squad: account.roster.ids(),
            bank: account.bank,
            free_transfers: account.free_transfers,
            chips_available: account
                .chips_available
                .clone()
                .unwrap_or_else(|| Chip::PLAYABLE.to_vec()),
            players,
            fixtures,
            rules: self.rules.clone(),
        }
    }
}
