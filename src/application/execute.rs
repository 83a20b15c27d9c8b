use crate::application::idempotency::{GuardVerdict, IdempotencyGuard};
use crate::application::lineup_plan::LineupPlanner;
use crate::application::transfer_plan::TransferPlanner;
use crate::domain::entities::decision::ValidatedDecision;
use crate::domain::entities::player::Catalog;
use crate::domain::entities::roster::{AccountId, AccountSnapshot, Roster};
use crate::domain::error::DomainError;
use crate::domain::ports::game_api::GameApi;
use crate::domain::values::chip::ChipScope;
use crate::domain::values::execution::{
    ExecutionFailure, ExecutionReport, ExecutionState, FailureCause, TransferStage,
};
use crate::domain::values::game_rules::GameRules;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Drives one validated decision through the remote mutations.
///
/// Steps run strictly in order and the first failure is terminal. Committed
/// transfers are never rolled back; a lineup failure after a commit surfaces
/// as a partial success on the report.
pub struct ExecutionCoordinator {
    api: Arc<dyn GameApi>,
    rules: GameRules,
    lineup_planner: LineupPlanner,
}

impl ExecutionCoordinator {
    pub fn new(api: Arc<dyn GameApi>, rules: GameRules) -> Self {
        let lineup_planner = LineupPlanner::new(rules.clone());
        Self {
            api,
            rules,
            lineup_planner,
        }
    }

    /// Consumes the decision so it cannot be executed twice.
    ///
    /// `Err` is returned only when nothing was attempted: no session, or the
    /// transfer history needed by the guard could not be read. Every other
    /// outcome, including failures, comes back as the report's state.
    pub async fn execute(
        &self,
        account: AccountId,
        validated: ValidatedDecision,
        snapshot: &AccountSnapshot,
        catalog: &Catalog,
    ) -> Result<ExecutionReport, DomainError> {
        let gameweek = validated.gameweek();
        let mut report = ExecutionReport::new(gameweek);

        if !self.api.has_session() {
            return Err(DomainError::Unauthorized(
                "applying a decision requires an authenticated session".into(),
            ));
        }

        // Guard. History is the only idempotency record, so an unreadable
        // history means we cannot tell whether this gameweek was done already.
        let history = self
            .api
            .fetch_transfer_history(account)
            .await
            .map_err(|e| {
                error!(run_id = %report.run_id, %gameweek, error = %e, "Transfer history unavailable; not executing");
                e
            })?;
        if let GuardVerdict::AlreadyApplied { transfers, last_at } =
            IdempotencyGuard::check(gameweek, &history)
        {
            let reason = format!(
                "{transfers} transfer(s) already recorded for {gameweek}{}; if a previous run failed after committing, check the lineup manually",
                last_at.map(|t| format!(" (latest at {t})")).unwrap_or_default()
            );
            return Ok(self.finish(report, ExecutionState::Skipped { reason }));
        }
        info!(run_id = %report.run_id, %gameweek, "Guard clear");

        // Transfers
        let transfers_committed = if validated.has_transfers() {
            let requests = match TransferPlanner::plan(&validated, &snapshot.roster, catalog) {
                Ok(requests) => requests,
                Err(e) => {
                    return Ok(self.finish(
                        report,
                        transfer_failed(TransferStage::Validation, e),
                    ))
                }
            };
            let chip = match validated.chip().scope() {
                Some(ChipScope::Transfer) => self.rules.chip_api_name(validated.chip()),
                _ => None,
            };
            report.transfers = requests.clone();
            report.transfer_chip = chip.clone();

            info!(run_id = %report.run_id, count = requests.len(), chip = ?chip, "Submitting transfers for validation");
            if let Err(e) = self
                .api
                .submit_transfers(account, gameweek, &requests, chip.as_deref(), false)
                .await
            {
                return Ok(self.finish(report, transfer_failed(TransferStage::Validation, e)));
            }

            info!(run_id = %report.run_id, "Committing transfers");
            if let Err(e) = self
                .api
                .submit_transfers(account, gameweek, &requests, chip.as_deref(), true)
                .await
            {
                if e.is_transport() {
                    warn!(run_id = %report.run_id, "Commit outcome unknown; re-run to let the guard decide");
                }
                return Ok(self.finish(report, transfer_failed(TransferStage::Commit, e)));
            }
            true
        } else {
            info!(run_id = %report.run_id, "No transfers in decision");
            false
        };

        // Refresh
        let roster: Roster = if transfers_committed {
            match self.api.fetch_roster(account).await {
                Ok(fresh) => fresh.roster,
                Err(e) => {
                    return Ok(self.finish(report, lineup_failed(transfers_committed, e)));
                }
            }
        } else {
            snapshot.roster.clone()
        };

        // Lineup
        let lineup = match self.lineup_planner.plan(&validated, &roster) {
            Ok(lineup) => lineup,
            Err(e) => return Ok(self.finish(report, lineup_failed(transfers_committed, e))),
        };
        report.lineup = Some(lineup.clone());

        info!(
            run_id = %report.run_id,
            captain = ?lineup.captain(),
            vice_captain = ?lineup.vice_captain(),
            chip = ?lineup.chip,
            "Submitting lineup"
        );
        if let Err(e) = self.api.submit_lineup(account, &lineup).await {
            return Ok(self.finish(report, lineup_failed(transfers_committed, e)));
        }

        Ok(self.finish(report, ExecutionState::Applied))
    }

    fn finish(&self, mut report: ExecutionReport, state: ExecutionState) -> ExecutionReport {
        report.state = state;
        let outcome = report.outcome();
        match &report.state {
            ExecutionState::Failed { failure } => {
                error!(run_id = %report.run_id, gameweek = %report.gameweek, %outcome, failure = ?failure, "Execution stopped")
            }
            ExecutionState::Skipped { reason } => {
                warn!(run_id = %report.run_id, gameweek = %report.gameweek, %reason, "Execution skipped")
            }
            _ => info!(run_id = %report.run_id, gameweek = %report.gameweek, %outcome, "Execution finished"),
        }
        report
    }
}

fn transfer_failed(stage: TransferStage, e: DomainError) -> ExecutionState {
    ExecutionState::Failed {
        failure: ExecutionFailure::TransferRejected {
            stage,
            cause: FailureCause::from(e),
        },
    }
}

fn lineup_failed(transfers_committed: bool, e: DomainError) -> ExecutionState {
    ExecutionState::Failed {
        failure: ExecutionFailure::LineupRejected {
            transfers_committed,
            cause: FailureCause::from(e),
        },
    }
}
