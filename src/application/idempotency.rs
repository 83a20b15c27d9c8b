use crate::domain::entities::roster::TransferRecord;
use crate::domain::values::gameweek::Gameweek;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the transfer history says about a gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GuardVerdict {
    Clear,
    AlreadyApplied {
        transfers: usize,
        last_at: Option<DateTime<Utc>>,
    },
}

/// Detects a gameweek whose transfers were already submitted, by this tool or anyone else.
///
/// This is a check-then-act heuristic: nothing stops a submission landing
/// between the history fetch and our own mutation. One account acting a few
/// times per gameweek makes that window acceptable.
pub struct IdempotencyGuard;

impl IdempotencyGuard {
    pub fn already_applied(gameweek: Gameweek, history: &[TransferRecord]) -> bool {
        history.iter().any(|t| t.gameweek == gameweek)
    }

    pub fn check(gameweek: Gameweek, history: &[TransferRecord]) -> GuardVerdict {
        let matching: Vec<&TransferRecord> =
            history.iter().filter(|t| t.gameweek == gameweek).collect();
        if matching.is_empty() {
            return GuardVerdict::Clear;
        }
        GuardVerdict::AlreadyApplied {
            transfers: matching.len(),
            last_at: matching.iter().filter_map(|t| t.time).max(),
        }
    }
}
