//! Outcome vocabulary of decision validation.
//!
//! Hard violations are [`Rejection`]s and block execution. [`Advisory`]
//! entries are legal under the game rules but usually undesired; they are
//! carried alongside the result for the caller to log.

use crate::domain::entities::player::{PlayerId, TeamId};
use crate::domain::values::availability::Availability;
use crate::domain::values::chip::Chip;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::position::Position;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    UnknownOutgoing { player_id: PlayerId },
    UnknownIncoming { player_id: PlayerId },
    DuplicateAcquisition { player_id: PlayerId },
    UnknownSquadMember { player_id: PlayerId },
    SquadSize { expected: usize, actual: usize },
    TeamLimit { team_id: TeamId, count: usize, limit: usize },
    PositionCount { position: Position, expected: usize, actual: usize },
    CaptainNotInSquad { player_id: PlayerId },
    ViceCaptainNotInSquad { player_id: PlayerId },
    CaptainIsViceCaptain { player_id: PlayerId },
    LineupLength { expected: usize, actual: usize },
    LineupForeignPlayer { player_id: PlayerId },
    LineupDuplicate { player_id: PlayerId },
    LineupMissing { player_id: PlayerId },
    Formation { detail: String },
    ChipUnavailable { chip: Chip },
    ChipWithoutTransfers { chip: Chip },
    OverBudget { bank: u32, shortfall: u32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownOutgoing { player_id } => {
                write!(f, "outgoing player {player_id} is not in the squad")
            }
            Rejection::UnknownIncoming { player_id } => {
                write!(f, "incoming player {player_id} is not in the catalog")
            }
            Rejection::DuplicateAcquisition { player_id } => {
                write!(f, "incoming player {player_id} is already in the squad")
            }
            Rejection::UnknownSquadMember { player_id } => {
                write!(f, "squad member {player_id} is missing from the catalog")
            }
            Rejection::SquadSize { expected, actual } => {
                write!(f, "squad has {actual} players, expected {expected}")
            }
            Rejection::TeamLimit { team_id, count, limit } => {
                write!(f, "team {team_id} would have {count} players (limit {limit})")
            }
            Rejection::PositionCount { position, expected, actual } => {
                write!(f, "squad would have {actual} {position}s, expected {expected}")
            }
            Rejection::CaptainNotInSquad { player_id } => {
                write!(f, "captain {player_id} is not in the resulting squad")
            }
            Rejection::ViceCaptainNotInSquad { player_id } => {
                write!(f, "vice-captain {player_id} is not in the resulting squad")
            }
            Rejection::CaptainIsViceCaptain { player_id } => {
                write!(f, "player {player_id} cannot be both captain and vice-captain")
            }
            Rejection::LineupLength { expected, actual } => {
                write!(f, "lineup order has {actual} players, expected {expected}")
            }
            Rejection::LineupForeignPlayer { player_id } => {
                write!(f, "lineup order contains player {player_id} who is not in the squad")
            }
            Rejection::LineupDuplicate { player_id } => {
                write!(f, "lineup order lists player {player_id} more than once")
            }
            Rejection::LineupMissing { player_id } => {
                write!(f, "lineup order omits squad member {player_id}")
            }
            Rejection::Formation { detail } => write!(f, "invalid formation: {detail}"),
            Rejection::ChipUnavailable { chip } => write!(f, "chip {chip} is not available"),
            Rejection::ChipWithoutTransfers { chip } => {
                write!(f, "chip {chip} requires at least one transfer")
            }
            Rejection::OverBudget { bank, shortfall } => {
                write!(f, "transfers exceed budget by {shortfall} (bank {bank})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    StarterUnavailable { player_id: PlayerId, status: Availability },
    CaptainUnavailable { player_id: PlayerId, status: Availability },
    PointsHit { extra_transfers: u32, points: u32 },
    ChipAvailabilityUnknown { chip: Chip },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::StarterUnavailable { player_id, status } => {
                write!(f, "starter {player_id} is {status}")
            }
            Advisory::CaptainUnavailable { player_id, status } => {
                write!(f, "captain {player_id} is {status}")
            }
            Advisory::PointsHit { extra_transfers, points } => {
                write!(f, "{extra_transfers} extra transfer(s) cost {points} points")
            }
            Advisory::ChipAvailabilityUnknown { chip } => {
                write!(f, "availability of chip {chip} could not be confirmed")
            }
        }
    }
}

/// Why a draft was refused. Never empty: a report with no reasons is not a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionReport {
    pub gameweek: Gameweek,
    pub reasons: Vec<Rejection>,
    pub advisories: Vec<Advisory>,
}

impl RejectionReport {
    pub fn has(&self, predicate: impl Fn(&Rejection) -> bool) -> bool {
        self.reasons.iter().any(predicate)
    }
}

impl fmt::Display for RejectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s) for {}", self.reasons.len(), self.gameweek)?;
        for (i, reason) in self.reasons.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{reason}")?;
        }
        Ok(())
    }
}
