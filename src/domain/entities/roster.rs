use crate::domain::entities::player::PlayerId;
use crate::domain::values::chip::Chip;
use crate::domain::values::gameweek::Gameweek;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type AccountId = u64;

/// One squad member with slot, armband flags and prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    /// 1-based squad slot. Slots up to the starting size are starters, the rest bench.
    pub slot: u8,
    pub is_captain: bool,
    pub is_vice_captain: bool,
    pub selling_price: Option<u32>,
    pub purchase_price: Option<u32>,
}

/// The account's squad, ordered by slot. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(mut entries: Vec<RosterEntry>) -> Self {
        entries.sort_by_key(|e| e.slot);
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.get(player_id).is_some()
    }

    /// Player ids in slot order.
    pub fn ids(&self) -> Vec<PlayerId> {
        self.entries.iter().map(|e| e.player_id).collect()
    }

    /// Player ids in ascending id order; identifies the squad membership regardless of slots.
    pub fn membership(&self) -> Vec<PlayerId> {
        let mut ids = self.ids();
        ids.sort_unstable();
        ids
    }

    pub fn captain(&self) -> Option<PlayerId> {
        self.entries.iter().find(|e| e.is_captain).map(|e| e.player_id)
    }

    pub fn vice_captain(&self) -> Option<PlayerId> {
        self.entries
            .iter()
            .find(|e| e.is_vice_captain)
            .map(|e| e.player_id)
    }
}

/// Everything known about the account at fetch time.
///
/// `None` fields are unknown, which happens when the roster came from the
/// public (unauthenticated) endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountSnapshot {
    pub roster: Roster,
    pub bank: Option<u32>,
    pub free_transfers: Option<u32>,
    pub chips_available: Option<Vec<Chip>>,
    pub authenticated: bool,
}

/// One past transfer from the account history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub gameweek: Gameweek,
    pub element_in: PlayerId,
    pub element_out: PlayerId,
    pub time: Option<DateTime<Utc>>,
}
