use crate::domain::entities::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One squad member's slot and armband flags in a lineup submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupPick {
    #[serde(rename = "element")]
    pub player_id: PlayerId,
    /// 1-based squad slot: starters first, then bench in substitution order.
    #[serde(rename = "position")]
    pub slot: u8,
    pub is_captain: bool,
    pub is_vice_captain: bool,
}

/// Full lineup state to submit. Always the complete intended state, never a delta,
/// so resubmitting it is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupMutation {
    pub picks: Vec<LineupPick>,
    /// Wire name of a lineup-scoped chip, if one is played.
    pub chip: Option<String>,
}

impl LineupMutation {
    pub fn captain(&self) -> Option<PlayerId> {
        self.picks.iter().find(|p| p.is_captain).map(|p| p.player_id)
    }

    pub fn vice_captain(&self) -> Option<PlayerId> {
        self.picks.iter().find(|p| p.is_vice_captain).map(|p| p.player_id)
    }

    pub fn slot_of(&self, player_id: PlayerId) -> Option<u8> {
        self.picks
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.slot)
    }
}
