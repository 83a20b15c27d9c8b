use crate::domain::values::availability::Availability;
use crate::domain::values::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type PlayerId = u32;
pub type TeamId = u32;

/// Catalog snapshot of one player. Read-only for the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub web_name: String,
    pub position: Position,
    pub team_id: TeamId,
    /// Current cost in tenths of a currency unit.
    pub cost: u32,
    pub total_points: i32,
    pub status: Availability,
    #[serde(default)]
    pub news: String,
    #[serde(default)]
    pub form: f64,
    #[serde(default)]
    pub chance_of_playing: Option<u8>,
}

/// All players known to the game for the current fetch, keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    players: BTreeMap<PlayerId, Player>,
}

impl Catalog {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players: players.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Display name for logs; falls back to the numeric id.
    pub fn name_of(&self, id: PlayerId) -> String {
        self.players
            .get(&id)
            .map(|p| p.web_name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
