use crate::domain::entities::player::{PlayerId, TeamId};
use crate::domain::values::availability::Availability;
use crate::domain::values::position::Position;
use serde::Serialize;

/// Catalog player enriched with heuristic value scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlayer {
    pub id: PlayerId,
    pub web_name: String,
    pub position: Position,
    pub team_id: TeamId,
    pub cost: u32,
    pub total_points: i32,
    /// Points per full currency unit of cost.
    pub value_index: f64,
    pub form: f64,
    /// Opponent strength for the target gameweek; lower is easier. `None` without a fixture.
    pub fixture_difficulty: Option<f64>,
    pub status: Availability,
    pub chance_of_playing: Option<u8>,
    pub news: String,
}
