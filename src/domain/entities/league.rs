use crate::domain::entities::player::{Catalog, TeamId};
use crate::domain::values::gameweek::Gameweek;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Neutral strength used when a team's rating is missing.
pub const DEFAULT_TEAM_STRENGTH: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
    pub strength_home: Option<f64>,
    pub strength_away: Option<f64>,
}

impl Team {
    /// Combined home+away overall strength.
    pub fn overall_strength(&self) -> f64 {
        self.strength_home.unwrap_or(DEFAULT_TEAM_STRENGTH)
            + self.strength_away.unwrap_or(DEFAULT_TEAM_STRENGTH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub gameweek: Option<Gameweek>,
    pub home_team: TeamId,
    pub away_team: TeamId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameweekEvent {
    pub id: Gameweek,
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished: bool,
}

/// Public league-wide data from one fetch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeagueData {
    pub catalog: Catalog,
    pub teams: Vec<Team>,
    pub events: Vec<GameweekEvent>,
}

impl LeagueData {
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_short_name(&self, id: TeamId) -> String {
        self.team(id)
            .map(|t| t.short_name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// First gameweek whose deadline is still ahead of `now`, with that deadline.
pub fn next_gameweek(events: &[GameweekEvent], now: DateTime<Utc>) -> Option<(Gameweek, DateTime<Utc>)> {
    events
        .iter()
        .filter_map(|e| e.deadline.map(|d| (e.id, d)))
        .find(|(_, deadline)| *deadline > now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(id: u32, deadline: Option<DateTime<Utc>>) -> GameweekEvent {
        GameweekEvent {
            id: Gameweek::new(id).unwrap(),
            deadline,
            finished: false,
        }
    }

    #[test]
    fn test_next_gameweek_skips_past_and_missing_deadlines() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let events = vec![
            event(7, Some(Utc.with_ymd_and_hms(2026, 10, 4, 10, 0, 0).unwrap())),
            event(8, None),
            event(9, Some(Utc.with_ymd_and_hms(2026, 10, 24, 10, 0, 0).unwrap())),
            event(10, Some(Utc.with_ymd_and_hms(2026, 10, 31, 10, 0, 0).unwrap())),
        ];
        let (gw, deadline) = next_gameweek(&events, now).unwrap();
        assert_eq!(gw.value(), 9);
        assert_eq!(deadline, Utc.with_ymd_and_hms(2026, 10, 24, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_next_gameweek_season_over() {
        let now = Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap();
        let events = vec![event(38, Some(Utc.with_ymd_and_hms(2027, 5, 20, 10, 0, 0).unwrap()))];
        assert!(next_gameweek(&events, now).is_none());
    }

    #[test]
    fn test_overall_strength_defaults() {
        let team = Team {
            id: 1,
            name: "Arsenal".into(),
            short_name: "ARS".into(),
            strength_home: Some(1300.0),
            strength_away: None,
        };
        assert_eq!(team.overall_strength(), 2300.0);
    }
}
