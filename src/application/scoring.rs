use crate::domain::entities::league::{Fixture, LeagueData, DEFAULT_TEAM_STRENGTH};
use crate::domain::entities::player::{Player, TeamId};
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::score::ScoredPlayer;
use std::collections::HashMap;

/// Score every catalog player for `gameweek`, best value first.
///
/// Only fixtures scheduled in `gameweek` count; unscheduled ones are ignored.
/// A team with two fixtures gets the mean opponent strength.
pub fn score_players(league: &LeagueData, fixtures: &[Fixture], gameweek: Gameweek) -> Vec<ScoredPlayer> {
    let mut opponents: HashMap<TeamId, Vec<f64>> = HashMap::new();
    for fixture in fixtures
        .iter()
        .filter(|f| f.gameweek == Some(gameweek))
    {
        opponents
            .entry(fixture.home_team)
            .or_default()
            .push(strength(league, fixture.away_team));
        opponents
            .entry(fixture.away_team)
            .or_default()
            .push(strength(league, fixture.home_team));
    }

    let mut scored: Vec<ScoredPlayer> = league
        .catalog
        .iter()
        .map(|p| {
            let difficulty = opponents
                .get(&p.team_id)
                .map(|s| s.iter().sum::<f64>() / s.len() as f64);
            score(p, difficulty)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.value_index
            .total_cmp(&a.value_index)
            .then(a.id.cmp(&b.id))
    });
    scored
}

fn strength(league: &LeagueData, team_id: TeamId) -> f64 {
    league
        .team(team_id)
        .map(|t| t.overall_strength())
        .unwrap_or(DEFAULT_TEAM_STRENGTH * 2.0)
}

fn score(player: &Player, fixture_difficulty: Option<f64>) -> ScoredPlayer {
    ScoredPlayer {
        id: player.id,
        web_name: player.web_name.clone(),
        position: player.position,
        team_id: player.team_id,
        cost: player.cost,
        total_points: player.total_points,
        value_index: value_index(player.total_points, player.cost),
        form: player.form,
        fixture_difficulty,
        status: player.status,
        chance_of_playing: player.chance_of_playing,
        news: player.news.clone(),
    }
}

/// Points per full currency unit, rounded to 2 dp. Zero for a free player.
pub fn value_index(total_points: i32, cost: u32) -> f64 {
    if cost == 0 {
        return 0.0;
    }
    let raw = total_points as f64 / (cost as f64 / 10.0);
    (raw * 100.0).round() / 100.0
}
