//! JSON shapes of the game API and their conversion into domain types.
//!
//! Decoding is lenient (missing optional fields default) but conversion is
//! strict about identity: a record with an unusable id or position is dropped
//! with a warning rather than guessed at.

use crate::domain::entities::league::{Fixture, GameweekEvent, LeagueData, Team};
use crate::domain::entities::player::{Catalog, Player, PlayerId, TeamId};
use crate::domain::entities::roster::{AccountSnapshot, Roster, RosterEntry, TransferRecord};
use crate::domain::values::availability::Availability;
use crate::domain::values::chip::Chip;
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::lineup::LineupPick;
use crate::domain::values::position::Position;
use crate::domain::values::transfer::TransferRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct BootstrapStatic {
    #[serde(default)]
    pub events: Vec<WireEvent>,
    #[serde(default)]
    pub teams: Vec<WireTeam>,
    #[serde(default)]
    pub elements: Vec<WireElement>,
}

#[derive(Debug, Deserialize)]
pub struct WireEvent {
    pub id: u32,
    #[serde(default)]
    pub deadline_time_epoch: Option<i64>,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Deserialize)]
pub struct WireTeam {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub strength_overall_home: Option<f64>,
    #[serde(default)]
    pub strength_overall_away: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WireElement {
    pub id: PlayerId,
    #[serde(default)]
    pub web_name: String,
    pub element_type: u8,
    pub team: TeamId,
    pub now_cost: i64,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub news: String,
    /// Sent as a decimal string, e.g. "5.3".
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub chance_of_playing_next_round: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct WireFixture {
    #[serde(default)]
    pub event: Option<u32>,
    pub team_h: TeamId,
    pub team_a: TeamId,
}

#[derive(Debug, Deserialize)]
pub struct WirePick {
    pub element: PlayerId,
    pub position: u8,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
    #[serde(default)]
    pub selling_price: Option<u32>,
    #[serde(default)]
    pub purchase_price: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireTransferState {
    #[serde(default)]
    pub bank: Option<i64>,
    #[serde(default)]
    pub free: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WireChip {
    pub name: String,
    #[serde(default, alias = "status_for_entry")]
    pub status: Option<String>,
}

/// `my-team/{id}/`
#[derive(Debug, Deserialize)]
pub struct MyTeam {
    #[serde(default)]
    pub picks: Vec<WirePick>,
    #[serde(default)]
    pub transfers: WireTransferState,
    #[serde(default)]
    pub chips: Vec<WireChip>,
}

/// `entry/{id}/event/{gw}/picks/`
#[derive(Debug, Deserialize)]
pub struct PublicPicks {
    #[serde(default)]
    pub picks: Vec<WirePick>,
}

/// One row of `entry/{id}/transfers/`
#[derive(Debug, Deserialize)]
pub struct WireTransfer {
    pub element_in: PlayerId,
    pub element_out: PlayerId,
    pub event: u32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// Body of `POST transfers/`
#[derive(Debug, Serialize)]
pub struct TransferPayload<'a> {
    pub entry: u64,
    pub event: u32,
    pub transfers: &'a [TransferRequest],
    pub chip: Option<&'a str>,
    pub confirmed: bool,
}

/// Body of `POST my-team/{id}/`
#[derive(Debug, Serialize)]
pub struct LineupPayload<'a> {
    pub picks: &'a [LineupPick],
    pub chip: Option<&'a str>,
}

impl BootstrapStatic {
    pub fn into_league(self) -> LeagueData {
        let players = self
            .elements
            .into_iter()
            .filter_map(WireElement::into_player)
            .collect();
        let teams = self.teams.into_iter().map(WireTeam::into_team).collect();
        let events = self
            .events
            .into_iter()
            .filter_map(|e| {
                let id = Gameweek::new(e.id).ok()?;
                Some(GameweekEvent {
                    id,
                    deadline: e
                        .deadline_time_epoch
                        .and_then(|ts| DateTime::from_timestamp(ts, 0)),
                    finished: e.finished,
                })
            })
            .collect();
        LeagueData {
            catalog: Catalog::new(players),
            teams,
            events,
        }
    }
}

impl WireTeam {
    fn into_team(self) -> Team {
        Team {
            id: self.id,
            name: self.name,
            short_name: self.short_name,
            strength_home: self.strength_overall_home,
            strength_away: self.strength_overall_away,
        }
    }
}

impl WireElement {
    fn into_player(self) -> Option<Player> {
        let Some(position) = Position::from_element_type(self.element_type) else {
            warn!(id = self.id, element_type = self.element_type, "Skipping player with unknown position");
            return None;
        };
        let Ok(cost) = u32::try_from(self.now_cost) else {
            warn!(id = self.id, now_cost = self.now_cost, "Skipping player with negative cost");
            return None;
        };
        Some(Player {
            id: self.id,
            web_name: self.web_name,
            position,
            team_id: self.team,
            cost,
            total_points: self.total_points,
            status: Availability::from_status_code(&self.status),
            news: self.news,
            form: self
                .form
                .as_deref()
                .and_then(|f| f.trim().parse().ok())
                .unwrap_or(0.0),
            chance_of_playing: self.chance_of_playing_next_round,
        })
    }
}

impl WireFixture {
    pub fn into_fixture(self) -> Fixture {
        Fixture {
            gameweek: self.event.and_then(|e| Gameweek::new(e).ok()),
            home_team: self.team_h,
            away_team: self.team_a,
        }
    }
}

impl WirePick {
    fn into_entry(self) -> RosterEntry {
        RosterEntry {
            player_id: self.element,
            slot: self.position,
            is_captain: self.is_captain,
            is_vice_captain: self.is_vice_captain,
            selling_price: self.selling_price,
            purchase_price: self.purchase_price,
        }
    }
}

impl MyTeam {
    pub fn into_snapshot(self, rules: &GameRules) -> AccountSnapshot {
        let chips = self
            .chips
            .iter()
            .filter(|c| c.status.as_deref() == Some("available"))
            .filter_map(|c| {
                let chip = rules.chip_from_api_name(&c.name);
                if chip.is_none() {
                    warn!(name = %c.name, "Ignoring unrecognised chip");
                }
                chip
            })
            .collect::<Vec<Chip>>();
        AccountSnapshot {
            roster: Roster::new(self.picks.into_iter().map(WirePick::into_entry).collect()),
            bank: self.transfers.bank.and_then(|b| u32::try_from(b).ok()),
            free_transfers: self.transfers.free,
            chips_available: Some(chips),
            authenticated: true,
        }
    }
}

impl PublicPicks {
    /// Public picks carry no prices or account state.
    pub fn into_snapshot(self) -> AccountSnapshot {
        let entries = self
            .picks
            .into_iter()
            .map(|p| RosterEntry {
                selling_price: None,
                purchase_price: None,
                ..p.into_entry()
            })
            .collect();
        AccountSnapshot {
            roster: Roster::new(entries),
            bank: None,
            free_transfers: None,
            chips_available: None,
            authenticated: false,
        }
    }
}

impl WireTransfer {
    pub fn into_record(self) -> Option<TransferRecord> {
        Some(TransferRecord {
            gameweek: Gameweek::new(self.event).ok()?,
            element_in: self.element_in,
            element_out: self.element_out,
            time: self.time,
        })
    }
}
