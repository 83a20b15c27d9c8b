//! Shared test fixtures: a legal 15-player squad, a catalog around it, and a
//! recording in-memory game API.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use squadpilot::domain::entities::decision::DecisionDraft;
use squadpilot::domain::entities::league::{Fixture, GameweekEvent, LeagueData, Team};
use squadpilot::domain::entities::player::{Catalog, Player, PlayerId, TeamId};
use squadpilot::domain::entities::roster::{
    AccountId, AccountSnapshot, Roster, RosterEntry, TransferRecord,
};
use squadpilot::domain::error::DomainError;
use squadpilot::domain::ports::decision_provider::{DecisionContext, DecisionProvider};
use squadpilot::domain::ports::game_api::GameApi;
use squadpilot::domain::values::availability::Availability;
use squadpilot::domain::values::chip::Chip;
use squadpilot::domain::values::gameweek::Gameweek;
use squadpilot::domain::values::lineup::LineupMutation;
use squadpilot::domain::values::position::Position;
use squadpilot::domain::values::transfer::TransferRequest;
use std::sync::Mutex;

pub const ACCOUNT: AccountId = 4242;

/// Squad in slot order. Team 1 and team 2 already have three players each.
///
/// | slot | id | pos | team |
/// |------|----|-----|------|
/// | 1    | 1  | GK  | 1    |
/// | 2-5  | 3,4,5,6 | DEF | 1,2,3,4 |
/// | 6-9  | 8,9,10,11 | MID | 1,2,3,4 |
/// | 10-11| 13,14 | FWD | 7,8 |
/// | 12   | 2  | GK  | 2    |
/// | 13   | 7  | DEF | 5    |
/// | 14   | 12 | MID | 6    |
/// | 15   | 15 | FWD | 6    |
pub const SQUAD: [(PlayerId, Position, TeamId); 15] = [
    (1, Position::Keeper, 1),
    (3, Position::Defender, 1),
    (4, Position::Defender, 2),
    (5, Position::Defender, 3),
    (6, Position::Defender, 4),
    (8, Position::Midfielder, 1),
    (9, Position::Midfielder, 2),
    (10, Position::Midfielder, 3),
    (11, Position::Midfielder, 4),
    (13, Position::Forward, 7),
    (14, Position::Forward, 8),
    (2, Position::Keeper, 2),
    (7, Position::Defender, 5),
    (12, Position::Midfielder, 6),
    (15, Position::Forward, 6),
];

pub const CAPTAIN: PlayerId = 13;
pub const VICE_CAPTAIN: PlayerId = 8;

/// Defender from team 1; bringing him in breaks the team cap.
pub const DEF_TEAM1: PlayerId = 200;
/// Defender from team 5, cost 50.
pub const DEF_TEAM5: PlayerId = 201;
/// Injured midfielder from team 9.
pub const MID_INJURED: PlayerId = 202;
/// Forward from team 9, cost 120.
pub const FWD_PRICEY: PlayerId = 203;

pub fn gw(n: u32) -> Gameweek {
    Gameweek::new(n).unwrap()
}

pub fn player(id: PlayerId, position: Position, team_id: TeamId, cost: u32) -> Player {
    Player {
        id,
        web_name: format!("Player{id}"),
        position,
        team_id,
        cost,
        total_points: 20 + id as i32,
        status: Availability::Available,
        news: String::new(),
        form: 3.0,
        chance_of_playing: None,
    }
}

pub fn catalog() -> Catalog {
    let mut players: Vec<Player> = SQUAD
        .iter()
        .map(|(id, position, team)| player(*id, *position, *team, 50))
        .collect();
    players.push(player(DEF_TEAM1, Position::Defender, 1, 45));
    players.push(player(DEF_TEAM5, Position::Defender, 5, 50));
    let mut injured = player(MID_INJURED, Position::Midfielder, 9, 55);
    injured.status = Availability::Injured;
    injured.news = "Hamstring - expected back in 3 weeks".into();
    players.push(injured);
    players.push(player(FWD_PRICEY, Position::Forward, 9, 120));
    Catalog::new(players)
}

pub fn roster() -> Roster {
    Roster::new(
        SQUAD
            .iter()
            .enumerate()
            .map(|(idx, (id, _, _))| RosterEntry {
                player_id: *id,
                slot: idx as u8 + 1,
                is_captain: *id == CAPTAIN,
                is_vice_captain: *id == VICE_CAPTAIN,
                // Player 5 has risen in price since purchase.
                selling_price: Some(if *id == 5 { 55 } else { 50 }),
                purchase_price: Some(if *id == 5 { 52 } else { 50 }),
            })
            .collect(),
    )
}

pub fn snapshot() -> AccountSnapshot {
    AccountSnapshot {
        roster: roster(),
        bank: Some(10),
        free_transfers: Some(1),
        chips_available: Some(Chip::PLAYABLE.to_vec()),
        authenticated: true,
    }
}

pub fn league() -> LeagueData {
    let teams = (1..=10)
        .map(|id| Team {
            id,
            name: format!("Club {id}"),
            short_name: format!("C{id:02}"),
            strength_home: Some(1000.0 + id as f64 * 10.0),
            strength_away: Some(1000.0 + id as f64 * 10.0),
        })
        .collect();
    let events = vec![
        GameweekEvent {
            id: gw(4),
            deadline: Some(Utc.with_ymd_and_hms(2020, 9, 1, 10, 0, 0).unwrap()),
            finished: true,
        },
        GameweekEvent {
            id: gw(5),
            deadline: Some(Utc.with_ymd_and_hms(2099, 9, 8, 10, 0, 0).unwrap()),
            finished: false,
        },
    ];
    LeagueData {
        catalog: catalog(),
        teams,
        events,
    }
}

pub fn fixtures() -> Vec<Fixture> {
    (0..5)
        .map(|i| Fixture {
            gameweek: Some(gw(5)),
            home_team: i * 2 + 1,
            away_team: i * 2 + 2,
        })
        .collect()
}

/// Squad ids in slot order.
pub fn squad_ids() -> Vec<PlayerId> {
    SQUAD.iter().map(|(id, _, _)| *id).collect()
}

pub fn history_entry(gameweek: u32) -> TransferRecord {
    TransferRecord {
        gameweek: gw(gameweek),
        element_in: 99,
        element_out: 98,
        time: Some(Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()),
    }
}

/// How a scripted call should fail.
#[derive(Debug, Clone)]
pub enum FailWith {
    Remote(&'static str),
    Transport(&'static str),
}

impl FailWith {
    fn error(&self) -> DomainError {
        match self {
            FailWith::Remote(msg) => DomainError::RemoteRejected(msg.to_string()),
            FailWith::Transport(msg) => DomainError::Transport(msg.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchLeague,
    FetchFixtures(Gameweek),
    FetchRoster,
    FetchPublicRoster(Gameweek),
    FetchHistory,
    SubmitTransfers {
        transfers: Vec<TransferRequest>,
        chip: Option<String>,
        commit: bool,
    },
    SubmitLineup(LineupMutation),
}

/// In-memory game API. A committed transfer batch really changes the roster
/// returned by later `fetch_roster` calls.
pub struct MockGameApi {
    pub session: bool,
    pub league: LeagueData,
    pub fixtures: Vec<Fixture>,
    pub account: Mutex<AccountSnapshot>,
    pub history: Vec<TransferRecord>,
    pub fail_history: Option<FailWith>,
    pub fail_transfer_check: Option<FailWith>,
    pub fail_commit: Option<FailWith>,
    pub fail_lineup: Option<FailWith>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockGameApi {
    pub fn new() -> Self {
        Self {
            session: true,
            league: league(),
            fixtures: fixtures(),
            account: Mutex::new(snapshot()),
            history: vec![],
            fail_history: None,
            fail_transfer_check: None,
            fail_commit: None,
            fail_lineup: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::SubmitTransfers { .. } | Call::SubmitLineup(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GameApi for MockGameApi {
    fn name(&self) -> &str {
        "mock"
    }

    fn has_session(&self) -> bool {
        self.session
    }

    async fn fetch_league_data(&self) -> Result<LeagueData, DomainError> {
        self.record(Call::FetchLeague);
        Ok(self.league.clone())
    }

    async fn fetch_fixtures(&self, gameweek: Gameweek) -> Result<Vec<Fixture>, DomainError> {
        self.record(Call::FetchFixtures(gameweek));
        Ok(self.fixtures.clone())
    }

    async fn fetch_roster(&self, _account: AccountId) -> Result<AccountSnapshot, DomainError> {
        self.record(Call::FetchRoster);
        if !self.session {
            return Err(DomainError::Unauthorized("no session".into()));
        }
        Ok(self.account.lock().unwrap().clone())
    }

    async fn fetch_public_roster(
        &self,
        _account: AccountId,
        gameweek: Gameweek,
    ) -> Result<AccountSnapshot, DomainError> {
        self.record(Call::FetchPublicRoster(gameweek));
        let roster = self.account.lock().unwrap().roster.clone();
        let entries = roster
            .entries()
            .iter()
            .map(|e| RosterEntry {
                selling_price: None,
                purchase_price: None,
                ..e.clone()
            })
            .collect();
        Ok(AccountSnapshot {
            roster: Roster::new(entries),
            ..AccountSnapshot::default()
        })
    }

    async fn fetch_transfer_history(
        &self,
        _account: AccountId,
    ) -> Result<Vec<TransferRecord>, DomainError> {
        self.record(Call::FetchHistory);
        match &self.fail_history {
            Some(fail) => Err(fail.error()),
            None => Ok(self.history.clone()),
        }
    }

    async fn submit_transfers(
        &self,
        _account: AccountId,
        _gameweek: Gameweek,
        transfers: &[TransferRequest],
        chip: Option<&str>,
        commit: bool,
    ) -> Result<(), DomainError> {
        self.record(Call::SubmitTransfers {
            transfers: transfers.to_vec(),
            chip: chip.map(String::from),
            commit,
        });
        let fail = if commit {
            &self.fail_commit
        } else {
            &self.fail_transfer_check
        };
        if let Some(fail) = fail {
            return Err(fail.error());
        }
        if commit {
            let mut account = self.account.lock().unwrap();
            let entries = account
                .roster
                .entries()
                .iter()
                .map(|e| match transfers.iter().find(|t| t.element_out == e.player_id) {
                    Some(t) => RosterEntry {
                        player_id: t.element_in,
                        slot: e.slot,
                        is_captain: false,
                        is_vice_captain: false,
                        selling_price: Some(t.purchase_price),
                        purchase_price: Some(t.purchase_price),
                    },
                    None => e.clone(),
                })
                .collect();
            account.roster = Roster::new(entries);
        }
        Ok(())
    }

    async fn submit_lineup(
        &self,
        _account: AccountId,
        lineup: &LineupMutation,
    ) -> Result<(), DomainError> {
        self.record(Call::SubmitLineup(lineup.clone()));
        match &self.fail_lineup {
            Some(fail) => Err(fail.error()),
            None => Ok(()),
        }
    }
}

/// Decision provider that always proposes the same draft.
pub struct StaticProvider(pub DecisionDraft);

#[async_trait]
impl DecisionProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn propose(&self, _context: &DecisionContext) -> Result<DecisionDraft, DomainError> {
        Ok(self.0.clone())
    }
}
