mod common;

use common::*;
use squadpilot::application::validate::RuleValidator;
use squadpilot::domain::entities::decision::{DecisionDraft, TransferPair};
use squadpilot::domain::entities::player::Catalog;
use squadpilot::domain::values::availability::Availability;
use squadpilot::domain::values::chip::Chip;
use squadpilot::domain::values::game_rules::GameRules;
use squadpilot::domain::values::position::Position;
use squadpilot::domain::values::validation::{Advisory, Rejection};

fn validator() -> RuleValidator {
    RuleValidator::new(GameRules::default())
}

fn swap(element_out: u32, element_in: u32) -> TransferPair {
    TransferPair {
        element_out,
        element_in,
    }
}

fn order(starters: &[u32], bench: &[u32]) -> Option<Vec<u32>> {
    Some(starters.iter().chain(bench).copied().collect())
}

#[test]
fn test_fourth_player_from_one_team_is_rejected() {
    let draft = DecisionDraft {
        transfers: vec![swap(5, DEF_TEAM1)],
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert_eq!(
        report.reasons,
        vec![Rejection::TeamLimit {
            team_id: 1,
            count: 4,
            limit: 3
        }]
    );
}

#[test]
fn test_team_cap_follows_configured_rules() {
    let rules = GameRules {
        max_per_team: 4,
        ..GameRules::default()
    };
    let draft = DecisionDraft {
        transfers: vec![swap(5, DEF_TEAM1)],
        ..Default::default()
    };
    assert!(RuleValidator::new(rules)
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .is_ok());
}

#[test]
fn test_captain_sold_in_same_decision_is_rejected() {
    let draft = DecisionDraft {
        transfers: vec![swap(7, DEF_TEAM5)],
        captain_id: Some(7),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert_eq!(
        report.reasons,
        vec![Rejection::CaptainNotInSquad { player_id: 7 }]
    );
}

#[test]
fn test_vice_captain_sold_in_same_decision_is_rejected() {
    let draft = DecisionDraft {
        transfers: vec![swap(VICE_CAPTAIN, MID_INJURED)],
        captain_id: Some(CAPTAIN),
        vice_captain_id: Some(VICE_CAPTAIN),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert_eq!(
        report.reasons,
        vec![Rejection::ViceCaptainNotInSquad {
            player_id: VICE_CAPTAIN
        }]
    );
}

#[test]
fn test_squad_member_missing_from_catalog_is_rejected() {
    let thinned = Catalog::new(catalog().iter().filter(|p| p.id != 15).cloned().collect());
    let report = validator()
        .validate(DecisionDraft::default(), &snapshot(), &thinned, gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::UnknownSquadMember { player_id: 15 }));
}

#[test]
fn test_short_lineup_order_is_rejected() {
    let mut ids = squad_ids();
    ids.pop();
    let draft = DecisionDraft {
        lineup_order: Some(ids),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::LineupLength { expected: 15, actual: 14 }));
    assert!(report.has(|r| *r == Rejection::LineupMissing { player_id: 15 }));
}

#[test]
fn test_armband_only_decision_is_valid() {
    let draft = DecisionDraft {
        captain_id: Some(14),
        vice_captain_id: Some(13),
        reasoning: "Easier fixture for 14".into(),
        ..Default::default()
    };
    let validated = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap();
    assert_eq!(validated.source_squad(), validated.resulting_squad());
    assert!(!validated.has_transfers());
    assert!(validated.advisories().is_empty());
    assert_eq!(validated.gameweek(), gw(5));
}

#[test]
fn test_position_quota_and_budget() {
    let draft = DecisionDraft {
        transfers: vec![swap(5, FWD_PRICEY)],
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r
        == Rejection::PositionCount {
            position: Position::Defender,
            expected: 5,
            actual: 4
        }));
    assert!(report.has(|r| *r
        == Rejection::PositionCount {
            position: Position::Forward,
            expected: 3,
            actual: 4
        }));
    // 10 in the bank + 55 from the sale - 120 = -55
    assert!(report.has(|r| *r == Rejection::OverBudget { bank: 10, shortfall: 55 }));
}

#[test]
fn test_unknown_players() {
    let draft = DecisionDraft {
        transfers: vec![swap(999, DEF_TEAM5), swap(5, 998)],
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::UnknownOutgoing { player_id: 999 }));
    assert!(report.has(|r| *r == Rejection::UnknownIncoming { player_id: 998 }));
}

#[test]
fn test_buying_existing_squad_member() {
    let draft = DecisionDraft {
        transfers: vec![swap(5, 4)],
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::DuplicateAcquisition { player_id: 4 }));
}

#[test]
fn test_buying_same_player_twice() {
    let draft = DecisionDraft {
        transfers: vec![swap(5, DEF_TEAM5), swap(6, DEF_TEAM5)],
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::DuplicateAcquisition { player_id: DEF_TEAM5 }));
}

#[test]
fn test_captain_and_vice_must_differ() {
    let draft = DecisionDraft {
        captain_id: Some(13),
        vice_captain_id: Some(13),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert_eq!(
        report.reasons,
        vec![Rejection::CaptainIsViceCaptain { player_id: 13 }]
    );
}

#[test]
fn test_valid_lineup_order() {
    let draft = DecisionDraft {
        lineup_order: order(&[1, 3, 4, 5, 8, 9, 10, 11, 12, 13, 14], &[2, 6, 7, 15]),
        ..Default::default()
    };
    let validated = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap();
    assert_eq!(validated.lineup_order().map(|o| o.len()), Some(15));
}

#[test]
fn test_formation_needs_three_defenders() {
    let draft = DecisionDraft {
        lineup_order: order(&[1, 3, 4, 8, 9, 10, 11, 12, 13, 14, 15], &[2, 5, 6, 7]),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| matches!(r, Rejection::Formation { .. })));
}

#[test]
fn test_formation_needs_one_starting_keeper() {
    let draft = DecisionDraft {
        lineup_order: order(&[1, 2, 3, 4, 5, 8, 9, 10, 11, 13, 14], &[6, 7, 12, 15]),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| matches!(r, Rejection::Formation { .. })));
}

#[test]
fn test_reserve_keeper_first_on_bench() {
    let draft = DecisionDraft {
        lineup_order: order(&[1, 3, 4, 5, 6, 8, 9, 10, 11, 13, 14], &[7, 2, 12, 15]),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| matches!(r, Rejection::Formation { detail } if detail.contains("bench"))));

    let mut rules = GameRules::default();
    rules.formation.bench_keeper_first = false;
    let draft = DecisionDraft {
        lineup_order: order(&[1, 3, 4, 5, 6, 8, 9, 10, 11, 13, 14], &[7, 2, 12, 15]),
        ..Default::default()
    };
    assert!(RuleValidator::new(rules)
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .is_ok());
}

#[test]
fn test_lineup_with_foreign_player() {
    let mut ids = squad_ids();
    *ids.last_mut().unwrap() = FWD_PRICEY;
    let draft = DecisionDraft {
        lineup_order: Some(ids),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::LineupForeignPlayer { player_id: FWD_PRICEY }));
    assert!(report.has(|r| *r == Rejection::LineupMissing { player_id: 15 }));
}

#[test]
fn test_lineup_with_duplicate() {
    let mut ids = squad_ids();
    *ids.last_mut().unwrap() = 1;
    let draft = DecisionDraft {
        lineup_order: Some(ids),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::LineupDuplicate { player_id: 1 }));
    assert!(report.has(|r| *r == Rejection::LineupMissing { player_id: 15 }));
}

#[test]
fn test_lineup_order_uses_post_transfer_squad() {
    let mut ids = squad_ids();
    let idx = ids.iter().position(|id| *id == 7).unwrap();
    ids[idx] = DEF_TEAM5;
    let draft = DecisionDraft {
        transfers: vec![swap(7, DEF_TEAM5)],
        lineup_order: Some(ids),
        ..Default::default()
    };
    assert!(validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .is_ok());
}

#[test]
fn test_chip_must_be_available() {
    let mut account = snapshot();
    account.chips_available = Some(vec![Chip::Wildcard]);
    let draft = DecisionDraft {
        chip: Chip::BenchBoost,
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &account, &catalog(), gw(5))
        .unwrap_err();
    assert_eq!(
        report.reasons,
        vec![Rejection::ChipUnavailable {
            chip: Chip::BenchBoost
        }]
    );
}

#[test]
fn test_transfer_chip_without_transfers() {
    let draft = DecisionDraft {
        chip: Chip::Wildcard,
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::ChipWithoutTransfers { chip: Chip::Wildcard }));
}

#[test]
fn test_unknown_chip_availability_is_advisory() {
    let mut account = snapshot();
    account.chips_available = None;
    account.bank = None;
    account.free_transfers = None;
    let draft = DecisionDraft {
        chip: Chip::TripleCaptain,
        captain_id: Some(13),
        ..Default::default()
    };
    let validated = validator()
        .validate(draft, &account, &catalog(), gw(5))
        .unwrap();
    assert_eq!(
        validated.advisories(),
        &[Advisory::ChipAvailabilityUnknown {
            chip: Chip::TripleCaptain
        }]
    );
}

#[test]
fn test_injured_starter_is_advisory_not_rejection() {
    let draft = DecisionDraft {
        transfers: vec![swap(9, MID_INJURED)],
        captain_id: Some(MID_INJURED),
        vice_captain_id: Some(13),
        ..Default::default()
    };
    let validated = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap();
    assert!(validated.advisories().contains(&Advisory::StarterUnavailable {
        player_id: MID_INJURED,
        status: Availability::Injured
    }));
    assert!(validated.advisories().contains(&Advisory::CaptainUnavailable {
        player_id: MID_INJURED,
        status: Availability::Injured
    }));
}

#[test]
fn test_extra_transfers_warn_about_points_hit() {
    let draft = DecisionDraft {
        transfers: vec![swap(5, DEF_TEAM5), swap(9, MID_INJURED)],
        ..Default::default()
    };
    let validated = validator()
        .validate(draft.clone(), &snapshot(), &catalog(), gw(5))
        .unwrap();
    assert!(validated.advisories().contains(&Advisory::PointsHit {
        extra_transfers: 1,
        points: 4
    }));

    let wildcard = DecisionDraft {
        chip: Chip::Wildcard,
        ..draft
    };
    let validated = validator()
        .validate(wildcard, &snapshot(), &catalog(), gw(5))
        .unwrap();
    assert!(!validated
        .advisories()
        .iter()
        .any(|a| matches!(a, Advisory::PointsHit { .. })));
}

#[test]
fn test_wrong_squad_size_is_rejected() {
    let mut account = snapshot();
    let entries = account.roster.entries()[..14].to_vec();
    account.roster = squadpilot::domain::entities::roster::Roster::new(entries);
    let report = validator()
        .validate(DecisionDraft::default(), &account, &catalog(), gw(5))
        .unwrap_err();
    assert!(report.has(|r| *r == Rejection::SquadSize { expected: 15, actual: 14 }));
}

#[test]
fn test_report_serializes_reason_kinds() {
    let draft = DecisionDraft {
        transfers: vec![swap(5, DEF_TEAM1)],
        captain_id: Some(5),
        ..Default::default()
    };
    let report = validator()
        .validate(draft, &snapshot(), &catalog(), gw(5))
        .unwrap_err();
    let json = serde_json::to_value(&report).unwrap();
    let kinds: Vec<&str> = json["reasons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["team_limit", "captain_not_in_squad"]);
    assert!(report.to_string().starts_with("2 violation(s) for GW5"));
}
