//! Rule validation: the only way to turn a [`DecisionDraft`] into a
//! [`ValidatedDecision`].
//!
//! Validation is pure: no I/O, no clock, no randomness. The same draft,
//! account snapshot, catalog and gameweek always give the same answer.

use std::collections::{BTreeMap, HashSet};

use crate::domain::entities::decision::{DecisionDraft, ValidatedDecision, ValidationProof};
use crate::domain::entities::player::{Catalog, PlayerId, TeamId};
use crate::domain::entities::roster::AccountSnapshot;
use crate::domain::values::chip::{Chip, ChipScope};
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::position::Position;
use crate::domain::values::validation::{Advisory, Rejection, RejectionReport};

pub struct RuleValidator {
    rules: GameRules,
}

impl RuleValidator {
    pub fn new(rules: GameRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Check `draft` against the account's current squad and the catalog.
    ///
    /// Every hard violation found is reported, not just the first one.
    pub fn validate(
        &self,
        draft: DecisionDraft,
        account: &AccountSnapshot,
        catalog: &Catalog,
        gameweek: Gameweek,
    ) -> Result<ValidatedDecision, RejectionReport> {
        let mut reasons = Vec::new();
        let mut advisories = Vec::new();
        let roster = &account.roster;

        if roster.len() != self.rules.squad_size {
            reasons.push(Rejection::SquadSize {
                expected: self.rules.squad_size,
                actual: roster.len(),
            });
        }

        // Slot order is kept: an incoming player takes the outgoing player's slot.
        let squad = self.apply_transfers(&draft, roster.ids(), catalog, &mut reasons);

        self.check_composition(&squad, catalog, &mut reasons);
        self.check_armband(&draft, &squad, &mut reasons);
        let lineup_ok = self.check_lineup(&draft, &squad, catalog, &mut reasons);
        self.check_chip(&draft, account, &mut reasons, &mut advisories);
        self.check_budget(&draft, account, catalog, &mut reasons);

        self.collect_advisories(&draft, &squad, lineup_ok, account, catalog, &mut advisories);

        if !reasons.is_empty() {
            return Err(RejectionReport {
                gameweek,
                reasons,
                advisories,
            });
        }

        Ok(ValidatedDecision::new(
            gameweek,
            draft,
            roster.membership(),
            squad,
            advisories,
            ValidationProof::issue(),
        ))
    }

    fn apply_transfers(
        &self,
        draft: &DecisionDraft,
        mut squad: Vec<PlayerId>,
        catalog: &Catalog,
        reasons: &mut Vec<Rejection>,
    ) -> Vec<PlayerId> {
        // Outgoing players must come from the roster as fetched, not from earlier
        // acquisitions in the same batch.
        let original = squad.clone();
        for pair in &draft.transfers {
            let out_idx = if original.contains(&pair.element_out) {
                squad.iter().position(|id| *id == pair.element_out)
            } else {
                None
            };
            if out_idx.is_none() {
                reasons.push(Rejection::UnknownOutgoing {
                    player_id: pair.element_out,
                });
            }

            let incoming_ok = if !catalog.contains(pair.element_in) {
                reasons.push(Rejection::UnknownIncoming {
                    player_id: pair.element_in,
                });
                false
            } else if squad.contains(&pair.element_in) {
                reasons.push(Rejection::DuplicateAcquisition {
                    player_id: pair.element_in,
                });
                false
            } else {
                true
            };

            if let (Some(idx), true) = (out_idx, incoming_ok) {
                squad[idx] = pair.element_in;
            }
        }
        squad
    }

    fn check_composition(&self, squad: &[PlayerId], catalog: &Catalog, reasons: &mut Vec<Rejection>) {
        let mut per_team: BTreeMap<TeamId, usize> = BTreeMap::new();
        let mut per_position: BTreeMap<Position, usize> = BTreeMap::new();

        for id in squad {
            match catalog.get(*id) {
                Some(player) => {
                    *per_team.entry(player.team_id).or_default() += 1;
                    *per_position.entry(player.position).or_default() += 1;
                }
                None => reasons.push(Rejection::UnknownSquadMember { player_id: *id }),
            }
        }

        for (team_id, count) in per_team {
            if count > self.rules.max_per_team {
                reasons.push(Rejection::TeamLimit {
                    team_id,
                    count,
                    limit: self.rules.max_per_team,
                });
            }
        }

        // Per-position counts only mean something for a full-size squad.
        if squad.len() != self.rules.squad_size {
            return;
        }
        for position in Position::ALL {
            let expected = self.rules.quota.get(position);
            let actual = per_position.get(&position).copied().unwrap_or(0);
            if actual != expected {
                reasons.push(Rejection::PositionCount {
                    position,
                    expected,
                    actual,
                });
            }
        }
    }

    fn check_armband(&self, draft: &DecisionDraft, squad: &[PlayerId], reasons: &mut Vec<Rejection>) {
        if let Some(captain) = draft.captain_id {
            if !squad.contains(&captain) {
                reasons.push(Rejection::CaptainNotInSquad { player_id: captain });
            }
        }
        if let Some(vice) = draft.vice_captain_id {
            if !squad.contains(&vice) {
                reasons.push(Rejection::ViceCaptainNotInSquad { player_id: vice });
            }
        }
        if let (Some(captain), Some(vice)) = (draft.captain_id, draft.vice_captain_id) {
            if captain == vice {
                reasons.push(Rejection::CaptainIsViceCaptain { player_id: captain });
            }
        }
    }

    /// Returns true when an ordering was supplied and is a valid permutation.
    fn check_lineup(
        &self,
        draft: &DecisionDraft,
        squad: &[PlayerId],
        catalog: &Catalog,
        reasons: &mut Vec<Rejection>,
    ) -> bool {
        let Some(order) = draft.lineup_order.as_deref() else {
            return false;
        };
        let before = reasons.len();

        if order.len() != self.rules.squad_size {
            reasons.push(Rejection::LineupLength {
                expected: self.rules.squad_size,
                actual: order.len(),
            });
        }

        let mut seen = HashSet::new();
        for id in order {
            if !squad.contains(id) {
                reasons.push(Rejection::LineupForeignPlayer { player_id: *id });
            } else if !seen.insert(*id) {
                reasons.push(Rejection::LineupDuplicate { player_id: *id });
            }
        }
        for id in squad {
            if !order.contains(id) {
                reasons.push(Rejection::LineupMissing { player_id: *id });
            }
        }

        if reasons.len() != before {
            return false;
        }
        if let Some(detail) = self.formation_violation(order, catalog) {
            reasons.push(Rejection::Formation { detail });
            return false;
        }
        true
    }

    fn formation_violation(&self, order: &[PlayerId], catalog: &Catalog) -> Option<String> {
        let formation = &self.rules.formation;
        let (starters, bench) = order.split_at(self.rules.starting_size.min(order.len()));

        let count = |position: Position| {
            starters
                .iter()
                .filter(|id| catalog.get(**id).map(|p| p.position) == Some(position))
                .count()
        };

        let keepers = count(Position::Keeper);
        if keepers != formation.keepers {
            return Some(format!(
                "starting XI has {keepers} keepers, expected {}",
                formation.keepers
            ));
        }
        let minimums = [
            (Position::Defender, formation.min_defenders),
            (Position::Midfielder, formation.min_midfielders),
            (Position::Forward, formation.min_forwards),
        ];
        for (position, min) in minimums {
            let actual = count(position);
            if actual < min {
                return Some(format!(
                    "starting XI has {actual} {position}s, at least {min} required"
                ));
            }
        }

        let reserve_keepers = self.rules.quota.keepers.saturating_sub(formation.keepers);
        if formation.bench_keeper_first && reserve_keepers > 0 {
            let first_bench = bench.first().and_then(|id| catalog.get(*id));
            if first_bench.map(|p| p.position) != Some(Position::Keeper) {
                return Some("first bench slot must be the reserve keeper".into());
            }
        }
        None
    }

    fn check_chip(
        &self,
        draft: &DecisionDraft,
        account: &AccountSnapshot,
        reasons: &mut Vec<Rejection>,
        advisories: &mut Vec<Advisory>,
    ) {
        let chip = draft.chip;
        if chip.is_none() {
            return;
        }
        if chip.scope() == Some(ChipScope::Transfer) && draft.transfers.is_empty() {
            reasons.push(Rejection::ChipWithoutTransfers { chip });
        }
        match &account.chips_available {
            Some(available) if !available.contains(&chip) => {
                reasons.push(Rejection::ChipUnavailable { chip });
            }
            Some(_) => {}
            None => advisories.push(Advisory::ChipAvailabilityUnknown { chip }),
        }
    }

    /// Skipped when the bank or any outgoing price is unknown; the remote side
    /// still enforces the budget in that case.
    fn check_budget(
        &self,
        draft: &DecisionDraft,
        account: &AccountSnapshot,
        catalog: &Catalog,
        reasons: &mut Vec<Rejection>,
    ) {
        let Some(bank) = account.bank else {
            return;
        };
        let mut balance = bank as i64;
        for pair in &draft.transfers {
            let sell = account
                .roster
                .get(pair.element_out)
                .and_then(|e| e.selling_price.or(e.purchase_price));
            let buy = catalog.get(pair.element_in).map(|p| p.cost);
            match (sell, buy) {
                (Some(sell), Some(buy)) => balance += sell as i64 - buy as i64,
                _ => return,
            }
        }
        if balance < 0 {
            reasons.push(Rejection::OverBudget {
                bank,
                shortfall: balance.unsigned_abs() as u32,
            });
        }
    }

    fn collect_advisories(
        &self,
        draft: &DecisionDraft,
        squad: &[PlayerId],
        lineup_ok: bool,
        account: &AccountSnapshot,
        catalog: &Catalog,
        advisories: &mut Vec<Advisory>,
    ) {
        let starters: &[PlayerId] = match draft.lineup_order.as_deref() {
            Some(order) if lineup_ok => order,
            _ => squad,
        };
        for id in starters.iter().take(self.rules.starting_size) {
            if let Some(player) = catalog.get(*id) {
                if player.status.is_ruled_out() {
                    advisories.push(Advisory::StarterUnavailable {
                        player_id: *id,
                        status: player.status,
                    });
                }
            }
        }

        if let Some(captain) = draft.captain_id.and_then(|id| catalog.get(id)) {
            if captain.status.is_ruled_out() {
                advisories.push(Advisory::CaptainUnavailable {
                    player_id: captain.id,
                    status: captain.status,
                });
            }
        }

        let unlimited = matches!(draft.chip, Chip::Wildcard | Chip::FreeHit);
        if let (Some(free), false) = (account.free_transfers, unlimited) {
            let made = draft.transfers.len() as u32;
            if made > free {
                let extra = made - free;
                advisories.push(Advisory::PointsHit {
                    extra_transfers: extra,
                    points: extra * self.rules.transfer_hit_cost,
                });
            }
        }
    }
}
