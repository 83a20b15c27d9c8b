use crate::domain::entities::decision::ValidatedDecision;
use crate::domain::entities::player::PlayerId;
use crate::domain::entities::roster::Roster;
use crate::domain::error::DomainError;
use crate::domain::values::chip::ChipScope;
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::lineup::{LineupMutation, LineupPick};

/// Builds the full lineup submission from a validated decision and the
/// post-transfer roster.
pub struct LineupPlanner {
    rules: GameRules,
}

impl LineupPlanner {
    pub fn new(rules: GameRules) -> Self {
        Self { rules }
    }

    /// `roster` must be the state after any transfers were committed. With an
    /// explicit ordering, slots follow it positionally; without one, every
    /// slot is carried over and only the armbands change.
    pub fn plan(
        &self,
        validated: &ValidatedDecision,
        roster: &Roster,
    ) -> Result<LineupMutation, DomainError> {
        if roster.membership() != validated.resulting_squad() {
            return Err(DomainError::StaleSnapshot(format!(
                "squad for {} does not match the validated result: expected {:?}, found {:?}",
                validated.gameweek(),
                validated.resulting_squad(),
                roster.membership()
            )));
        }

        let (captain, vice) = resolve_armbands(validated, roster);
        let pick = |player_id: PlayerId, slot: u8| LineupPick {
            player_id,
            slot,
            is_captain: Some(player_id) == captain,
            is_vice_captain: Some(player_id) == vice,
        };

        let picks = match validated.lineup_order() {
            Some(order) => order
                .iter()
                .enumerate()
                .map(|(idx, id)| pick(*id, (idx + 1) as u8))
                .collect(),
            None => roster
                .entries()
                .iter()
                .map(|e| pick(e.player_id, e.slot))
                .collect(),
        };

        let chip = match validated.chip().scope() {
            Some(ChipScope::Lineup) => self.rules.chip_api_name(validated.chip()),
            _ => None,
        };

        Ok(LineupMutation { picks, chip })
    }
}

/// Decision armbands win; an armband the decision leaves unset keeps its
/// current holder, swapping with the other armband if they would collide.
fn resolve_armbands(
    validated: &ValidatedDecision,
    roster: &Roster,
) -> (Option<PlayerId>, Option<PlayerId>) {
    let current_captain = roster.captain();
    let current_vice = roster.vice_captain();

    match (validated.captain_id(), validated.vice_captain_id()) {
        (Some(captain), Some(vice)) => (Some(captain), Some(vice)),
        (Some(captain), None) => {
            let vice = if current_vice == Some(captain) {
                current_captain.filter(|c| *c != captain)
            } else {
                current_vice
            };
            (Some(captain), vice)
        }
        (None, Some(vice)) => {
            let captain = if current_captain == Some(vice) {
                current_vice.filter(|v| *v != vice)
            } else {
                current_captain
            };
            (captain, Some(vice))
        }
        (None, None) => (current_captain, current_vice),
    }
}
