//! Decision drafts and their validated form.
//!
//! A [`DecisionDraft`] is whatever the reasoning service produced, decoded
//! loosely and trusted for nothing. A [`ValidatedDecision`] can only be built
//! by the rule validator, so any code that takes one knows every field has
//! been checked against a specific roster snapshot and gameweek.

use crate::domain::entities::player::PlayerId;
use crate::domain::values::chip::Chip;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::validation::Advisory;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPair {
    pub element_out: PlayerId,
    pub element_in: PlayerId,
}

/// Unvalidated candidate decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionDraft {
    /// Order matters for sequencing and audit, not for legality.
    #[serde(default)]
    pub transfers: Vec<TransferPair>,
    #[serde(default)]
    pub captain_id: Option<PlayerId>,
    #[serde(default)]
    pub vice_captain_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "lenient_chip")]
    pub chip: Chip,
    #[serde(default)]
    pub lineup_order: Option<Vec<PlayerId>>,
    #[serde(default, alias = "rationale")]
    pub reasoning: String,
}

impl DecisionDraft {
    /// Decode a draft from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {e}"))?;
        if !value.is_object() {
            return Err("Expected a JSON object".into());
        }
        serde_json::from_value(value).map_err(|e| format!("Invalid decision: {e}"))
    }
}

fn lenient_chip<'de, D>(deserializer: D) -> Result<Chip, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(Chip::None),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Marker that only the validator can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidationProof(());

impl ValidationProof {
    pub(crate) fn issue() -> Self {
        ValidationProof(())
    }
}

/// A draft that passed every hard rule for one roster snapshot and gameweek.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedDecision {
    gameweek: Gameweek,
    transfers: Vec<TransferPair>,
    captain_id: Option<PlayerId>,
    vice_captain_id: Option<PlayerId>,
    chip: Chip,
    lineup_order: Option<Vec<PlayerId>>,
    reasoning: String,
    /// Membership of the roster the draft was validated against, ascending.
    source_squad: Vec<PlayerId>,
    /// Membership after applying the transfers, ascending.
    resulting_squad: Vec<PlayerId>,
    advisories: Vec<Advisory>,
    #[serde(skip)]
    _proof: ValidationProof,
}

impl ValidatedDecision {
    pub(crate) fn new(
        gameweek: Gameweek,
        draft: DecisionDraft,
        mut source_squad: Vec<PlayerId>,
        mut resulting_squad: Vec<PlayerId>,
        advisories: Vec<Advisory>,
        proof: ValidationProof,
    ) -> Self {
        source_squad.sort_unstable();
        resulting_squad.sort_unstable();
        Self {
            gameweek,
            transfers: draft.transfers,
            captain_id: draft.captain_id,
            vice_captain_id: draft.vice_captain_id,
            chip: draft.chip,
            lineup_order: draft.lineup_order,
            reasoning: draft.reasoning,
            source_squad,
            resulting_squad,
            advisories,
            _proof: proof,
        }
    }

    pub fn gameweek(&self) -> Gameweek {
        self.gameweek
    }

    pub fn transfers(&self) -> &[TransferPair] {
        &self.transfers
    }

    pub fn has_transfers(&self) -> bool {
        !self.transfers.is_empty()
    }

    pub fn captain_id(&self) -> Option<PlayerId> {
        self.captain_id
    }

    pub fn vice_captain_id(&self) -> Option<PlayerId> {
        self.vice_captain_id
    }

    pub fn chip(&self) -> Chip {
        self.chip
    }

    pub fn lineup_order(&self) -> Option<&[PlayerId]> {
        self.lineup_order.as_deref()
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn source_squad(&self) -> &[PlayerId] {
        &self.source_squad
    }

    pub fn resulting_squad(&self) -> &[PlayerId] {
        &self.resulting_squad
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}
