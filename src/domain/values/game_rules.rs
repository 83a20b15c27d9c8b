//! Game-variant rules consumed by validation and planning.
//!
//! Everything that differs between game variants (squad shape, team cap,
//! formation limits, chip names on the wire) lives here so that callers pass
//! it in explicitly instead of relying on module-level constants.

use crate::domain::values::chip::Chip;
use crate::domain::values::position::Position;
use serde::{Deserialize, Serialize};

/// Required number of squad members per position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuota {
    pub keepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl PositionQuota {
    pub fn get(&self, position: Position) -> usize {
        match position {
            Position::Keeper => self.keepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    pub fn total(&self) -> usize {
        self.keepers + self.defenders + self.midfielders + self.forwards
    }
}

/// Constraints on the starting XI when an explicit ordering is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationRules {
    pub keepers: usize,
    pub min_defenders: usize,
    pub min_midfielders: usize,
    pub min_forwards: usize,
    /// The first bench slot must hold the reserve keeper.
    #[serde(default)]
    pub bench_keeper_first: bool,
}

/// Chip names as the remote API expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipApiNames {
    pub wildcard: String,
    pub free_hit: String,
    pub bench_boost: String,
    pub triple_captain: String,
}

impl Default for ChipApiNames {
    fn default() -> Self {
        Self {
            wildcard: "wildcard".into(),
            free_hit: "freehit".into(),
            bench_boost: "bboost".into(),
            triple_captain: "3xc".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    pub squad_size: usize,
    pub starting_size: usize,
    pub quota: PositionQuota,
    pub max_per_team: usize,
    pub formation: FormationRules,
    #[serde(default)]
    pub chip_names: ChipApiNames,
    /// Points deducted for each transfer beyond the free allowance.
    pub transfer_hit_cost: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            squad_size: 15,
            starting_size: 11,
            quota: PositionQuota {
                keepers: 2,
                defenders: 5,
                midfielders: 5,
                forwards: 3,
            },
            max_per_team: 3,
            formation: FormationRules {
                keepers: 1,
                min_defenders: 3,
                min_midfielders: 2,
                min_forwards: 1,
                bench_keeper_first: true,
            },
            chip_names: ChipApiNames::default(),
            transfer_hit_cost: 4,
        }
    }
}

impl GameRules {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let rules: GameRules =
            serde_json::from_str(json).map_err(|e| format!("Invalid rules JSON: {e}"))?;
        rules.check()?;
        Ok(rules)
    }

    /// Internal consistency: quota must add up to the squad size, the XI must fit in it,
    /// and every slot number must fit in a `u8`.
    pub fn check(&self) -> Result<(), String> {
        if self.quota.total() != self.squad_size {
            return Err(format!(
                "Position quota sums to {} but squad size is {}",
                self.quota.total(),
                self.squad_size
            ));
        }
        if self.starting_size == 0 || self.starting_size > self.squad_size {
            return Err(format!(
                "Starting size {} must be between 1 and squad size {}",
                self.starting_size, self.squad_size
            ));
        }
        if self.squad_size > u8::MAX as usize {
            return Err(format!(
                "Squad size {} does not fit a slot number (max {})",
                self.squad_size,
                u8::MAX
            ));
        }
        if self.max_per_team == 0 {
            return Err("max_per_team must be at least 1".into());
        }
        if self.formation.keepers > self.quota.keepers {
            return Err(format!(
                "Formation needs {} starting keepers but the squad only has {}",
                self.formation.keepers, self.quota.keepers
            ));
        }
        Ok(())
    }

    /// Wire name for a chip; `None` for `Chip::None`.
    pub fn chip_api_name(&self, chip: Chip) -> Option<String> {
        let name = match chip {
            Chip::None => return None,
            Chip::Wildcard => &self.chip_names.wildcard,
            Chip::FreeHit => &self.chip_names.free_hit,
            Chip::BenchBoost => &self.chip_names.bench_boost,
            Chip::TripleCaptain => &self.chip_names.triple_captain,
        };
        Some(name.clone())
    }

    /// Reverse mapping from a wire chip name, falling back to the lenient parser.
    pub fn chip_from_api_name(&self, name: &str) -> Option<Chip> {
        let lower = name.to_lowercase();
        Chip::PLAYABLE
            .into_iter()
            .find(|c| self.chip_api_name(*c).as_deref() == Some(lower.as_str()))
            .or_else(|| lower.parse::<Chip>().ok().filter(|c| !c.is_none()))
    }

    /// 1-based squad slot number that is the first bench slot.
    pub fn first_bench_slot(&self) -> u8 {
        (self.starting_size + 1) as u8
    }
}
