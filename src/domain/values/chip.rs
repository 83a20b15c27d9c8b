use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chip selection for a gameweek. `None` means no chip is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chip {
    #[default]
    None,
    Wildcard,
    FreeHit,
    BenchBoost,
    TripleCaptain,
}

/// Which remote mutation a chip has to travel with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipScope {
    Transfer,
    Lineup,
}

impl Chip {
    pub const PLAYABLE: [Chip; 4] = [
        Chip::Wildcard,
        Chip::FreeHit,
        Chip::BenchBoost,
        Chip::TripleCaptain,
    ];

    pub fn scope(&self) -> Option<ChipScope> {
        match self {
            Chip::None => None,
            Chip::Wildcard | Chip::FreeHit => Some(ChipScope::Transfer),
            Chip::BenchBoost | Chip::TripleCaptain => Some(ChipScope::Lineup),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Chip::None)
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chip::None => write!(f, "none"),
            Chip::Wildcard => write!(f, "wildcard"),
            Chip::FreeHit => write!(f, "free_hit"),
            Chip::BenchBoost => write!(f, "bench_boost"),
            Chip::TripleCaptain => write!(f, "triple_captain"),
        }
    }
}

impl FromStr for Chip {
    type Err = String;

    /// Lenient on spelling: case, spaces and hyphens are normalized, and the
    /// remote API's short names are accepted alongside the descriptive ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "" | "none" | "null" => Ok(Chip::None),
            "wildcard" | "wild_card" => Ok(Chip::Wildcard),
            "free_hit" | "freehit" => Ok(Chip::FreeHit),
            "bench_boost" | "bboost" => Ok(Chip::BenchBoost),
            "triple_captain" | "3xc" => Ok(Chip::TripleCaptain),
            _ => Err(format!("Unknown chip: {s}")),
        }
    }
}
