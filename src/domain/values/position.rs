use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Squad position category. Ordered keeper-first, matching the game's element types 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Keeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Keeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Map the remote API's numeric element type.
    pub fn from_element_type(element_type: u8) -> Option<Self> {
        match element_type {
            1 => Some(Position::Keeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Position::Keeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Keeper => write!(f, "keeper"),
            Position::Defender => write!(f, "defender"),
            Position::Midfielder => write!(f, "midfielder"),
            Position::Forward => write!(f, "forward"),
        }
    }
}

impl FromStr for Position {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keeper" | "goalkeeper" | "gk" | "gkp" => Ok(Position::Keeper),
            "defender" | "def" => Ok(Position::Defender),
            "midfielder" | "mid" => Ok(Position::Midfielder),
            "forward" | "fwd" => Ok(Position::Forward),
            _ => Err(format!("Unknown position: {s}")),
        }
    }
}
