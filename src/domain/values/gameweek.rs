use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one scoring round. All idempotency checks are scoped by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gameweek(u32);

impl Gameweek {
    pub fn new(value: u32) -> Result<Self, String> {
        if value == 0 {
            return Err("Gameweek must be at least 1".to_string());
        }
        Ok(Gameweek(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The preceding gameweek, if any.
    pub fn previous(&self) -> Option<Gameweek> {
        if self.0 > 1 {
            Some(Gameweek(self.0 - 1))
        } else {
            None
        }
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GW{}", self.0)
    }
}
