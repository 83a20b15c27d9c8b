use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Availability status as reported for each player in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Doubtful,
    Injured,
    Suspended,
    Unavailable,
}

impl Availability {
    /// Map the remote single-letter status code. Unknown codes are treated as unavailable.
    pub fn from_status_code(code: &str) -> Self {
        match code {
            "a" => Availability::Available,
            "d" => Availability::Doubtful,
            "i" => Availability::Injured,
            "s" => Availability::Suspended,
            _ => Availability::Unavailable,
        }
    }

    /// Statuses that almost certainly mean the player will not feature this gameweek.
    pub fn is_ruled_out(&self) -> bool {
        matches!(self, Availability::Injured | Availability::Suspended)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Doubtful => write!(f, "doubtful"),
            Availability::Injured => write!(f, "injured"),
            Availability::Suspended => write!(f, "suspended"),
            Availability::Unavailable => write!(f, "unavailable"),
        }
    }
}

impl FromStr for Availability {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" | "a" => Ok(Availability::Available),
            "doubtful" | "d" => Ok(Availability::Doubtful),
            "injured" | "i" => Ok(Availability::Injured),
            "suspended" | "s" => Ok(Availability::Suspended),
            "unavailable" | "u" | "n" => Ok(Availability::Unavailable),
            _ => Err(format!("Unknown availability: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Availability::from_status_code("a"), Availability::Available);
        assert_eq!(Availability::from_status_code("i"), Availability::Injured);
        assert_eq!(Availability::from_status_code("n"), Availability::Unavailable);
    }

    #[test]
    fn test_ruled_out() {
        assert!(Availability::Injured.is_ruled_out());
        assert!(Availability::Suspended.is_ruled_out());
        assert!(!Availability::Doubtful.is_ruled_out());
    }
}
