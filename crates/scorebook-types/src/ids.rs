//! Identifiers used throughout Scorebook.
//!
//! Entities owned by the surrounding league administration (players, teams,
//! matches, innings, leagues) are addressed by plain `u64` keys. Ledger
//! records use UUIDv7 so they sort in recording order.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// DeliveryId
// ---------------------------------------------------------------------------

/// Unique identifier of a recorded delivery. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DeliveryId(pub Uuid);

impl DeliveryId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for DeliveryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Numeric entity keys
// ---------------------------------------------------------------------------

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            #[must_use]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

numeric_id!(
    /// A registered player.
    PlayerId,
    "player"
);
numeric_id!(
    /// A registered team.
    TeamId,
    "team"
);
numeric_id!(
    /// A scheduled match.
    MatchId,
    "match"
);
numeric_id!(
    /// One innings of a match. Innings ids increase in creation order.
    InningsId,
    "innings"
);
numeric_id!(
    /// A league (tournament) grouping teams and matches.
    LeagueId,
    "league"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_id_uniqueness() {
        let a = DeliveryId::new();
        let b = DeliveryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn delivery_id_ordering() {
        let a = DeliveryId::new();
        let b = DeliveryId::new();
        assert!(a < b);
    }

    #[test]
    fn numeric_ids_display_with_prefix() {
        assert_eq!(PlayerId(7).to_string(), "player:7");
        assert_eq!(InningsId(2).to_string(), "innings:2");
        assert_eq!(LeagueId(1).to_string(), "league:1");
    }

    #[test]
    fn numeric_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
        let back: TeamId = serde_json::from_str("9").unwrap();
        assert_eq!(back, TeamId(9));
    }

    #[test]
    fn numeric_ids_order_by_value() {
        assert!(PlayerId(1) < PlayerId(2));
        assert!(InningsId(10) > InningsId(9));
    }
}
