//! Innings model and its derived totals.
//!
//! Totals are never edited by hand: they are rebuilt from the ledger after
//! every recorded or undone delivery.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{InningsId, MatchId, TeamId, numeric};

/// Lifecycle status of an innings.
///
/// `NOT_STARTED → IN_PROGRESS → COMPLETED | DECLARED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InningsStatus {
    NotStarted,
    InProgress,
    Completed,
    Declared,
}

impl std::fmt::Display for InningsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NOT_STARTED"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Declared => write!(f, "DECLARED"),
        }
    }
}

impl InningsStatus {
    /// Completed or declared.
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Declared)
    }
}

/// Extras conceded in an innings, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasBreakdown {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub penalties: u32,
}

impl ExtrasBreakdown {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.penalties
    }
}

/// Aggregate figures folded from an innings' deliveries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsTotals {
    /// Runs off the bat plus extras.
    pub runs: u32,
    pub wickets: u32,
    /// Deliveries that were neither wides nor no-balls.
    pub legal_balls: u32,
    /// Every recorded delivery, legal or not.
    pub deliveries: u32,
    /// `legal_balls / 6` as a decimal fraction, two places.
    pub overs: Decimal,
    pub extras: ExtrasBreakdown,
}

impl InningsTotals {
    /// `over.ball` display form of the legal-ball count.
    #[must_use]
    pub fn overs_notation(&self) -> String {
        numeric::overs_notation(self.legal_balls)
    }

    /// Current run rate, rounded.
    #[must_use]
    pub fn run_rate(&self) -> Decimal {
        numeric::runs_per_over(self.runs, self.legal_balls)
    }
}

/// One team's batting innings within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    pub id: InningsId,
    pub match_id: MatchId,
    pub batting_team: TeamId,
    pub bowling_team: TeamId,
    /// 1-based innings number within the match.
    pub number: u8,
    pub status: InningsStatus,
    pub totals: InningsTotals,
}

impl Innings {
    /// A freshly opened innings with empty totals.
    #[must_use]
    pub fn open(
        id: InningsId,
        match_id: MatchId,
        batting_team: TeamId,
        bowling_team: TeamId,
        number: u8,
    ) -> Self {
        Self {
            id,
            match_id,
            batting_team,
            bowling_team,
            number,
            status: InningsStatus::InProgress,
            totals: InningsTotals::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(InningsStatus::NotStarted.to_string(), "NOT_STARTED");
        assert_eq!(InningsStatus::Declared.to_string(), "DECLARED");
    }

    #[test]
    fn closed_statuses() {
        assert!(!InningsStatus::InProgress.is_closed());
        assert!(!InningsStatus::NotStarted.is_closed());
        assert!(InningsStatus::Completed.is_closed());
        assert!(InningsStatus::Declared.is_closed());
    }

    #[test]
    fn totals_display_helpers() {
        let totals = InningsTotals {
            runs: 45,
            legal_balls: 27,
            ..InningsTotals::default()
        };
        assert_eq!(totals.overs_notation(), "4.3");
        assert_eq!(totals.run_rate(), Decimal::new(10, 0));
    }

    #[test]
    fn opened_innings_is_in_progress() {
        let innings = Innings::open(InningsId(1), MatchId(1), TeamId(1), TeamId(2), 1);
        assert_eq!(innings.status, InningsStatus::InProgress);
        assert_eq!(innings.totals, InningsTotals::default());
    }

    #[test]
    fn status_wire_names() {
        let json = serde_json::to_string(&InningsStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
