//! Scorecard snapshot: the materialised view of a match.
//!
//! A scorecard is rebuilt in full from innings totals after every ledger
//! mutation and on match completion. It is never patched or edited.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{InningsTotals, MatchId, PlayerId, TeamId, numeric};

/// One team's batting line on the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLine {
    pub team_id: TeamId,
    pub runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    pub overs: Decimal,
}

impl TeamLine {
    /// A team that has not batted yet.
    #[must_use]
    pub fn yet_to_bat(team_id: TeamId) -> Self {
        Self {
            team_id,
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            overs: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn from_totals(team_id: TeamId, totals: &InningsTotals) -> Self {
        Self {
            team_id,
            runs: totals.runs,
            wickets: totals.wickets,
            legal_balls: totals.legal_balls,
            overs: numeric::overs_from_balls(totals.legal_balls),
        }
    }
}

/// How a completed match was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "margin", rename_all = "snake_case")]
pub enum WinMargin {
    /// Side batting first defended its total by this many runs.
    Runs(u32),
    /// Chasing side passed the target with this many wickets in hand.
    Wickets(u32),
    Tie,
}

impl std::fmt::Display for WinMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Runs(1) => write!(f, "1 run"),
            Self::Runs(n) => write!(f, "{n} runs"),
            Self::Wickets(1) => write!(f, "1 wicket"),
            Self::Wickets(n) => write!(f, "{n} wickets"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Cached projection of both innings plus the match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub match_id: MatchId,
    pub team1: TeamLine,
    pub team2: TeamLine,
    pub winning_team: Option<TeamId>,
    pub win_margin: Option<WinMargin>,
    pub man_of_the_match: Option<PlayerId>,
    /// Hex SHA-256 fingerprint over every field above.
    pub digest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_display() {
        assert_eq!(WinMargin::Runs(1).to_string(), "1 run");
        assert_eq!(WinMargin::Runs(23).to_string(), "23 runs");
        assert_eq!(WinMargin::Wickets(4).to_string(), "4 wickets");
        assert_eq!(WinMargin::Tie.to_string(), "tie");
    }

    #[test]
    fn margin_wire_shape() {
        let json = serde_json::to_string(&WinMargin::Wickets(6)).unwrap();
        assert_eq!(json, r#"{"by":"wickets","margin":6}"#);
        let tie = serde_json::to_string(&WinMargin::Tie).unwrap();
        assert_eq!(tie, r#"{"by":"tie"}"#);
    }

    #[test]
    fn team_line_from_totals() {
        let totals = InningsTotals {
            runs: 150,
            wickets: 6,
            legal_balls: 117,
            ..InningsTotals::default()
        };
        let line = TeamLine::from_totals(TeamId(2), &totals);
        assert_eq!(line.runs, 150);
        assert_eq!(line.overs, Decimal::new(195, 1));
    }
}
