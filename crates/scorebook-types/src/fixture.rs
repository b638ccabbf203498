//! League fixtures: teams, players and matches.
//!
//! These records belong to the league administration around the engine.
//! The engine keeps just enough of them to scope statistics by league and
//! to enforce match lifecycle rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{LeagueId, MatchId, PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub league_id: LeagueId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
}

/// Lifecycle status of a match.
///
/// `SCHEDULED → IN_PROGRESS → COMPLETED | ABANDONED | CANCELLED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Abandoned,
    Cancelled,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Abandoned => write!(f, "ABANDONED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl MatchStatus {
    /// Completed, abandoned or cancelled.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned | Self::Cancelled)
    }
}

/// A limited-overs match between two teams of one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub league_id: LeagueId,
    pub team1: TeamId,
    pub team2: TeamId,
    pub venue: String,
    pub date: NaiveDate,
    pub status: MatchStatus,
}

impl Match {
    /// Whether `team` plays in this match.
    #[must_use]
    pub fn features(&self, team: TeamId) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// The other side, if `team` plays in this match.
    #[must_use]
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if team == self.team1 {
            Some(self.team2)
        } else if team == self.team2 {
            Some(self.team1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Match {
        Match {
            id: MatchId(1),
            league_id: LeagueId(1),
            team1: TeamId(10),
            team2: TeamId(20),
            venue: "Eden Gardens".into(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            status: MatchStatus::Scheduled,
        }
    }

    #[test]
    fn opponents() {
        let m = fixture();
        assert_eq!(m.opponent_of(TeamId(10)), Some(TeamId(20)));
        assert_eq!(m.opponent_of(TeamId(20)), Some(TeamId(10)));
        assert_eq!(m.opponent_of(TeamId(30)), None);
        assert!(m.features(TeamId(20)));
        assert!(!m.features(TeamId(30)));
    }

    #[test]
    fn terminal_statuses() {
        assert!(!MatchStatus::Scheduled.is_terminal());
        assert!(!MatchStatus::InProgress.is_terminal());
        assert!(MatchStatus::Completed.is_terminal());
        assert!(MatchStatus::Abandoned.is_terminal());
        assert!(MatchStatus::Cancelled.is_terminal());
    }

    #[test]
    fn match_serde_roundtrip() {
        let m = fixture();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"SCHEDULED\""));
        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
