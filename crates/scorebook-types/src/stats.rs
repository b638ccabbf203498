//! Derived statistic records returned to callers.
//!
//! Every rate and average here is already rounded to two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MatchId, PlayerId, TeamId};

/// Cumulative batting figures for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingStats {
    pub player_id: PlayerId,
    /// Runs off the bat across every delivery faced.
    pub total_runs: u32,
    /// Legal balls faced.
    pub balls_faced: u32,
    /// Distinct innings batted in.
    pub innings: u32,
    /// `total_runs / balls_faced`.
    pub average: Decimal,
    /// `total_runs / balls_faced * 100`.
    pub strike_rate: Decimal,
    pub fours: u32,
    pub sixes: u32,
    pub centuries: u32,
    pub half_centuries: u32,
    pub highest_score: u32,
}

/// Cumulative bowling figures for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingStats {
    pub player_id: PlayerId,
    /// Runs off the bat plus wides and no-balls.
    pub runs_conceded: u32,
    /// Legal balls bowled.
    pub balls_bowled: u32,
    /// Distinct innings bowled in.
    pub innings: u32,
    pub overs: Decimal,
    pub wickets: u32,
    /// `runs_conceded / overs`.
    pub economy: Decimal,
    /// `runs_conceded / wickets`.
    pub average: Decimal,
    pub five_wicket_hauls: u32,
}

/// Runs added by two batters until either is dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub batter_a: PlayerId,
    pub batter_b: PlayerId,
    pub runs: u32,
    /// Legal balls faced while the partnership stood.
    pub balls: u32,
    pub strike_rate: Decimal,
    /// Still unbroken at the end of the ledger.
    pub active: bool,
}

/// Position of an innings within its overs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverProgression {
    pub total_deliveries: u32,
    pub legal_balls: u32,
    /// 0-based over the next delivery belongs to.
    pub current_over: u32,
    /// 1-based ball number of the next delivery.
    pub next_ball: u32,
    pub overs_completed: u32,
    pub balls_in_current_over: u32,
}

/// Live line for one batting side in a match summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingSideSummary {
    pub team_id: TeamId,
    pub runs: u32,
    pub wickets: u32,
    pub overs: Decimal,
    pub run_rate: Decimal,
}

/// Live summary of a match: both batting sides and the chase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub match_id: MatchId,
    pub sides: Vec<BattingSideSummary>,
    /// First innings runs + 1, once a second innings exists.
    pub target: Option<u32>,
    pub required_run_rate: Option<Decimal>,
}

/// A team's batting aggregates across a league.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_id: TeamId,
    pub total_runs: u32,
    pub total_wickets: u32,
    pub total_legal_balls: u32,
    pub total_overs: Decimal,
    /// Runs per wicket lost.
    pub average: Decimal,
    pub run_rate: Decimal,
}

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    /// Ties, abandoned matches and completed matches without a result.
    pub no_result: u32,
    pub points: u32,
    pub net_run_rate: Decimal,
    pub stats: TeamStats,
}

/// Award points accumulated by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub player_id: PlayerId,
    pub points: u32,
}

/// A player's figures labelled with names for leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine<S> {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: String,
    pub stats: S,
}

/// League-level individual awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentAwards {
    /// Top run scorer.
    pub orange_cap: Option<PlayerLine<BattingStats>>,
    /// Top wicket taker.
    pub purple_cap: Option<PlayerLine<BowlingStats>>,
    pub most_valuable: Option<PlayerLine<PlayerPoints>>,
}

/// A team singled out by a league aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAward {
    pub team_id: TeamId,
    pub team_name: String,
    pub value: u32,
}

/// League-level team awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAwards {
    /// Highest aggregate batting runs.
    pub best_batting: Option<TeamAward>,
    /// Highest aggregate wickets taken.
    pub best_bowling: Option<TeamAward>,
}
