//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{ScorebookError, constants};

/// How award selection resolves equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Lowest player (or team) id wins.
    #[default]
    LowestPlayerId,
    /// First candidate in iteration order wins. Candidates are iterated in
    /// registration order, so this reproduces the legacy selection.
    FirstEncountered,
}

/// Format and award parameters for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overs per innings in this limited-overs format.
    pub match_over_limit: u32,
    /// Wickets that end an innings.
    pub max_wickets: u32,
    /// Entries kept on each cap leaderboard.
    pub leaderboard_size: usize,
    /// Award points per run scored.
    pub run_points: u32,
    /// Award points per wicket taken.
    pub wicket_points: u32,
    pub tie_break: TieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_over_limit: constants::DEFAULT_MATCH_OVER_LIMIT,
            max_wickets: constants::DEFAULT_MAX_WICKETS,
            leaderboard_size: constants::DEFAULT_LEADERBOARD_SIZE,
            run_points: constants::DEFAULT_RUN_POINTS,
            wicket_points: constants::DEFAULT_WICKET_POINTS,
            tie_break: TieBreak::default(),
        }
    }
}

impl EngineConfig {
    /// A T20 configuration with a different over limit.
    #[must_use]
    pub fn with_over_limit(match_over_limit: u32) -> Self {
        Self {
            match_over_limit,
            ..Self::default()
        }
    }

    /// Legal balls available to one innings.
    #[must_use]
    pub fn balls_per_innings(&self) -> u32 {
        self.match_over_limit
            .saturating_mul(constants::BALLS_PER_OVER)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ScorebookError> {
        if self.match_over_limit == 0 {
            return Err(ScorebookError::Configuration(
                "match_over_limit must be > 0".to_string(),
            ));
        }
        if self
            .match_over_limit
            .checked_mul(constants::BALLS_PER_OVER)
            .is_none()
        {
            return Err(ScorebookError::Configuration(format!(
                "match_over_limit must be <= {}",
                u32::MAX / constants::BALLS_PER_OVER
            )));
        }
        if self.max_wickets == 0 {
            return Err(ScorebookError::Configuration(
                "max_wickets must be > 0".to_string(),
            ));
        }
        if self.leaderboard_size == 0 {
            return Err(ScorebookError::Configuration(
                "leaderboard_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
