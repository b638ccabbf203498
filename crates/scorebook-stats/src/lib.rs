//! # scorebook-stats
//!
//! **Pure deterministic statistics over the delivery ledger.**
//!
//! This crate is the compute plane: it takes ordered deliveries and innings
//! totals and derives every figure the engine publishes. It has:
//!
//! - **Zero side effects**: no store access, no locking, no status checks
//! - **Deterministic output**: the same ledger gives the same figures and digests
//! - **Explicit innings boundaries**: player streams are sorted by innings before folding
//! - **Explicit tie-breaks**: every award selection takes a [`TieBreak`](scorebook_types::TieBreak)

pub mod aggregator;
pub mod awards;
pub mod digest;
pub mod player;
pub mod rates;
pub mod result;

pub use aggregator::aggregate_innings;
pub use awards::{
    batting_leaderboard, bowling_leaderboard, century_makers, five_wicket_haul_takers,
    man_of_the_match, match_points, rank_by, season_points, select_best,
};
pub use digest::{
    compute_ledger_root, compute_scorecard_digest, compute_totals_digest, seal_scorecard,
    verify_scorecard,
};
pub use player::{batting_stats, bowling_stats};
pub use rates::{current_run_rate, net_run_rate, over_progression, partnership, required_run_rate};
pub use result::{MatchResult, build_scorecard, decide_result, match_statistics};
