//! # scorebook-types
//!
//! Shared types, errors, and configuration for the **Scorebook** delivery
//! ledger and statistics engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`DeliveryId`], [`PlayerId`], [`TeamId`], [`MatchId`], [`InningsId`], [`LeagueId`]
//! - **Delivery model**: [`DeliveryInput`], [`Delivery`], [`BallPosition`], [`ExtraKind`], [`WicketKind`]
//! - **Innings model**: [`Innings`], [`InningsStatus`], [`InningsTotals`], [`ExtrasBreakdown`]
//! - **Fixtures**: [`Match`], [`MatchStatus`], [`Team`], [`Player`]
//! - **Scorecard**: [`Scorecard`], [`TeamLine`], [`WinMargin`]
//! - **Statistics**: [`BattingStats`], [`BowlingStats`], [`Partnership`], [`Standing`], awards
//! - **Configuration**: [`EngineConfig`], [`TieBreak`]
//! - **Errors**: [`ScorebookError`] with `SB_ERR_` prefix codes
//! - **Numerics**: two-decimal rate helpers in [`numeric`]
//! - **Constants**: format limits and award weights

pub mod config;
pub mod constants;
pub mod delivery;
pub mod error;
pub mod fixture;
pub mod ids;
pub mod innings;
pub mod numeric;
pub mod scorecard;
pub mod stats;

// Re-export all primary types at crate root for ergonomic imports:
//   use scorebook_types::{Delivery, Innings, Scorecard, ...};

pub use config::*;
pub use delivery::*;
pub use error::*;
pub use fixture::*;
pub use ids::*;
pub use innings::*;
pub use scorecard::*;
pub use stats::*;

// Constants and numeric helpers are accessed via their module path
// (not re-exported to avoid name collisions).
