//! # scorebook-engine
//!
//! **Scoring engine**: serialised ledger mutations, fixture lifecycle,
//! scorecard materialisation and league queries.
//!
//! ## Architecture
//!
//! For every recorded or undone delivery the engine:
//! 1. Locks the innings' shard (one writer per innings, innings run in parallel)
//! 2. Appends to or removes from the ledger through [`DeliveryLedger`](scorebook_ledger::DeliveryLedger)
//! 3. Folds the innings ledger into fresh totals
//! 4. Publishes the totals and a rebuilt scorecard to the [`SnapshotSink`]
//!
//! ## Lifecycles
//!
//! - Match: `SCHEDULED → IN_PROGRESS → COMPLETED`, or `ABANDONED` / `CANCELLED`
//! - Innings: `IN_PROGRESS → COMPLETED` or `DECLARED`; completion is always an
//!   explicit call, never inferred from wickets or overs

pub mod engine;
pub mod league;
pub mod registry;
pub mod shard;
pub mod sink;

pub use engine::ScoringEngine;
pub use registry::Registry;
pub use shard::ShardLocks;
pub use sink::{MemorySnapshotSink, SinkCounters, SnapshotSink};
