//! Snapshot sink: where recomputed totals and scorecards are published.
//!
//! Writes are fire-and-forget from the engine's point of view: a failing
//! sink is logged and never rolls back the ledger. The in-memory sink is
//! idempotent per key, so republishing an unchanged snapshot is a no-op.

use std::collections::HashMap;

use parking_lot::RwLock;
use scorebook_stats::compute_totals_digest;
use scorebook_types::{InningsId, InningsTotals, MatchId, Result, Scorecard};

/// Destination for derived snapshots.
pub trait SnapshotSink: Send + Sync {
    fn save_innings_totals(&self, innings: InningsId, totals: &InningsTotals) -> Result<()>;

    fn save_scorecard(&self, match_id: MatchId, scorecard: &Scorecard) -> Result<()>;
}

/// Counts of writes applied and skipped as unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkCounters {
    pub written: u64,
    pub unchanged: u64,
}

#[derive(Debug, Default)]
struct SinkState {
    totals: HashMap<InningsId, ([u8; 32], InningsTotals)>,
    scorecards: HashMap<MatchId, Scorecard>,
    counters: SinkCounters,
}

/// In-process sink keyed by innings and match.
///
/// A write whose digest equals the stored digest for that key is counted
/// as unchanged and not applied.
#[derive(Debug, Default)]
pub struct MemorySnapshotSink {
    state: RwLock<SinkState>,
}

impl MemorySnapshotSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn innings_totals(&self, innings: InningsId) -> Option<InningsTotals> {
        self.state
            .read()
            .totals
            .get(&innings)
            .map(|(_, totals)| totals.clone())
    }

    #[must_use]
    pub fn scorecard(&self, match_id: MatchId) -> Option<Scorecard> {
        self.state.read().scorecards.get(&match_id).cloned()
    }

    #[must_use]
    pub fn counters(&self) -> SinkCounters {
        self.state.read().counters
    }
}

impl SnapshotSink for MemorySnapshotSink {
    fn save_innings_totals(&self, innings: InningsId, totals: &InningsTotals) -> Result<()> {
        let digest = compute_totals_digest(innings, totals);
        let mut state = self.state.write();
        if state.totals.get(&innings).is_some_and(|(d, _)| *d == digest) {
            state.counters.unchanged += 1;
            return Ok(());
        }
        state.totals.insert(innings, (digest, totals.clone()));
        state.counters.written += 1;
        Ok(())
    }

    fn save_scorecard(&self, match_id: MatchId, scorecard: &Scorecard) -> Result<()> {
        let mut state = self.state.write();
        if state
            .scorecards
            .get(&match_id)
            .is_some_and(|stored| stored.digest == scorecard.digest)
        {
            state.counters.unchanged += 1;
            return Ok(());
        }
        state.scorecards.insert(match_id, scorecard.clone());
        state.counters.written += 1;
        Ok(())
    }
}
