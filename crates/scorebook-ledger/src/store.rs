//! Ledger store contract and the in-memory implementation.
//!
//! Any ordered-append store with per-innings and per-player retrieval can
//! back the ledger. The most recent record of an innings is queryable from
//! the store itself, so undo does not depend on process memory and works
//! across restarts and engine instances sharing one durable store.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use scorebook_types::{Delivery, InningsId, PlayerId, PlayerRole, Result, ScorebookError};

/// Ordered, append-only-with-removal storage for delivery records.
pub trait LedgerStore: Send + Sync {
    /// Append a delivery to the end of its innings.
    ///
    /// # Errors
    /// Returns [`ScorebookError::Storage`] if the delivery's sequence is not
    /// the next slot of its innings.
    fn append(&self, delivery: Delivery) -> Result<Delivery>;

    /// Remove and return the most recent delivery of an innings.
    ///
    /// # Errors
    /// Returns [`ScorebookError::EmptyLedger`] if the innings has no deliveries.
    fn remove_last(&self, innings: InningsId) -> Result<Delivery>;

    /// Most recent delivery of an innings, if any.
    fn last(&self, innings: InningsId) -> Result<Option<Delivery>>;

    /// Every delivery of an innings in recording order.
    fn list_innings(&self, innings: InningsId) -> Result<Vec<Delivery>>;

    /// Every delivery a player took part in as `role`, ordered by
    /// (innings, recording order).
    fn list_player(&self, player: PlayerId, role: PlayerRole) -> Result<Vec<Delivery>>;
}

/// In-process ledger store keyed by innings.
///
/// The map is ordered by innings id, so per-player listings come out
/// grouped by innings without a separate sort.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    innings: RwLock<BTreeMap<InningsId, Vec<Delivery>>>,
}

impl MemoryLedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total deliveries across all innings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.innings.read().values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn append(&self, delivery: Delivery) -> Result<Delivery> {
        let mut innings = self.innings.write();
        let records = innings.entry(delivery.innings_id).or_default();
        let expected = records.len();
        if usize::try_from(delivery.sequence).ok() != Some(expected) {
            return Err(ScorebookError::Storage(format!(
                "out-of-order append to {}: sequence {} but next slot is {expected}",
                delivery.innings_id, delivery.sequence
            )));
        }
        records.push(delivery.clone());
        Ok(delivery)
    }

    fn remove_last(&self, innings_id: InningsId) -> Result<Delivery> {
        let mut innings = self.innings.write();
        innings
            .get_mut(&innings_id)
            .and_then(Vec::pop)
            .ok_or(ScorebookError::EmptyLedger(innings_id))
    }

    fn last(&self, innings_id: InningsId) -> Result<Option<Delivery>> {
        Ok(self
            .innings
            .read()
            .get(&innings_id)
            .and_then(|records| records.last().cloned()))
    }

    fn list_innings(&self, innings_id: InningsId) -> Result<Vec<Delivery>> {
        Ok(self
            .innings
            .read()
            .get(&innings_id)
            .cloned()
            .unwrap_or_default())
    }

    fn list_player(&self, player: PlayerId, role: PlayerRole) -> Result<Vec<Delivery>> {
        Ok(self
            .innings
            .read()
            .values()
            .flatten()
            .filter(|d| d.involves(player, role))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use scorebook_types::*;

    use super::*;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);
    const C: PlayerId = PlayerId(3);

    fn fill(store: &MemoryLedgerStore, innings: InningsId, inputs: Vec<DeliveryInput>) {
        for d in Delivery::sequence_for(innings, MatchId(1), inputs) {
            store.append(d).unwrap();
        }
    }

    #[test]
    fn append_and_list_in_order() {
        let store = MemoryLedgerStore::new();
        fill(
            &store,
            InningsId(1),
            vec![DeliveryInput::runs(A, B, 1), DeliveryInput::runs(C, B, 4)],
        );
        let listed = store.list_innings(InningsId(1)).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].sequence, 0);
        assert_eq!(listed[1].runs_off_bat, 4);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn out_of_order_append_rejected() {
        let store = MemoryLedgerStore::new();
        let mut d = Delivery::sequence_for(InningsId(1), MatchId(1), [DeliveryInput::dot(A, B)]);
        let mut rec = d.remove(0);
        rec.sequence = 3;
        let err = store.append(rec).unwrap_err();
        assert!(matches!(err, ScorebookError::Storage(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_last_pops_tail() {
        let store = MemoryLedgerStore::new();
        fill(
            &store,
            InningsId(1),
            vec![DeliveryInput::runs(A, B, 1), DeliveryInput::runs(A, B, 6)],
        );
        let removed = store.remove_last(InningsId(1)).unwrap();
        assert_eq!(removed.runs_off_bat, 6);
        assert_eq!(store.last(InningsId(1)).unwrap().unwrap().runs_off_bat, 1);
    }

    #[test]
    fn remove_last_on_empty_innings() {
        let store = MemoryLedgerStore::new();
        let err = store.remove_last(InningsId(9)).unwrap_err();
        assert!(matches!(err, ScorebookError::EmptyLedger(InningsId(9))));
        assert!(store.last(InningsId(9)).unwrap().is_none());
    }

    #[test]
    fn player_listing_grouped_by_innings() {
        let store = MemoryLedgerStore::new();
        // Innings 2 recorded before innings 1 still lists after it.
        fill(&store, InningsId(2), vec![DeliveryInput::runs(A, C, 2)]);
        fill(
            &store,
            InningsId(1),
            vec![DeliveryInput::runs(A, B, 1), DeliveryInput::runs(C, B, 3)],
        );
        let as_batter = store.list_player(A, PlayerRole::Batter).unwrap();
        let keys: Vec<_> = as_batter.iter().map(Delivery::ledger_key).collect();
        assert_eq!(keys, vec![(InningsId(1), 0), (InningsId(2), 0)]);

        let as_bowler = store.list_player(B, PlayerRole::Bowler).unwrap();
        assert_eq!(as_bowler.len(), 2);
        assert!(store.list_player(B, PlayerRole::Batter).unwrap().is_empty());
    }
}
