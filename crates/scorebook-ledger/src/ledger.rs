//! Innings ledger: validated append with position assignment, and undo.
//!
//! The over/ball position of a new delivery is never taken from the caller.
//! It is recomputed from the legal-ball count currently in the store, so
//! positions stay consistent after any number of undos.
//!
//! The ledger does not serialise callers itself. The engine holds the
//! innings' shard lock around every `record` / `undo_last` call.

use std::sync::Arc;

use chrono::Utc;
use scorebook_types::{
    BallPosition, Delivery, DeliveryInput, EngineConfig, Innings, InningsId, InningsStatus,
    Result, ScorebookError,
};

use crate::{DeliveryValidator, LedgerStore};

/// Counts the ledger needs before accepting another delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerCursor {
    /// Deliveries recorded so far (the next sequence number).
    pub deliveries: u32,
    pub legal_balls: u32,
    pub wickets: u32,
}

impl LedgerCursor {
    /// Fold recorded deliveries into a cursor.
    #[must_use]
    pub fn scan(deliveries: &[Delivery]) -> Self {
        deliveries.iter().fold(Self::default(), |mut cursor, d| {
            cursor.deliveries += 1;
            if d.is_legal() {
                cursor.legal_balls += 1;
            }
            if d.is_wicket {
                cursor.wickets += 1;
            }
            cursor
        })
    }

    /// Position the next delivery will take.
    #[must_use]
    pub fn next_position(&self) -> BallPosition {
        BallPosition::after(self.legal_balls)
    }
}

/// Validated, positioned access to the delivery store.
pub struct DeliveryLedger<S> {
    store: Arc<S>,
    validator: DeliveryValidator,
    max_wickets: u32,
    max_legal_balls: u32,
}

impl<S: LedgerStore> DeliveryLedger<S> {
    #[must_use]
    pub fn new(store: Arc<S>, config: &EngineConfig) -> Self {
        Self {
            store,
            validator: DeliveryValidator::new(),
            max_wickets: config.max_wickets,
            max_legal_balls: config.balls_per_innings(),
        }
    }

    /// The backing store, for read paths.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Record a delivery at the end of an innings.
    ///
    /// # Errors
    /// - `WrongInningsStatus` if the innings is not `IN_PROGRESS`
    /// - `InvalidDelivery` if the delivery breaks a validation rule
    /// - `InningsClosed` if the innings is all out or out of overs
    /// - `Storage` if the store rejects the append
    pub fn record(&self, innings: &Innings, input: DeliveryInput) -> Result<Delivery> {
        // 1. Status gate
        require_in_progress(innings)?;

        // 2. Validation gate
        if let Err(err) = self.validator.validate(&input) {
            tracing::warn!(innings = %innings.id, error = %err, "Delivery rejected");
            return Err(err);
        }

        // 3. Innings still open
        let cursor = self.cursor(innings.id)?;
        if cursor.wickets >= self.max_wickets {
            return Err(ScorebookError::InningsClosed {
                reason: format!("{} is all out ({} wickets)", innings.id, cursor.wickets),
            });
        }
        if cursor.legal_balls >= self.max_legal_balls {
            return Err(ScorebookError::InningsClosed {
                reason: format!(
                    "{} has bowled its {} legal balls",
                    innings.id, self.max_legal_balls
                ),
            });
        }

        // 4. Position from the current legal-ball count, then append
        let position = cursor.next_position();
        let delivery = Delivery::from_input(
            input,
            innings.id,
            innings.match_id,
            cursor.deliveries,
            position,
            Utc::now(),
        );
        let stored = self.store.append(delivery)?;

        tracing::debug!(
            innings = %innings.id,
            delivery = %stored.id,
            position = %position,
            runs = stored.total_runs(),
            wicket = stored.is_wicket,
            "Delivery recorded"
        );
        Ok(stored)
    }

    /// Remove the most recent delivery of an innings.
    ///
    /// # Errors
    /// - `WrongInningsStatus` if the innings is not `IN_PROGRESS`
    /// - `EmptyLedger` if the innings has no deliveries
    pub fn undo_last(&self, innings: &Innings) -> Result<Delivery> {
        require_in_progress(innings)?;
        let removed = self.store.remove_last(innings.id)?;
        tracing::debug!(
            innings = %innings.id,
            delivery = %removed.id,
            position = %removed.position(),
            "Delivery undone"
        );
        Ok(removed)
    }

    /// Every delivery of an innings in recording order.
    pub fn deliveries(&self, innings: InningsId) -> Result<Vec<Delivery>> {
        self.store.list_innings(innings)
    }

    /// Current counts for an innings.
    pub fn cursor(&self, innings: InningsId) -> Result<LedgerCursor> {
        Ok(LedgerCursor::scan(&self.store.list_innings(innings)?))
    }
}

fn require_in_progress(innings: &Innings) -> Result<()> {
    if innings.status == InningsStatus::InProgress {
        Ok(())
    } else {
        Err(ScorebookError::WrongInningsStatus {
            expected: InningsStatus::InProgress,
            actual: innings.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use scorebook_types::*;

    use super::*;
    use crate::MemoryLedgerStore;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);

    fn setup(overs: u32) -> (DeliveryLedger<MemoryLedgerStore>, Innings) {
        let ledger = DeliveryLedger::new(
            Arc::new(MemoryLedgerStore::new()),
            &EngineConfig::with_over_limit(overs),
        );
        let innings = Innings::open(InningsId(1), MatchId(1), TeamId(1), TeamId(2), 1);
        (ledger, innings)
    }

    #[test]
    fn positions_follow_legal_balls() {
        let (ledger, innings) = setup(20);
        for _ in 0..6 {
            ledger.record(&innings, DeliveryInput::dot(A, B)).unwrap();
        }
        let wide = ledger
            .record(&innings, DeliveryInput::wide(A, B, 1))
            .unwrap();
        assert_eq!((wide.over, wide.ball), (1, 1));
        let next = ledger.record(&innings, DeliveryInput::dot(A, B)).unwrap();
        assert_eq!((next.over, next.ball), (1, 1));
        assert_eq!(next.sequence, 7);
        let after = ledger.record(&innings, DeliveryInput::dot(A, B)).unwrap();
        assert_eq!((after.over, after.ball), (1, 2));
    }

    #[test]
    fn position_recomputed_after_undo() {
        let (ledger, innings) = setup(20);
        ledger.record(&innings, DeliveryInput::dot(A, B)).unwrap();
        ledger.record(&innings, DeliveryInput::dot(A, B)).unwrap();
        ledger.undo_last(&innings).unwrap();
        let again = ledger.record(&innings, DeliveryInput::dot(A, B)).unwrap();
        assert_eq!((again.over, again.ball, again.sequence), (0, 2, 1));
    }

    #[test]
    fn completed_innings_rejects_delivery() {
        let (ledger, mut innings) = setup(20);
        innings.status = InningsStatus::Completed;
        let err = ledger
            .record(&innings, DeliveryInput::dot(A, B))
            .unwrap_err();
        assert!(matches!(
            err,
            ScorebookError::WrongInningsStatus {
                actual: InningsStatus::Completed,
                ..
            }
        ));
        assert!(ledger.deliveries(innings.id).unwrap().is_empty());
    }

    #[test]
    fn invalid_delivery_never_reaches_store() {
        let (ledger, innings) = setup(20);
        let err = ledger
            .record(&innings, DeliveryInput::wide(A, B, 0))
            .unwrap_err();
        assert!(matches!(err, ScorebookError::InvalidDelivery { .. }));
        assert!(ledger.deliveries(innings.id).unwrap().is_empty());
    }

    #[test]
    fn undo_on_empty_ledger() {
        let (ledger, innings) = setup(20);
        let err = ledger.undo_last(&innings).unwrap_err();
        assert!(matches!(err, ScorebookError::EmptyLedger(InningsId(1))));
    }

    #[test]
    fn overs_exhausted_closes_innings() {
        let (ledger, innings) = setup(1);
        for _ in 0..6 {
            ledger.record(&innings, DeliveryInput::runs(A, B, 1)).unwrap();
        }
        let err = ledger
            .record(&innings, DeliveryInput::dot(A, B))
            .unwrap_err();
        assert!(matches!(err, ScorebookError::InningsClosed { .. }));
    }

    #[test]
    fn all_out_closes_innings() {
        let (ledger, innings) = setup(20);
        for i in 0..10 {
            let batter = PlayerId(100 + i);
            ledger
                .record(&innings, DeliveryInput::wicket(batter, B, WicketKind::Bowled))
                .unwrap();
        }
        let err = ledger
            .record(&innings, DeliveryInput::dot(A, B))
            .unwrap_err();
        assert!(matches!(err, ScorebookError::InningsClosed { .. }));
        assert_eq!(ledger.cursor(innings.id).unwrap().wickets, 10);
    }

    #[test]
    fn cursor_counts() {
        let (ledger, innings) = setup(20);
        ledger.record(&innings, DeliveryInput::runs(A, B, 4)).unwrap();
        ledger.record(&innings, DeliveryInput::no_ball(A, B, 0)).unwrap();
        ledger
            .record(&innings, DeliveryInput::wicket(A, B, WicketKind::Lbw))
            .unwrap();
        let cursor = ledger.cursor(innings.id).unwrap();
        assert_eq!(
            cursor,
            LedgerCursor {
                deliveries: 3,
                legal_balls: 2,
                wickets: 1
            }
        );
        assert_eq!(cursor.next_position(), BallPosition { over: 0, ball: 3 });
    }
}
