//! Innings aggregator: folds an innings' deliveries into its totals.
//!
//! Pure, deterministic and idempotent. Folding the ledger after an undo
//! gives exactly the totals that existed before the undone delivery was
//! appended.

use scorebook_types::{Delivery, ExtraKind, ExtrasBreakdown, InningsTotals, numeric};

/// Fold every delivery of one innings into totals.
///
/// - runs = Σ(runs off bat + extra runs)
/// - wickets = count of wicket deliveries
/// - legal balls = count of deliveries that are neither wide nor no-ball
/// - overs = legal balls / 6
#[must_use]
pub fn aggregate_innings(deliveries: &[Delivery]) -> InningsTotals {
    let mut totals = InningsTotals::default();
    let mut extras = ExtrasBreakdown::default();

    for d in deliveries {
        totals.deliveries += 1;
        totals.runs += d.total_runs();
        if d.is_wicket {
            totals.wickets += 1;
        }
        if d.is_legal() {
            totals.legal_balls += 1;
        }
        match d.extra_kind {
            Some(ExtraKind::Wide) => extras.wides += d.extra_runs,
            Some(ExtraKind::NoBall) => extras.no_balls += d.extra_runs,
            Some(ExtraKind::Bye) => extras.byes += d.extra_runs,
            Some(ExtraKind::LegBye) => extras.leg_byes += d.extra_runs,
            Some(ExtraKind::Penalty) => extras.penalties += d.extra_runs,
            None => {}
        }
    }

    totals.extras = extras;
    totals.overs = numeric::overs_from_balls(totals.legal_balls);
    totals
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use scorebook_types::*;

    use super::*;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);

    fn innings(inputs: Vec<DeliveryInput>) -> Vec<Delivery> {
        Delivery::sequence_for(InningsId(1), MatchId(1), inputs)
    }

    #[test]
    fn one_over_with_a_wicket() {
        // [1, 4, 6, 0, 1, wicket+0]
        let deliveries = innings(vec![
            DeliveryInput::runs(A, B, 1),
            DeliveryInput::runs(A, B, 4),
            DeliveryInput::runs(A, B, 6),
            DeliveryInput::dot(A, B),
            DeliveryInput::runs(A, B, 1),
            DeliveryInput::wicket(A, B, WicketKind::Bowled),
        ]);
        let totals = aggregate_innings(&deliveries);
        assert_eq!(totals.runs, 12);
        assert_eq!(totals.wickets, 1);
        assert_eq!(totals.legal_balls, 6);
        assert_eq!(totals.overs, Decimal::ONE);
        assert_eq!(totals.run_rate(), Decimal::new(12, 0));
    }

    #[test]
    fn extras_count_in_runs_but_not_balls() {
        let deliveries = innings(vec![
            DeliveryInput::wide(A, B, 1),
            DeliveryInput::no_ball(A, B, 4),
            DeliveryInput::byes(A, B, 2),
        ]);
        let totals = aggregate_innings(&deliveries);
        assert_eq!(totals.runs, 1 + 5 + 2);
        assert_eq!(totals.legal_balls, 1);
        assert_eq!(totals.deliveries, 3);
        assert_eq!(totals.extras.wides, 1);
        assert_eq!(totals.extras.no_balls, 1);
        assert_eq!(totals.extras.byes, 2);
        assert_eq!(totals.extras.total(), 4);
    }

    #[test]
    fn empty_innings() {
        let totals = aggregate_innings(&[]);
        assert_eq!(totals, InningsTotals::default());
        assert_eq!(totals.run_rate(), Decimal::ZERO);
    }

    #[test]
    fn idempotent() {
        let deliveries = innings(vec![
            DeliveryInput::runs(A, B, 3),
            DeliveryInput::wide(A, B, 2),
        ]);
        assert_eq!(aggregate_innings(&deliveries), aggregate_innings(&deliveries));
    }

    #[test]
    fn prefix_fold_equals_fold_before_append() {
        let deliveries = innings(vec![
            DeliveryInput::runs(A, B, 2),
            DeliveryInput::runs(A, B, 4),
            DeliveryInput::wicket(A, B, WicketKind::Caught),
        ]);
        let before = aggregate_innings(&deliveries[..2]);
        let after = aggregate_innings(&deliveries);
        assert_ne!(before, after);
        // Dropping the tail reproduces the earlier state exactly.
        assert_eq!(aggregate_innings(&deliveries[..deliveries.len() - 1]), before);
    }
}
