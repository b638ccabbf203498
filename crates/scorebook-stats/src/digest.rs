//! Content digests over ledger-derived state.
//!
//! Replaying the same ledger must produce the same totals and the same
//! scorecard on every engine instance. The digests here let a snapshot
//! sink skip unchanged writes and let a replay be checked against a
//! previously published scorecard without comparing full payloads.

use scorebook_types::{Delivery, InningsId, InningsTotals, Scorecard, TeamLine, WinMargin};
use sha2::{Digest, Sha256};

fn finish(hasher: Sha256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hash over an innings' deliveries in recording order.
///
/// Delivery ids and timestamps are excluded: two ledgers holding the same
/// balls in the same order have the same root.
#[must_use]
pub fn compute_ledger_root(deliveries: &[Delivery]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"scorebook:ledger_root:v1:");
    hasher.update((deliveries.len() as u64).to_le_bytes());

    for d in deliveries {
        hasher.update(d.innings_id.0.to_le_bytes());
        hasher.update(d.sequence.to_le_bytes());
        hasher.update(d.over.to_le_bytes());
        hasher.update(d.ball.to_le_bytes());
        hasher.update(d.batter.0.to_le_bytes());
        hasher.update(d.bowler.0.to_le_bytes());
        hasher.update([d.runs_off_bat, u8::from(d.is_wicket)]);
        hasher.update(d.extra_runs.to_le_bytes());
        hasher.update(
            d.extra_kind
                .map(|k| k.to_string())
                .unwrap_or_default()
                .as_bytes(),
        );
        hasher.update([0u8]);
    }

    finish(hasher)
}

/// Hash of an innings' totals, keyed by innings id.
#[must_use]
pub fn compute_totals_digest(innings: InningsId, totals: &InningsTotals) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"scorebook:innings_totals:v1:");
    hasher.update(innings.0.to_le_bytes());
    hasher.update(totals.runs.to_le_bytes());
    hasher.update(totals.wickets.to_le_bytes());
    hasher.update(totals.legal_balls.to_le_bytes());
    hasher.update(totals.deliveries.to_le_bytes());
    let e = &totals.extras;
    for part in [e.wides, e.no_balls, e.byes, e.leg_byes, e.penalties] {
        hasher.update(part.to_le_bytes());
    }
    finish(hasher)
}

fn hash_line(hasher: &mut Sha256, line: &TeamLine) {
    hasher.update(line.team_id.0.to_le_bytes());
    hasher.update(line.runs.to_le_bytes());
    hasher.update(line.wickets.to_le_bytes());
    hasher.update(line.legal_balls.to_le_bytes());
}

/// Hash over every scorecard field except the stored digest itself.
#[must_use]
pub fn compute_scorecard_digest(card: &Scorecard) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"scorebook:scorecard:v1:");
    hasher.update(card.match_id.0.to_le_bytes());
    hash_line(&mut hasher, &card.team1);
    hash_line(&mut hasher, &card.team2);
    hasher.update(card.winning_team.map_or(0, |t| t.0).to_le_bytes());
    let (tag, margin) = match card.win_margin {
        None => (0u8, 0u32),
        Some(WinMargin::Runs(n)) => (1, n),
        Some(WinMargin::Wickets(n)) => (2, n),
        Some(WinMargin::Tie) => (3, 0),
    };
    hasher.update([tag]);
    hasher.update(margin.to_le_bytes());
    hasher.update(card.man_of_the_match.map_or(0, |p| p.0).to_le_bytes());
    finish(hasher)
}

/// Fill in the scorecard's hex digest.
#[must_use]
pub fn seal_scorecard(mut card: Scorecard) -> Scorecard {
    card.digest = hex::encode(compute_scorecard_digest(&card));
    card
}

/// Whether the scorecard's stored digest matches its contents.
#[must_use]
pub fn verify_scorecard(card: &Scorecard) -> bool {
    hex::encode(compute_scorecard_digest(card)) == card.digest
}
