//! Match and rate calculator.
//!
//! Pure functions over aggregated innings data. Every figure is rounded to
//! two decimals; a zero denominator contributes zero.

use rust_decimal::Decimal;
use scorebook_types::{
    BallPosition, Delivery, InningsTotals, OverProgression, Partnership, PlayerId, constants,
    numeric,
};

/// Runs per over for an innings so far.
#[must_use]
pub fn current_run_rate(totals: &InningsTotals) -> Decimal {
    numeric::runs_per_over(totals.runs, totals.legal_balls)
}

/// Runs per over still needed to reach `target` inside the over limit.
///
/// Zero when no legal balls remain. Once the chasing side has passed the
/// target the rate goes negative: 10 runs ahead with 10 overs left is `-1.00`.
#[must_use]
pub fn required_run_rate(
    target: u32,
    current_runs: u32,
    legal_balls_bowled: u32,
    match_over_limit: u32,
) -> Decimal {
    let remaining = match_over_limit
        .saturating_mul(constants::BALLS_PER_OVER)
        .saturating_sub(legal_balls_bowled);
    if remaining == 0 {
        return Decimal::ZERO;
    }
    let needed = i64::from(target) - i64::from(current_runs);
    numeric::round_rate(
        Decimal::from(needed) * Decimal::from(constants::BALLS_PER_OVER)
            / Decimal::from(remaining),
    )
}

/// Partnership between `a` and `b` within one innings.
///
/// Deliveries are scanned in recording order. Only deliveries faced by `a`
/// or `b` count; the partnership becomes active on the first of them and
/// ends, inclusive, at the first wicket among them.
#[must_use]
pub fn partnership(deliveries: &[Delivery], a: PlayerId, b: PlayerId) -> Partnership {
    let mut ordered: Vec<&Delivery> = deliveries.iter().collect();
    ordered.sort_by_key(|d| d.ledger_key());

    let mut runs = 0;
    let mut balls = 0;
    let mut active = false;

    for d in ordered {
        if d.batter != a && d.batter != b {
            continue;
        }
        active = true;
        runs += d.total_runs();
        if d.is_legal() {
            balls += 1;
        }
        if d.is_wicket {
            active = false;
            break;
        }
    }

    Partnership {
        batter_a: a,
        batter_b: b,
        runs,
        balls,
        strike_rate: numeric::per_hundred(runs, balls),
        active,
    }
}

/// Net run rate: runs per over scored minus runs per over conceded.
///
/// `batted` are the innings the team batted in, `bowled` the innings it
/// bowled in. Each side is summed before dividing.
#[must_use]
pub fn net_run_rate<'a>(
    batted: impl IntoIterator<Item = &'a InningsTotals>,
    bowled: impl IntoIterator<Item = &'a InningsTotals>,
) -> Decimal {
    let (scored, faced) = sum_innings(batted);
    let (conceded, delivered) = sum_innings(bowled);
    numeric::round_rate(
        numeric::runs_per_over_raw(scored, faced) - numeric::runs_per_over_raw(conceded, delivered),
    )
}

fn sum_innings<'a>(innings: impl IntoIterator<Item = &'a InningsTotals>) -> (u32, u32) {
    innings
        .into_iter()
        .fold((0, 0), |(runs, balls), t| (runs + t.runs, balls + t.legal_balls))
}

/// Where an innings stands in its overs.
#[must_use]
pub fn over_progression(deliveries: &[Delivery]) -> OverProgression {
    let legal_balls = u32::try_from(deliveries.iter().filter(|d| d.is_legal()).count())
        .unwrap_or(u32::MAX);
    let total_deliveries = u32::try_from(deliveries.len()).unwrap_or(u32::MAX);
    let position = BallPosition::after(legal_balls);
    OverProgression {
        total_deliveries,
        legal_balls,
        current_over: position.over,
        next_ball: position.ball,
        overs_completed: legal_balls / constants::BALLS_PER_OVER,
        balls_in_current_over: legal_balls % constants::BALLS_PER_OVER,
    }
}
