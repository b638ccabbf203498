//! Rate arithmetic shared by every statistic.
//!
//! Rates are derived from legal-ball counts rather than from a fractional
//! overs value, so `runs / overs` becomes `runs * 6 / balls` and stays exact
//! until the final rounding step. Every figure returned to a caller goes
//! through [`round_rate`]; a zero denominator yields zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{BALLS_PER_OVER, RATE_DECIMAL_PLACES};

/// Round to two decimal places, halves away from zero.
#[must_use]
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded runs per over for `runs` scored off `legal_balls`.
#[must_use]
pub fn runs_per_over_raw(runs: u32, legal_balls: u32) -> Decimal {
    if legal_balls == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(runs) * Decimal::from(BALLS_PER_OVER) / Decimal::from(legal_balls)
}

/// Runs per over, rounded for presentation.
#[must_use]
pub fn runs_per_over(runs: u32, legal_balls: u32) -> Decimal {
    round_rate(runs_per_over_raw(runs, legal_balls))
}

/// `numerator / denominator`, rounded; zero when the denominator is zero.
#[must_use]
pub fn ratio(numerator: u32, denominator: u32) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    round_rate(Decimal::from(numerator) / Decimal::from(denominator))
}

/// `numerator / denominator * 100`, rounded; zero when the denominator is zero.
#[must_use]
pub fn per_hundred(numerator: u32, denominator: u32) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    round_rate(Decimal::from(numerator) * Decimal::ONE_HUNDRED / Decimal::from(denominator))
}

/// Overs as a decimal fraction of legal balls (`balls / 6`), rounded.
///
/// Three legal balls are `0.5` overs, six are `1.0`.
#[must_use]
pub fn overs_from_balls(legal_balls: u32) -> Decimal {
    round_rate(Decimal::from(legal_balls) / Decimal::from(BALLS_PER_OVER))
}

/// Cricket `over.ball` notation (`20` legal balls → `"3.2"`). Display only.
#[must_use]
pub fn overs_notation(legal_balls: u32) -> String {
    format!(
        "{}.{}",
        legal_balls / BALLS_PER_OVER,
        legal_balls % BALLS_PER_OVER
    )
}
