//! Delivery validator: the hard gate in front of the ledger.
//!
//! Every delivery is checked before it can reach the store. A delivery that
//! fails any rule is rejected with [`ScorebookError::InvalidDelivery`] and
//! nothing is mutated.
//!
//! ## Rules
//!
//! - Runs off the bat in `0..=6`
//! - Batter and bowler are different players
//! - Wicket flag set iff a wicket kind is given
//! - At most one of the wide / no-ball / bye / leg-bye flags, each matching
//!   the extra kind
//! - Extra runs need an extra kind
//! - A wide or no-ball carries at least one run in total

use scorebook_types::{DeliveryInput, ExtraKind, Result, ScorebookError, constants};

/// Stateless rule set applied to every submitted delivery.
#[derive(Debug, Clone)]
pub struct DeliveryValidator {
    /// Maximum runs off the bat on one delivery.
    max_runs_off_bat: u8,
}

impl DeliveryValidator {
    /// Create a validator with the standard limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_runs_off_bat: constants::MAX_RUNS_OFF_BAT,
        }
    }

    /// Validate a delivery against all rules.
    ///
    /// # Errors
    /// Returns [`ScorebookError::InvalidDelivery`] naming the first rule broken.
    pub fn validate(&self, input: &DeliveryInput) -> Result<()> {
        // 1. Runs off the bat
        if input.runs_off_bat > self.max_runs_off_bat {
            return Err(ScorebookError::invalid_delivery(format!(
                "runs off bat {} exceeds maximum {}",
                input.runs_off_bat, self.max_runs_off_bat
            )));
        }

        // 2. Participants
        if input.batter == input.bowler {
            return Err(ScorebookError::invalid_delivery(
                "batter and bowler must be different players",
            ));
        }

        // 3. Wicket kind present iff wicket flag
        match (input.is_wicket, input.wicket_kind) {
            (true, None) => {
                return Err(ScorebookError::invalid_delivery(
                    "wicket requires a wicket kind",
                ));
            }
            (false, Some(kind)) => {
                return Err(ScorebookError::invalid_delivery(format!(
                    "wicket kind {kind:?} given without wicket flag"
                )));
            }
            _ => {}
        }

        // 4. Extras flags against extra kind
        Self::check_extra_flags(input)?;

        // 5. Extra runs need a kind (extra_runs is unsigned, so never negative)
        if input.extra_runs > 0 && input.extra_kind.is_none() {
            return Err(ScorebookError::invalid_delivery(
                "extra runs given without an extra kind",
            ));
        }

        // 6. Wides and no-balls carry their own run
        if !input.is_legal() && input.total_runs() == 0 {
            let kind = if input.is_wide { "wide" } else { "no-ball" };
            return Err(ScorebookError::invalid_delivery(format!(
                "a {kind} must carry at least 1 run"
            )));
        }

        Ok(())
    }

    fn check_extra_flags(input: &DeliveryInput) -> Result<()> {
        let flags = [
            (input.is_wide, ExtraKind::Wide),
            (input.is_no_ball, ExtraKind::NoBall),
            (input.is_bye, ExtraKind::Bye),
            (input.is_leg_bye, ExtraKind::LegBye),
        ];

        if flags.iter().filter(|(set, _)| *set).count() > 1 {
            return Err(ScorebookError::invalid_delivery(
                "at most one of wide, no-ball, bye and leg-bye may be set",
            ));
        }

        for (set, kind) in flags {
            let kind_matches = input.extra_kind == Some(kind);
            if set != kind_matches {
                return Err(ScorebookError::invalid_delivery(format!(
                    "{kind} flag inconsistent with extra kind {:?}",
                    input.extra_kind
                )));
            }
        }
        Ok(())
    }
}

impl Default for DeliveryValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use scorebook_types::*;

    use super::*;

    const BAT: PlayerId = PlayerId(1);
    const BOWL: PlayerId = PlayerId(2);

    fn assert_invalid(input: &DeliveryInput) {
        let err = DeliveryValidator::new().validate(input).unwrap_err();
        assert!(
            matches!(err, ScorebookError::InvalidDelivery { .. }),
            "Expected InvalidDelivery, got: {err:?}"
        );
    }

    #[test]
    fn ordinary_deliveries_pass() {
        let v = DeliveryValidator::new();
        assert!(v.validate(&DeliveryInput::dot(BAT, BOWL)).is_ok());
        assert!(v.validate(&DeliveryInput::runs(BAT, BOWL, 6)).is_ok());
        assert!(v.validate(&DeliveryInput::byes(BAT, BOWL, 4)).is_ok());
        assert!(
            v.validate(&DeliveryInput::wicket(BAT, BOWL, WicketKind::Bowled))
                .is_ok()
        );
    }

    #[test]
    fn seven_off_the_bat_rejected() {
        assert_invalid(&DeliveryInput::runs(BAT, BOWL, 7));
    }

    #[test]
    fn wicket_without_kind_rejected() {
        let mut input = DeliveryInput::dot(BAT, BOWL);
        input.is_wicket = true;
        assert_invalid(&input);
    }

    #[test]
    fn wicket_kind_without_flag_rejected() {
        let mut input = DeliveryInput::dot(BAT, BOWL);
        input.wicket_kind = Some(WicketKind::Caught);
        assert_invalid(&input);
    }

    #[test]
    fn wide_with_zero_runs_rejected() {
        assert_invalid(&DeliveryInput::wide(BAT, BOWL, 0));
    }

    #[test]
    fn wide_with_one_run_accepted() {
        let v = DeliveryValidator::new();
        assert!(v.validate(&DeliveryInput::wide(BAT, BOWL, 1)).is_ok());
    }

    #[test]
    fn no_ball_with_zero_runs_rejected() {
        let mut input = DeliveryInput::no_ball(BAT, BOWL, 0);
        input.extra_runs = 0;
        assert_invalid(&input);
    }

    #[test]
    fn flag_without_matching_kind_rejected() {
        let mut input = DeliveryInput::wide(BAT, BOWL, 1);
        input.extra_kind = Some(ExtraKind::Bye);
        assert_invalid(&input);
    }

    #[test]
    fn kind_without_matching_flag_rejected() {
        let mut input = DeliveryInput::byes(BAT, BOWL, 2);
        input.is_bye = false;
        assert_invalid(&input);
    }

    #[test]
    fn two_flags_rejected() {
        let mut input = DeliveryInput::wide(BAT, BOWL, 1);
        input.is_no_ball = true;
        assert_invalid(&input);
    }

    #[test]
    fn extra_runs_without_kind_rejected() {
        let mut input = DeliveryInput::dot(BAT, BOWL);
        input.extra_runs = 2;
        assert_invalid(&input);
    }

    #[test]
    fn penalty_needs_no_flag() {
        let mut input = DeliveryInput::dot(BAT, BOWL);
        input.extra_kind = Some(ExtraKind::Penalty);
        input.extra_runs = 5;
        assert!(DeliveryValidator::new().validate(&input).is_ok());
    }

    #[test]
    fn batter_cannot_bowl_to_self() {
        assert_invalid(&DeliveryInput::dot(BAT, BAT));
    }
}
