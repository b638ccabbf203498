//! Delivery types: the atomic scoring event recorded in the ledger.
//!
//! A caller submits a [`DeliveryInput`]. The ledger validates it, assigns its
//! over/ball position from the current legal-ball count and stores the
//! resulting [`Delivery`]. Recorded deliveries are never edited; the only
//! mutation is removal of the most recent one by undo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DeliveryId, InningsId, MatchId, PlayerId, constants::BALLS_PER_OVER};

/// How a batter was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WicketKind {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    HandledBall,
    ObstructingField,
    TimedOut,
    RetiredHurt,
}

/// Runs awarded that are not credited to the batter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
    Penalty,
}

impl std::fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wide => write!(f, "WIDE"),
            Self::NoBall => write!(f, "NO_BALL"),
            Self::Bye => write!(f, "BYE"),
            Self::LegBye => write!(f, "LEG_BYE"),
            Self::Penalty => write!(f, "PENALTY"),
        }
    }
}

/// Which side of a delivery a player was on, for per-player ledger queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Batter,
    Bowler,
}

/// Over/ball position of a delivery: 0-based over, 1-based ball in over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BallPosition {
    pub over: u32,
    pub ball: u32,
}

impl BallPosition {
    /// Position of the next delivery once `legal_balls` legal balls have been bowled.
    #[must_use]
    pub fn after(legal_balls: u32) -> Self {
        Self {
            over: legal_balls / BALLS_PER_OVER,
            ball: legal_balls % BALLS_PER_OVER + 1,
        }
    }
}

impl std::fmt::Display for BallPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.over, self.ball)
    }
}

/// Delivery data as submitted by the scorer, before validation and positioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInput {
    pub batter: PlayerId,
    pub bowler: PlayerId,
    /// Runs off the bat, 0 to 6.
    #[serde(default)]
    pub runs_off_bat: u8,
    #[serde(default)]
    pub is_wicket: bool,
    /// Required iff `is_wicket`.
    #[serde(default)]
    pub wicket_kind: Option<WicketKind>,
    #[serde(default)]
    pub extra_kind: Option<ExtraKind>,
    #[serde(default)]
    pub extra_runs: u32,
    #[serde(default)]
    pub is_wide: bool,
    #[serde(default)]
    pub is_no_ball: bool,
    #[serde(default)]
    pub is_bye: bool,
    #[serde(default)]
    pub is_leg_bye: bool,
}

impl DeliveryInput {
    /// Runs off the bat plus extras.
    #[must_use]
    pub fn total_runs(&self) -> u32 {
        u32::from(self.runs_off_bat) + self.extra_runs
    }

    /// Neither a wide nor a no-ball.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        !self.is_wide && !self.is_no_ball
    }
}

/// A recorded delivery. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub innings_id: InningsId,
    pub match_id: MatchId,
    /// 0-based append index within the innings. Canonical ordering key:
    /// a wide shares its over/ball position with the next legal ball.
    pub sequence: u32,
    /// 0-based over number.
    pub over: u32,
    /// 1-based ball number within the over.
    pub ball: u32,
    pub batter: PlayerId,
    pub bowler: PlayerId,
    pub runs_off_bat: u8,
    pub is_wicket: bool,
    pub wicket_kind: Option<WicketKind>,
    pub extra_kind: Option<ExtraKind>,
    pub extra_runs: u32,
    pub is_wide: bool,
    pub is_no_ball: bool,
    pub is_bye: bool,
    pub is_leg_bye: bool,
    pub recorded_at: DateTime<Utc>,
}

impl Delivery {
    /// Build a ledger record from validated input at the given position.
    #[must_use]
    pub fn from_input(
        input: DeliveryInput,
        innings_id: InningsId,
        match_id: MatchId,
        sequence: u32,
        position: BallPosition,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DeliveryId::new(),
            innings_id,
            match_id,
            sequence,
            over: position.over,
            ball: position.ball,
            batter: input.batter,
            bowler: input.bowler,
            runs_off_bat: input.runs_off_bat,
            is_wicket: input.is_wicket,
            wicket_kind: input.wicket_kind,
            extra_kind: input.extra_kind,
            extra_runs: input.extra_runs,
            is_wide: input.is_wide,
            is_no_ball: input.is_no_ball,
            is_bye: input.is_bye,
            is_leg_bye: input.is_leg_bye,
            recorded_at,
        }
    }

    #[must_use]
    pub fn position(&self) -> BallPosition {
        BallPosition {
            over: self.over,
            ball: self.ball,
        }
    }

    /// Counts toward the six-ball over.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        !self.is_wide && !self.is_no_ball
    }

    /// Runs off the bat plus extras.
    #[must_use]
    pub fn total_runs(&self) -> u32 {
        u32::from(self.runs_off_bat) + self.extra_runs
    }

    /// Runs charged to the bowler: off the bat, plus wides and no-balls.
    /// Byes, leg-byes and penalties are not the bowler's.
    #[must_use]
    pub fn bowler_runs(&self) -> u32 {
        let charged_extras = match self.extra_kind {
            Some(ExtraKind::Wide | ExtraKind::NoBall) => self.extra_runs,
            _ => 0,
        };
        u32::from(self.runs_off_bat) + charged_extras
    }

    /// Whether `player` was on either side of this delivery in `role`.
    #[must_use]
    pub fn involves(&self, player: PlayerId, role: PlayerRole) -> bool {
        match role {
            PlayerRole::Batter => self.batter == player,
            PlayerRole::Bowler => self.bowler == player,
        }
    }

    /// Ordering key for per-player streams: innings, then recording order.
    #[must_use]
    pub fn ledger_key(&self) -> (InningsId, u32) {
        (self.innings_id, self.sequence)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl DeliveryInput {
    /// A legal delivery with `runs` off the bat.
    pub fn runs(batter: PlayerId, bowler: PlayerId, runs: u8) -> Self {
        Self {
            batter,
            bowler,
            runs_off_bat: runs,
            is_wicket: false,
            wicket_kind: None,
            extra_kind: None,
            extra_runs: 0,
            is_wide: false,
            is_no_ball: false,
            is_bye: false,
            is_leg_bye: false,
        }
    }

    /// A legal dot ball.
    pub fn dot(batter: PlayerId, bowler: PlayerId) -> Self {
        Self::runs(batter, bowler, 0)
    }

    /// A wicket on a legal ball with no runs.
    pub fn wicket(batter: PlayerId, bowler: PlayerId, kind: WicketKind) -> Self {
        Self {
            is_wicket: true,
            wicket_kind: Some(kind),
            ..Self::dot(batter, bowler)
        }
    }

    /// A wide worth `extra_runs`.
    pub fn wide(batter: PlayerId, bowler: PlayerId, extra_runs: u32) -> Self {
        Self {
            extra_kind: Some(ExtraKind::Wide),
            extra_runs,
            is_wide: true,
            ..Self::dot(batter, bowler)
        }
    }

    /// A no-ball worth one extra plus `runs` off the bat.
    pub fn no_ball(batter: PlayerId, bowler: PlayerId, runs: u8) -> Self {
        Self {
            extra_kind: Some(ExtraKind::NoBall),
            extra_runs: 1,
            is_no_ball: true,
            ..Self::runs(batter, bowler, runs)
        }
    }

    /// Legal byes worth `extra_runs`.
    pub fn byes(batter: PlayerId, bowler: PlayerId, extra_runs: u32) -> Self {
        Self {
            extra_kind: Some(ExtraKind::Bye),
            extra_runs,
            is_bye: true,
            ..Self::dot(batter, bowler)
        }
    }

    /// A random delivery that passes validation. Roughly one in ten is a wide
    /// or no-ball and one in fifteen a wicket.
    pub fn random_valid<R: rand::Rng>(rng: &mut R, batter: PlayerId, bowler: PlayerId) -> Self {
        match rng.gen_range(0..30) {
            0 => Self::wide(batter, bowler, rng.gen_range(1..=5)),
            1 => Self::no_ball(batter, bowler, rng.gen_range(0..=6)),
            2 => Self::byes(batter, bowler, rng.gen_range(1..=4)),
            3 | 4 => Self::wicket(batter, bowler, WicketKind::Caught),
            _ => Self::runs(batter, bowler, rng.gen_range(0..=6)),
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Delivery {
    /// Position a sequence of inputs the way the ledger would, without validation.
    pub fn sequence_for(
        innings_id: InningsId,
        match_id: MatchId,
        inputs: impl IntoIterator<Item = DeliveryInput>,
    ) -> Vec<Self> {
        let mut legal_balls = 0;
        inputs
            .into_iter()
            .enumerate()
            .map(|(seq, input)| {
                let position = BallPosition::after(legal_balls);
                if input.is_legal() {
                    legal_balls += 1;
                }
                let sequence = u32::try_from(seq).unwrap_or(u32::MAX);
                Self::from_input(input, innings_id, match_id, sequence, position, Utc::now())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);

    #[test]
    fn position_after_legal_balls() {
        assert_eq!(BallPosition::after(0), BallPosition { over: 0, ball: 1 });
        assert_eq!(BallPosition::after(5), BallPosition { over: 0, ball: 6 });
        assert_eq!(BallPosition::after(6), BallPosition { over: 1, ball: 1 });
        assert_eq!(BallPosition::after(20).to_string(), "3.3");
    }

    #[test]
    fn wide_shares_position_with_next_legal_ball() {
        let seq = Delivery::sequence_for(
            InningsId(1),
            MatchId(1),
            [
                DeliveryInput::dot(A, B),
                DeliveryInput::wide(A, B, 1),
                DeliveryInput::runs(A, B, 4),
            ],
        );
        assert_eq!(seq[1].position(), seq[2].position());
        assert_eq!(seq[2].position(), BallPosition { over: 0, ball: 2 });
        assert_eq!(seq[2].sequence, 2);
    }

    #[test]
    fn legality_and_totals() {
        let nb = DeliveryInput::no_ball(A, B, 4);
        assert!(!nb.is_legal());
        assert_eq!(nb.total_runs(), 5);
        assert!(DeliveryInput::byes(A, B, 2).is_legal());
    }

    #[test]
    fn bowler_is_not_charged_byes() {
        let seq = Delivery::sequence_for(
            InningsId(1),
            MatchId(1),
            [
                DeliveryInput::byes(A, B, 4),
                DeliveryInput::wide(A, B, 2),
                DeliveryInput::no_ball(A, B, 6),
            ],
        );
        assert_eq!(seq[0].bowler_runs(), 0);
        assert_eq!(seq[1].bowler_runs(), 2);
        assert_eq!(seq[2].bowler_runs(), 7);
    }

    #[test]
    fn input_defaults_from_minimal_json() {
        let input: DeliveryInput = serde_json::from_str(r#"{"batter":1,"bowler":2}"#).unwrap();
        assert_eq!(input, DeliveryInput::dot(A, B));
    }

    #[test]
    fn wicket_kind_wire_names() {
        let json = serde_json::to_string(&WicketKind::RunOut).unwrap();
        assert_eq!(json, "\"RUN_OUT\"");
        let kind: ExtraKind = serde_json::from_str("\"LEG_BYE\"").unwrap();
        assert_eq!(kind, ExtraKind::LegBye);
    }
}
