//! Player statistics: batting and bowling figures folded across innings.
//!
//! Deliveries are sorted by (innings, recording order) before folding, so a
//! change of innings id between neighbours is always a real innings
//! boundary regardless of how the caller ordered its input. Each closed
//! innings is classified for milestones (centuries, half-centuries,
//! five-wicket hauls) when the next innings starts and at end of stream.

use scorebook_types::{
    BattingStats, BowlingStats, Delivery, InningsId, PlayerId, constants, numeric,
};

/// Per-innings running tally with boundary detection by innings id.
struct InningsTally {
    current: Option<InningsId>,
    value: u32,
    innings_seen: u32,
}

impl InningsTally {
    fn new() -> Self {
        Self {
            current: None,
            value: 0,
            innings_seen: 0,
        }
    }

    /// Move to `innings`, returning the closed tally if the innings changed.
    fn enter(&mut self, innings: InningsId) -> Option<u32> {
        match self.current {
            Some(current) if current == innings => None,
            previous => {
                self.current = Some(innings);
                self.innings_seen += 1;
                let closed = std::mem::take(&mut self.value);
                previous.map(|_| closed)
            }
        }
    }

    /// Close the last innings at end of stream.
    fn finish(&mut self) -> Option<u32> {
        self.current.take().map(|_| std::mem::take(&mut self.value))
    }
}

fn sorted_for(player: PlayerId, deliveries: &[Delivery], as_batter: bool) -> Vec<&Delivery> {
    let mut own: Vec<&Delivery> = deliveries
        .iter()
        .filter(|d| {
            if as_batter {
                d.batter == player
            } else {
                d.bowler == player
            }
        })
        .collect();
    own.sort_by_key(|d| d.ledger_key());
    own
}

/// Batting figures for `player` from the deliveries they faced.
///
/// Deliveries not faced by `player` are ignored.
#[must_use]
pub fn batting_stats(player: PlayerId, deliveries: &[Delivery]) -> BattingStats {
    let mut stats = BattingStats {
        player_id: player,
        ..BattingStats::default()
    };
    let mut tally = InningsTally::new();

    let close = |score: u32, stats: &mut BattingStats| {
        if score >= constants::CENTURY_THRESHOLD {
            stats.centuries += 1;
        } else if score >= constants::HALF_CENTURY_THRESHOLD {
            stats.half_centuries += 1;
        }
        stats.highest_score = stats.highest_score.max(score);
    };

    for d in sorted_for(player, deliveries, true) {
        if let Some(score) = tally.enter(d.innings_id) {
            close(score, &mut stats);
        }
        if d.is_legal() {
            stats.balls_faced += 1;
        }
        let runs = u32::from(d.runs_off_bat);
        stats.total_runs += runs;
        tally.value += runs;
        match d.runs_off_bat {
            4 => stats.fours += 1,
            6 => stats.sixes += 1,
            _ => {}
        }
    }
    if let Some(score) = tally.finish() {
        close(score, &mut stats);
    }

    stats.innings = tally.innings_seen;
    stats.average = numeric::ratio(stats.total_runs, stats.balls_faced);
    stats.strike_rate = numeric::per_hundred(stats.total_runs, stats.balls_faced);
    stats
}

/// Bowling figures for `player` from the deliveries they bowled.
///
/// Deliveries not bowled by `player` are ignored.
#[must_use]
pub fn bowling_stats(player: PlayerId, deliveries: &[Delivery]) -> BowlingStats {
    let mut stats = BowlingStats {
        player_id: player,
        ..BowlingStats::default()
    };
    let mut tally = InningsTally::new();

    for d in sorted_for(player, deliveries, false) {
        if let Some(wickets) = tally.enter(d.innings_id) {
            if wickets >= constants::FIVE_WICKET_HAUL_THRESHOLD {
                stats.five_wicket_hauls += 1;
            }
        }
        if d.is_legal() {
            stats.balls_bowled += 1;
        }
        stats.runs_conceded += d.bowler_runs();
        if d.is_wicket {
            stats.wickets += 1;
            tally.value += 1;
        }
    }
    if let Some(wickets) = tally.finish() {
        if wickets >= constants::FIVE_WICKET_HAUL_THRESHOLD {
            stats.five_wicket_hauls += 1;
        }
    }

    stats.innings = tally.innings_seen;
    stats.overs = numeric::overs_from_balls(stats.balls_bowled);
    stats.economy = numeric::runs_per_over(stats.runs_conceded, stats.balls_bowled);
    stats.average = numeric::ratio(stats.runs_conceded, stats.wickets);
    stats
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use scorebook_types::*;

    use super::*;

    const BAT: PlayerId = PlayerId(1);
    const BOWL: PlayerId = PlayerId(2);
    const OTHER: PlayerId = PlayerId(3);

    /// Legal deliveries to `BAT` adding up to `score`, in fours then singles.
    fn knock(innings: InningsId, score: u32) -> Vec<Delivery> {
        let mut inputs = Vec::new();
        for _ in 0..score / 4 {
            inputs.push(DeliveryInput::runs(BAT, BOWL, 4));
        }
        for _ in 0..score % 4 {
            inputs.push(DeliveryInput::runs(BAT, BOWL, 1));
        }
        Delivery::sequence_for(innings, MatchId(1), inputs)
    }

    #[test]
    fn fifty_and_hundred_across_two_innings() {
        let mut deliveries = knock(InningsId(1), 50);
        deliveries.extend(knock(InningsId(2), 100));
        let stats = batting_stats(BAT, &deliveries);
        assert_eq!(stats.half_centuries, 1);
        assert_eq!(stats.centuries, 1);
        assert_eq!(stats.highest_score, 100);
        assert_eq!(stats.total_runs, 150);
        assert_eq!(stats.innings, 2);
    }

    #[test]
    fn milestones_independent_of_input_order() {
        let mut deliveries = knock(InningsId(2), 100);
        deliveries.extend(knock(InningsId(1), 50));
        deliveries.reverse();
        let stats = batting_stats(BAT, &deliveries);
        assert_eq!(stats.half_centuries, 1);
        assert_eq!(stats.centuries, 1);
        assert_eq!(stats.highest_score, 100);
    }

    #[test]
    fn first_ball_of_new_innings_belongs_to_it() {
        // 49 then 51: a fold that closes after adding the boundary ball
        // would misread these as 53 and 47.
        let mut deliveries = knock(InningsId(1), 49);
        deliveries.extend(knock(InningsId(2), 51));
        let stats = batting_stats(BAT, &deliveries);
        assert_eq!(stats.half_centuries, 1);
        assert_eq!(stats.highest_score, 51);
    }

    #[test]
    fn batting_rates_and_boundaries() {
        let deliveries = Delivery::sequence_for(
            InningsId(1),
            MatchId(1),
            [
                DeliveryInput::runs(BAT, BOWL, 4),
                DeliveryInput::runs(BAT, BOWL, 6),
                DeliveryInput::no_ball(BAT, BOWL, 4),
                DeliveryInput::dot(BAT, BOWL),
                DeliveryInput::runs(OTHER, BOWL, 6),
            ],
        );
        let stats = batting_stats(BAT, &deliveries);
        assert_eq!(stats.total_runs, 14);
        assert_eq!(stats.balls_faced, 3);
        assert_eq!(stats.fours, 2);
        assert_eq!(stats.sixes, 1);
        assert_eq!(stats.average, Decimal::new(467, 2));
        assert_eq!(stats.strike_rate, Decimal::new(46667, 2));
    }

    #[test]
    fn no_balls_faced_gives_zero_rates() {
        let deliveries = Delivery::sequence_for(
            InningsId(1),
            MatchId(1),
            [DeliveryInput::wide(BAT, BOWL, 1)],
        );
        let stats = batting_stats(BAT, &deliveries);
        assert_eq!(stats.balls_faced, 0);
        assert_eq!(stats.average, Decimal::ZERO);
        assert_eq!(stats.strike_rate, Decimal::ZERO);
        assert_eq!(batting_stats(OTHER, &[]), BattingStats {
            player_id: OTHER,
            ..BattingStats::default()
        });
    }

    #[test]
    fn five_wicket_haul_per_innings() {
        let five: Vec<_> = (0..5)
            .map(|i| DeliveryInput::wicket(PlayerId(10 + i), BOWL, WicketKind::Bowled))
            .collect();
        let four: Vec<_> = (0..4)
            .map(|i| DeliveryInput::wicket(PlayerId(20 + i), BOWL, WicketKind::Caught))
            .collect();
        let mut deliveries = Delivery::sequence_for(InningsId(1), MatchId(1), five);
        deliveries.extend(Delivery::sequence_for(InningsId(3), MatchId(2), four));
        let stats = bowling_stats(BOWL, &deliveries);
        assert_eq!(stats.wickets, 9);
        assert_eq!(stats.five_wicket_hauls, 1);
        assert_eq!(stats.innings, 2);
    }

    #[test]
    fn bowling_rates() {
        let deliveries = Delivery::sequence_for(
            InningsId(1),
            MatchId(1),
            [
                DeliveryInput::runs(BAT, BOWL, 4),
                DeliveryInput::runs(BAT, BOWL, 2),
                DeliveryInput::wide(BAT, BOWL, 1),
                DeliveryInput::byes(BAT, BOWL, 4),
                DeliveryInput::dot(BAT, BOWL),
                DeliveryInput::wicket(BAT, BOWL, WicketKind::Stumped),
                DeliveryInput::runs(BAT, BOWL, 1),
            ],
        );
        let stats = bowling_stats(BOWL, &deliveries);
        assert_eq!(stats.balls_bowled, 6);
        assert_eq!(stats.runs_conceded, 8);
        assert_eq!(stats.overs, Decimal::ONE);
        assert_eq!(stats.economy, Decimal::new(8, 0));
        assert_eq!(stats.average, Decimal::new(8, 0));
    }

    #[test]
    fn wicketless_bowler_average_is_zero() {
        let deliveries = Delivery::sequence_for(
            InningsId(1),
            MatchId(1),
            [DeliveryInput::runs(BAT, BOWL, 6)],
        );
        let stats = bowling_stats(BOWL, &deliveries);
        assert_eq!(stats.average, Decimal::ZERO);
        assert_eq!(stats.economy, Decimal::new(36, 0));
    }
}
