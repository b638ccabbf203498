//! Award resolver: leaderboards and single best selections.
//!
//! Every selection takes an explicit [`TieBreak`]. With `LowestPlayerId`
//! equal scores go to the lowest id (player or team); with
//! `FirstEncountered` the first candidate in input order keeps the award.

use std::cmp::Ordering;
use std::collections::HashMap;

use scorebook_types::{
    BattingStats, BowlingStats, Delivery, EngineConfig, PlayerId, PlayerPoints, TieBreak,
};

/// Pick the candidate with the highest score.
pub fn select_best<T>(
    candidates: impl IntoIterator<Item = T>,
    score: impl Fn(&T) -> u32,
    id: impl Fn(&T) -> u64,
    tie_break: TieBreak,
) -> Option<T> {
    let mut best: Option<T> = None;
    for candidate in candidates {
        let replace = match &best {
            None => true,
            Some(current) => match score(&candidate).cmp(&score(current)) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => {
                    tie_break == TieBreak::LowestPlayerId && id(&candidate) < id(current)
                }
            },
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}

/// Sort descending by `metric` and keep the top `limit`.
pub fn rank_by<T>(
    mut items: Vec<T>,
    metric: impl Fn(&T) -> u32,
    id: impl Fn(&T) -> u64,
    tie_break: TieBreak,
    limit: usize,
) -> Vec<T> {
    items.sort_by(|a, b| {
        let by_metric = metric(b).cmp(&metric(a));
        match tie_break {
            TieBreak::LowestPlayerId => by_metric.then_with(|| id(a).cmp(&id(b))),
            TieBreak::FirstEncountered => by_metric,
        }
    });
    items.truncate(limit);
    items
}

/// Points for one match: runs off the bat plus weighted wickets.
///
/// Players appear in the order they are first seen in the ledger.
#[must_use]
pub fn match_points(deliveries: &[Delivery], config: &EngineConfig) -> Vec<PlayerPoints> {
    let mut ordered: Vec<&Delivery> = deliveries.iter().collect();
    ordered.sort_by_key(|d| d.ledger_key());

    let mut points: Vec<PlayerPoints> = Vec::new();
    let mut index: HashMap<PlayerId, usize> = HashMap::new();
    let mut slot = |player: PlayerId, points: &mut Vec<PlayerPoints>| {
        *index.entry(player).or_insert_with(|| {
            points.push(PlayerPoints {
                player_id: player,
                points: 0,
            });
            points.len() - 1
        })
    };

    for d in ordered {
        let batter = slot(d.batter, &mut points);
        points[batter].points = points[batter]
            .points
            .saturating_add(u32::from(d.runs_off_bat).saturating_mul(config.run_points));
        let bowler = slot(d.bowler, &mut points);
        if d.is_wicket {
            points[bowler].points = points[bowler].points.saturating_add(config.wicket_points);
        }
    }
    points
}

/// Player of the match from every delivery of that match.
#[must_use]
pub fn man_of_the_match(deliveries: &[Delivery], config: &EngineConfig) -> Option<PlayerId> {
    select_best(
        match_points(deliveries, config),
        |p| p.points,
        |p| p.player_id.0,
        config.tie_break,
    )
    .map(|p| p.player_id)
}

/// Points from season figures, weighted the same way as a single match.
#[must_use]
pub fn season_points(
    batting: &BattingStats,
    bowling: &BowlingStats,
    config: &EngineConfig,
) -> PlayerPoints {
    PlayerPoints {
        player_id: batting.player_id,
        points: batting
            .total_runs
            .saturating_mul(config.run_points)
            .saturating_add(bowling.wickets.saturating_mul(config.wicket_points)),
    }
}

/// Orange cap table: most runs first.
#[must_use]
pub fn batting_leaderboard(stats: Vec<BattingStats>, config: &EngineConfig) -> Vec<BattingStats> {
    rank_by(
        stats,
        |s| s.total_runs,
        |s| s.player_id.0,
        config.tie_break,
        config.leaderboard_size,
    )
}

/// Purple cap table: most wickets first.
#[must_use]
pub fn bowling_leaderboard(stats: Vec<BowlingStats>, config: &EngineConfig) -> Vec<BowlingStats> {
    rank_by(
        stats,
        |s| s.wickets,
        |s| s.player_id.0,
        config.tie_break,
        config.leaderboard_size,
    )
}

/// Batters with at least one century, most centuries first.
#[must_use]
pub fn century_makers(stats: Vec<BattingStats>, tie_break: TieBreak) -> Vec<BattingStats> {
    let makers: Vec<_> = stats.into_iter().filter(|s| s.centuries > 0).collect();
    let len = makers.len();
    rank_by(makers, |s| s.centuries, |s| s.player_id.0, tie_break, len)
}

/// Bowlers with at least one five-wicket haul, most hauls first.
#[must_use]
pub fn five_wicket_haul_takers(stats: Vec<BowlingStats>, tie_break: TieBreak) -> Vec<BowlingStats> {
    let takers: Vec<_> = stats
        .into_iter()
        .filter(|s| s.five_wicket_hauls > 0)
        .collect();
    let len = takers.len();
    rank_by(takers, |s| s.five_wicket_hauls, |s| s.player_id.0, tie_break, len)
}
