//! Match outcome, live match statistics and the scorecard view.
//!
//! Everything here is rebuilt from innings totals. A scorecard is never
//! patched: each call produces a complete, sealed snapshot.

use scorebook_types::{
    BattingSideSummary, Innings, Match, MatchId, MatchStatistics, PlayerId, Scorecard, TeamId,
    TeamLine, WinMargin,
};

use crate::digest::seal_scorecard;
use crate::rates::{current_run_rate, required_run_rate};

/// Winner and margin of a finished match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub winning_team: Option<TeamId>,
    pub win_margin: Option<WinMargin>,
}

fn by_number(innings: &[Innings]) -> (Option<&Innings>, Option<&Innings>) {
    let first = innings.iter().find(|i| i.number == 1);
    let second = innings.iter().find(|i| i.number == 2);
    (first, second)
}

/// Decide the result from the first and second innings.
///
/// - chasing side ahead: wins by the wickets it had in hand
/// - defending side ahead: wins by the run difference
/// - level: a tie with no winning team
///
/// Without both innings there is no result.
#[must_use]
pub fn decide_result(innings: &[Innings], max_wickets: u32) -> MatchResult {
    let (Some(first), Some(second)) = by_number(innings) else {
        return MatchResult::default();
    };
    let (set, chased) = (first.totals.runs, second.totals.runs);

    if chased > set {
        MatchResult {
            winning_team: Some(second.batting_team),
            win_margin: Some(WinMargin::Wickets(
                max_wickets.saturating_sub(second.totals.wickets),
            )),
        }
    } else if set > chased {
        MatchResult {
            winning_team: Some(first.batting_team),
            win_margin: Some(WinMargin::Runs(set - chased)),
        }
    } else {
        MatchResult {
            winning_team: None,
            win_margin: Some(WinMargin::Tie),
        }
    }
}

/// Live per-side figures, with target and required rate once a chase is on.
#[must_use]
pub fn match_statistics(
    match_id: MatchId,
    innings: &[Innings],
    match_over_limit: u32,
) -> MatchStatistics {
    let mut ordered: Vec<&Innings> = innings.iter().collect();
    ordered.sort_by_key(|i| i.number);

    let sides = ordered
        .iter()
        .map(|i| BattingSideSummary {
            team_id: i.batting_team,
            runs: i.totals.runs,
            wickets: i.totals.wickets,
            overs: i.totals.overs,
            run_rate: current_run_rate(&i.totals),
        })
        .collect();

    let (target, required) = match by_number(innings) {
        (Some(first), Some(second)) => {
            let target = first.totals.runs + 1;
            let rate = required_run_rate(
                target,
                second.totals.runs,
                second.totals.legal_balls,
                match_over_limit,
            );
            (Some(target), Some(rate))
        }
        _ => (None, None),
    };

    MatchStatistics {
        match_id,
        sides,
        target,
        required_run_rate: required,
    }
}

fn line_for(team: TeamId, innings: &[Innings]) -> TeamLine {
    innings
        .iter()
        .find(|i| i.batting_team == team)
        .map_or_else(|| TeamLine::yet_to_bat(team), |i| TeamLine::from_totals(team, &i.totals))
}

/// Materialise the scorecard for a match from its innings.
#[must_use]
pub fn build_scorecard(
    fixture: &Match,
    innings: &[Innings],
    man_of_the_match: Option<PlayerId>,
    result: MatchResult,
) -> Scorecard {
    seal_scorecard(Scorecard {
        match_id: fixture.id,
        team1: line_for(fixture.team1, innings),
        team2: line_for(fixture.team2, innings),
        winning_team: result.winning_team,
        win_margin: result.win_margin,
        man_of_the_match,
        digest: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use scorebook_types::*;

    use super::*;
    use crate::digest::verify_scorecard;

    const HOME: TeamId = TeamId(1);
    const AWAY: TeamId = TeamId(2);

    fn innings(number: u8, batting: TeamId, runs: u32, wickets: u32, balls: u32) -> Innings {
        let bowling = if batting == HOME { AWAY } else { HOME };
        let mut i = Innings::open(InningsId(u64::from(number)), MatchId(1), batting, bowling, number);
        i.totals = InningsTotals {
            runs,
            wickets,
            legal_balls: balls,
            overs: numeric::overs_from_balls(balls),
            ..InningsTotals::default()
        };
        i
    }

    fn fixture() -> Match {
        Match {
            id: MatchId(1),
            league_id: LeagueId(1),
            team1: HOME,
            team2: AWAY,
            venue: "Chepauk".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            status: MatchStatus::InProgress,
        }
    }

    #[test]
    fn chasing_side_wins_by_wickets() {
        let result = decide_result(
            &[innings(1, HOME, 150, 8, 120), innings(2, AWAY, 151, 4, 110)],
            10,
        );
        assert_eq!(result.winning_team, Some(AWAY));
        assert_eq!(result.win_margin, Some(WinMargin::Wickets(6)));
    }

    #[test]
    fn defending_side_wins_by_runs() {
        let result = decide_result(
            &[innings(1, HOME, 180, 5, 120), innings(2, AWAY, 157, 10, 115)],
            10,
        );
        assert_eq!(result.winning_team, Some(HOME));
        assert_eq!(result.win_margin, Some(WinMargin::Runs(23)));
    }

    #[test]
    fn level_scores_tie() {
        let result = decide_result(
            &[innings(1, HOME, 140, 7, 120), innings(2, AWAY, 140, 9, 120)],
            10,
        );
        assert_eq!(result.winning_team, None);
        assert_eq!(result.win_margin, Some(WinMargin::Tie));
    }

    #[test]
    fn one_innings_has_no_result() {
        let result = decide_result(&[innings(1, HOME, 140, 7, 120)], 10);
        assert_eq!(result, MatchResult::default());
    }

    #[test]
    fn live_statistics_with_chase() {
        let stats = match_statistics(
            MatchId(1),
            &[innings(2, AWAY, 60, 2, 60), innings(1, HOME, 149, 6, 120)],
            20,
        );
        assert_eq!(stats.sides.len(), 2);
        assert_eq!(stats.sides[0].team_id, HOME);
        assert_eq!(stats.sides[1].run_rate, Decimal::new(6, 0));
        assert_eq!(stats.target, Some(150));
        assert_eq!(stats.required_run_rate, Some(Decimal::new(9, 0)));
    }

    #[test]
    fn live_statistics_first_innings_only() {
        let stats = match_statistics(MatchId(1), &[innings(1, HOME, 30, 1, 18)], 20);
        assert_eq!(stats.target, None);
        assert_eq!(stats.required_run_rate, None);
        assert_eq!(stats.sides[0].run_rate, Decimal::new(10, 0));
    }

    #[test]
    fn scorecard_lines_follow_fixture_order() {
        let all = [innings(1, AWAY, 99, 3, 72)];
        let card = build_scorecard(&fixture(), &all, Some(PlayerId(7)), MatchResult::default());
        assert_eq!(card.team1, TeamLine::yet_to_bat(HOME));
        assert_eq!(card.team2.runs, 99);
        assert_eq!(card.team2.overs, Decimal::new(12, 0));
        assert_eq!(card.man_of_the_match, Some(PlayerId(7)));
        assert!(verify_scorecard(&card));
    }
}
