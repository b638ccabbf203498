//! Read-side queries: innings rates, player figures and league tables.
//!
//! League queries only see deliveries from innings of matches in that
//! league. Career figures (`batting_stats` / `bowling_stats`) see every
//! delivery the player took part in.

use std::collections::HashSet;

use rust_decimal::Decimal;
use scorebook_ledger::LedgerStore;
use scorebook_stats::{
    batting_leaderboard, batting_stats, bowling_leaderboard, bowling_stats, century_makers,
    current_run_rate, five_wicket_haul_takers, match_statistics, net_run_rate, over_progression,
    partnership, required_run_rate, season_points, select_best,
};
use scorebook_types::{
    BattingStats, BowlingStats, Delivery, Innings, InningsId, LeagueId, MatchId, MatchStatistics,
    MatchStatus, OverProgression, Partnership, Player, PlayerId, PlayerLine, PlayerRole, Result,
    Standing, TeamAward, TeamAwards, TeamId, TeamStats, TournamentAwards, constants, numeric,
};

use crate::engine::ScoringEngine;
use crate::sink::SnapshotSink;

impl<S: LedgerStore, K: SnapshotSink> ScoringEngine<S, K> {
    // =================================================================
    // Innings and match rates
    // =================================================================

    pub fn current_run_rate(&self, innings_id: InningsId) -> Result<Decimal> {
        Ok(current_run_rate(&self.registry.innings(innings_id)?.totals))
    }

    /// Required rate for `innings_id` to reach `target` within the over limit.
    pub fn required_run_rate(&self, innings_id: InningsId, target: u32) -> Result<Decimal> {
        let totals = self.registry.innings(innings_id)?.totals;
        Ok(required_run_rate(
            target,
            totals.runs,
            totals.legal_balls,
            self.config.match_over_limit,
        ))
    }

    pub fn partnership(
        &self,
        innings_id: InningsId,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<Partnership> {
        Ok(partnership(&self.deliveries(innings_id)?, a, b))
    }

    pub fn over_progression(&self, innings_id: InningsId) -> Result<OverProgression> {
        Ok(over_progression(&self.deliveries(innings_id)?))
    }

    pub fn match_statistics(&self, match_id: MatchId) -> Result<MatchStatistics> {
        self.registry.fixture(match_id)?;
        let innings = self.registry.match_innings(match_id);
        Ok(match_statistics(
            match_id,
            &innings,
            self.config.match_over_limit,
        ))
    }

    // =================================================================
    // Player figures
    // =================================================================

    /// Career batting figures.
    pub fn batting_stats(&self, player: PlayerId) -> Result<BattingStats> {
        self.registry.player(player)?;
        let faced = self.ledger.store().list_player(player, PlayerRole::Batter)?;
        Ok(batting_stats(player, &faced))
    }

    /// Career bowling figures.
    pub fn bowling_stats(&self, player: PlayerId) -> Result<BowlingStats> {
        self.registry.player(player)?;
        let bowled = self.ledger.store().list_player(player, PlayerRole::Bowler)?;
        Ok(bowling_stats(player, &bowled))
    }

    fn league_innings(&self, league: LeagueId) -> Result<Vec<Innings>> {
        self.registry.league_teams(league)?;
        Ok(self
            .registry
            .league_matches(league)
            .iter()
            .flat_map(|m| self.registry.match_innings(m.id))
            .collect())
    }

    fn scoped(
        &self,
        player: PlayerId,
        role: PlayerRole,
        scope: &HashSet<InningsId>,
    ) -> Result<Vec<Delivery>> {
        Ok(self
            .ledger
            .store()
            .list_player(player, role)?
            .into_iter()
            .filter(|d| scope.contains(&d.innings_id))
            .collect())
    }

    /// Batting and bowling figures for every player of the league, in id order.
    fn league_figures(
        &self,
        league: LeagueId,
    ) -> Result<Vec<(Player, BattingStats, BowlingStats)>> {
        let scope: HashSet<InningsId> = self
            .league_innings(league)?
            .iter()
            .map(|i| i.id)
            .collect();
        let mut figures = Vec::new();
        for player in self.registry.league_players(league)? {
            let batting = batting_stats(
                player.id,
                &self.scoped(player.id, PlayerRole::Batter, &scope)?,
            );
            let bowling = bowling_stats(
                player.id,
                &self.scoped(player.id, PlayerRole::Bowler, &scope)?,
            );
            figures.push((player, batting, bowling));
        }
        Ok(figures)
    }

    fn player_line<T>(&self, player_id: PlayerId, stats: T) -> Result<PlayerLine<T>> {
        let player = self.registry.player(player_id)?;
        let team = self.registry.team(player.team_id)?;
        Ok(PlayerLine {
            player_id,
            player_name: player.name,
            team_name: team.name,
            stats,
        })
    }

    fn lines<T>(
        &self,
        stats: Vec<T>,
        id: impl Fn(&T) -> PlayerId,
    ) -> Result<Vec<PlayerLine<T>>> {
        stats
            .into_iter()
            .map(|s| {
                let player = id(&s);
                self.player_line(player, s)
            })
            .collect()
    }

    // =================================================================
    // Leaderboards and awards
    // =================================================================

    /// Most runs in the league, capped at the leaderboard size.
    pub fn orange_cap(&self, league: LeagueId) -> Result<Vec<PlayerLine<BattingStats>>> {
        let batting = self
            .league_figures(league)?
            .into_iter()
            .map(|(_, batting, _)| batting)
            .collect();
        self.lines(batting_leaderboard(batting, &self.config), |s| s.player_id)
    }

    /// Most wickets in the league, capped at the leaderboard size.
    pub fn purple_cap(&self, league: LeagueId) -> Result<Vec<PlayerLine<BowlingStats>>> {
        let bowling = self
            .league_figures(league)?
            .into_iter()
            .map(|(_, _, bowling)| bowling)
            .collect();
        self.lines(bowling_leaderboard(bowling, &self.config), |s| s.player_id)
    }

    pub fn century_makers(&self, league: LeagueId) -> Result<Vec<PlayerLine<BattingStats>>> {
        let batting = self
            .league_figures(league)?
            .into_iter()
            .map(|(_, batting, _)| batting)
            .collect();
        self.lines(century_makers(batting, self.config.tie_break), |s| s.player_id)
    }

    pub fn five_wicket_haul_takers(
        &self,
        league: LeagueId,
    ) -> Result<Vec<PlayerLine<BowlingStats>>> {
        let bowling = self
            .league_figures(league)?
            .into_iter()
            .map(|(_, _, bowling)| bowling)
            .collect();
        self.lines(
            five_wicket_haul_takers(bowling, self.config.tie_break),
            |s| s.player_id,
        )
    }

    /// Top run scorer, top wicket taker and most valuable player.
    pub fn tournament_awards(&self, league: LeagueId) -> Result<TournamentAwards> {
        let figures = self.league_figures(league)?;
        let tie_break = self.config.tie_break;

        let orange = select_best(
            figures.iter().map(|(_, b, _)| b.clone()),
            |s| s.total_runs,
            |s| s.player_id.0,
            tie_break,
        );
        let purple = select_best(
            figures.iter().map(|(_, _, b)| b.clone()),
            |s| s.wickets,
            |s| s.player_id.0,
            tie_break,
        );
        let mvp = select_best(
            figures
                .iter()
                .map(|(_, batting, bowling)| season_points(batting, bowling, &self.config)),
            |p| p.points,
            |p| p.player_id.0,
            tie_break,
        );

        Ok(TournamentAwards {
            orange_cap: orange
                .map(|s| self.player_line(s.player_id, s))
                .transpose()?,
            purple_cap: purple
                .map(|s| self.player_line(s.player_id, s))
                .transpose()?,
            most_valuable: mvp.map(|p| self.player_line(p.player_id, p)).transpose()?,
        })
    }

    // =================================================================
    // Team tables
    // =================================================================

    /// Aggregate batting of `team` over its innings in the league.
    pub fn team_stats(&self, team: TeamId, league: LeagueId) -> Result<TeamStats> {
        self.registry.team(team)?;
        let innings = self.league_innings(league)?;
        Ok(team_stats_from(team, &innings))
    }

    /// Net run rate of `team` over every league innings it batted or bowled in.
    pub fn net_run_rate(&self, team: TeamId, league: LeagueId) -> Result<Decimal> {
        self.registry.team(team)?;
        let innings = self.league_innings(league)?;
        Ok(nrr_from(team, &innings))
    }

    /// League table: points, then net run rate, then team id.
    pub fn standings(&self, league: LeagueId) -> Result<Vec<Standing>> {
        let teams = self.registry.league_teams(league)?;
        let matches = self.registry.league_matches(league);
        let innings = self.league_innings(league)?;

        let mut table: Vec<Standing> = teams
            .into_iter()
            .map(|team| {
                let (mut played, mut won, mut lost, mut no_result) = (0, 0, 0, 0);
                for m in matches.iter().filter(|m| m.features(team.id)) {
                    match m.status {
                        MatchStatus::Completed => {
                            played += 1;
                            match self.registry.result(m.id).and_then(|r| r.winning_team) {
                                Some(winner) if winner == team.id => won += 1,
                                Some(_) => lost += 1,
                                None => no_result += 1,
                            }
                        }
                        MatchStatus::Abandoned => {
                            played += 1;
                            no_result += 1;
                        }
                        _ => {}
                    }
                }
                Standing {
                    team_id: team.id,
                    team_name: team.name,
                    played,
                    won,
                    lost,
                    no_result,
                    points: won * constants::POINTS_FOR_WIN
                        + no_result * constants::POINTS_FOR_NO_RESULT,
                    net_run_rate: nrr_from(team.id, &innings),
                    stats: team_stats_from(team.id, &innings),
                }
            })
            .collect();

        table.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.net_run_rate.cmp(&a.net_run_rate))
                .then_with(|| a.team_id.cmp(&b.team_id))
        });
        Ok(table)
    }

    /// Best batting side (most runs) and best bowling side (most wickets taken).
    pub fn team_awards(&self, league: LeagueId) -> Result<TeamAwards> {
        let teams = self.registry.league_teams(league)?;
        let innings = self.league_innings(league)?;
        let tie_break = self.config.tie_break;

        let award = |value: &dyn Fn(TeamId) -> u32| {
            select_best(
                teams.iter().map(|t| TeamAward {
                    team_id: t.id,
                    team_name: t.name.clone(),
                    value: value(t.id),
                }),
                |a| a.value,
                |a| a.team_id.0,
                tie_break,
            )
        };

        Ok(TeamAwards {
            best_batting: award(&|team| {
                innings
                    .iter()
                    .filter(|i| i.batting_team == team)
                    .map(|i| i.totals.runs)
                    .sum()
            }),
            best_bowling: award(&|team| {
                innings
                    .iter()
                    .filter(|i| i.bowling_team == team)
                    .map(|i| i.totals.wickets)
                    .sum()
            }),
        })
    }
}

fn team_stats_from(team: TeamId, innings: &[Innings]) -> TeamStats {
    let batted = innings.iter().filter(|i| i.batting_team == team);
    let (runs, wickets, balls) = batted.fold((0, 0, 0), |(r, w, b), i| {
        (r + i.totals.runs, w + i.totals.wickets, b + i.totals.legal_balls)
    });
    TeamStats {
        team_id: team,
        total_runs: runs,
        total_wickets: wickets,
        total_legal_balls: balls,
        total_overs: numeric::overs_from_balls(balls),
        average: numeric::ratio(runs, wickets),
        run_rate: numeric::runs_per_over(runs, balls),
    }
}

fn nrr_from(team: TeamId, innings: &[Innings]) -> Decimal {
    net_run_rate(
        innings
            .iter()
            .filter(|i| i.batting_team == team)
            .map(|i| &i.totals),
        innings
            .iter()
            .filter(|i| i.bowling_team == team)
            .map(|i| &i.totals),
    )
}
