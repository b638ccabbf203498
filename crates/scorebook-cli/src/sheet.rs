//! Match sheets: a JSON description of a league's teams and fixtures with
//! their ball-by-ball record, replayed through the scoring engine.
//!
//! ```json
//! {
//!   "league": 1,
//!   "teams": [{ "name": "Mumbai", "players": ["Rohit", "Bumrah"] }],
//!   "matches": [{
//!     "team1": "Mumbai", "team2": "Chennai",
//!     "venue": "Wankhede", "date": "2024-04-01",
//!     "outcome": "completed",
//!     "innings": [{
//!       "batting": "Mumbai",
//!       "balls": [
//!         { "batter": "Rohit", "bowler": "Jadeja", "runs": 4 },
//!         { "batter": "Rohit", "bowler": "Jadeja", "extra": "WIDE", "extra_runs": 1 },
//!         { "batter": "Rohit", "bowler": "Jadeja", "wicket": "CAUGHT" },
//!         "undo"
//!       ]
//!     }]
//!   }]
//! }
//! ```
//!
//! Every innings but the last of a match is completed (or declared) before
//! the next one opens. The last innings stays open until the match outcome
//! is applied.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use scorebook_engine::{MemorySnapshotSink, ScoringEngine};
use scorebook_ledger::MemoryLedgerStore;
use scorebook_types::{
    DeliveryInput, EngineConfig, ExtraKind, LeagueId, MatchId, PlayerId, Scorecard, Standing,
    TeamAwards, TeamId, TournamentAwards, WicketKind, constants,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

type Engine = ScoringEngine<MemoryLedgerStore, MemorySnapshotSink>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSheet {
    #[serde(default = "default_league")]
    pub league: u64,
    pub teams: Vec<TeamEntry>,
    #[serde(default)]
    pub matches: Vec<MatchEntry>,
}

fn default_league() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamEntry {
    pub name: String,
    pub players: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchEntry {
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub innings: Vec<InningsEntry>,
}

/// What happens to a match after its innings are replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Completed,
    Abandoned,
    Cancelled,
    /// Left live, last innings open.
    InProgress,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InningsEntry {
    pub batting: String,
    #[serde(default)]
    pub declared: bool,
    #[serde(default)]
    pub balls: Vec<SheetEntry>,
}

/// One line of an innings: a delivery, or `"undo"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SheetEntry {
    Keyword(Keyword),
    Ball(BallEntry),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Undo,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BallEntry {
    pub batter: String,
    pub bowler: String,
    #[serde(default)]
    pub runs: u8,
    #[serde(default)]
    pub wicket: Option<WicketKind>,
    #[serde(default)]
    pub extra: Option<ExtraKind>,
    #[serde(default)]
    pub extra_runs: u32,
}

impl BallEntry {
    fn to_input(&self, names: &Names) -> Result<DeliveryInput> {
        Ok(DeliveryInput {
            batter: names.player(&self.batter)?,
            bowler: names.player(&self.bowler)?,
            runs_off_bat: self.runs,
            is_wicket: self.wicket.is_some(),
            wicket_kind: self.wicket,
            extra_kind: self.extra,
            extra_runs: self.extra_runs,
            is_wide: self.extra == Some(ExtraKind::Wide),
            is_no_ball: self.extra == Some(ExtraKind::NoBall),
            is_bye: self.extra == Some(ExtraKind::Bye),
            is_leg_bye: self.extra == Some(ExtraKind::LegBye),
        })
    }
}

/// Everything the binary prints after a replay.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Engine name and version that produced the figures.
    pub engine: String,
    pub league: LeagueId,
    pub scorecards: Vec<Scorecard>,
    pub standings: Vec<Standing>,
    pub awards: TournamentAwards,
    pub team_awards: TeamAwards,
}

#[derive(Default)]
struct Names {
    teams: HashMap<String, TeamId>,
    players: HashMap<String, PlayerId>,
}

impl Names {
    fn team(&self, name: &str) -> Result<TeamId> {
        self.teams
            .get(name)
            .copied()
            .with_context(|| format!("unknown team {name:?}"))
    }

    fn player(&self, name: &str) -> Result<PlayerId> {
        self.players
            .get(name)
            .copied()
            .with_context(|| format!("unknown player {name:?}"))
    }
}

/// Replay `sheet` through a fresh in-memory engine.
pub fn replay(sheet: &MatchSheet, config: EngineConfig) -> Result<Report> {
    let engine: Engine = ScoringEngine::new(
        config,
        Arc::new(MemoryLedgerStore::new()),
        Arc::new(MemorySnapshotSink::new()),
    )?;
    let league = LeagueId(sheet.league);
    let names = register(&engine, league, &sheet.teams)?;

    let mut match_ids = Vec::with_capacity(sheet.matches.len());
    for (n, entry) in sheet.matches.iter().enumerate() {
        let match_id = play(&engine, league, &names, entry)
            .with_context(|| format!("match #{} ({} v {})", n + 1, entry.team1, entry.team2))?;
        match_ids.push(match_id);
    }

    let scorecards = match_ids
        .into_iter()
        .map(|id| engine.scorecard(id))
        .collect::<scorebook_types::Result<Vec<_>>>()?;
    let report = Report {
        engine: format!("{} {}", constants::ENGINE_NAME, constants::VERSION),
        league,
        scorecards,
        standings: engine.standings(league)?,
        awards: engine.tournament_awards(league)?,
        team_awards: engine.team_awards(league)?,
    };
    info!(league = %league, matches = report.scorecards.len(), "Sheet replayed");
    Ok(report)
}

fn register(engine: &Engine, league: LeagueId, teams: &[TeamEntry]) -> Result<Names> {
    let mut names = Names::default();
    for entry in teams {
        if names.teams.contains_key(&entry.name) {
            bail!("team {:?} listed twice", entry.name);
        }
        let team = engine.register_team(&entry.name, league);
        names.teams.insert(entry.name.clone(), team.id);
        for player in &entry.players {
            if names.players.contains_key(player) {
                bail!("player name {player:?} is not unique");
            }
            let id = engine.register_player(player, team.id)?.id;
            names.players.insert(player.clone(), id);
        }
    }
    Ok(names)
}

fn play(engine: &Engine, league: LeagueId, names: &Names, entry: &MatchEntry) -> Result<MatchId> {
    let team1 = names.team(&entry.team1)?;
    let team2 = names.team(&entry.team2)?;
    let fixture = engine.schedule_match(league, team1, team2, &entry.venue, entry.date)?;
    if entry.outcome == Outcome::Cancelled && entry.innings.is_empty() {
        engine.cancel_match(fixture.id)?;
        return Ok(fixture.id);
    }
    engine.start_match(fixture.id)?;

    let last = entry.innings.len().saturating_sub(1);
    for (i, innings_entry) in entry.innings.iter().enumerate() {
        let batting = names.team(&innings_entry.batting)?;
        let bowling = fixture.opponent_of(batting).with_context(|| {
            format!("{:?} does not play in this match", innings_entry.batting)
        })?;
        let number = u8::try_from(i + 1).context("too many innings")?;
        let innings = engine.start_innings(fixture.id, batting, bowling, number)?;

        for (ball, line) in innings_entry.balls.iter().enumerate() {
            match line {
                SheetEntry::Keyword(Keyword::Undo) => {
                    engine.undo_last(innings.id)?;
                }
                SheetEntry::Ball(ball_entry) => {
                    engine
                        .record_delivery(innings.id, ball_entry.to_input(names)?)
                        .with_context(|| format!("innings {number}, line {}", ball + 1))?;
                }
            }
        }

        if innings_entry.declared {
            engine.declare_innings(innings.id)?;
        } else if i < last {
            engine.complete_innings(innings.id)?;
        }
        debug!(innings = %innings.id, lines = innings_entry.balls.len(), "Innings replayed");
    }

    match entry.outcome {
        Outcome::Completed => {
            engine.complete_match(fixture.id)?;
        }
        Outcome::Abandoned => {
            engine.abandon_match(fixture.id)?;
        }
        Outcome::Cancelled => {
            engine.cancel_match(fixture.id)?;
        }
        Outcome::InProgress => {}
    }
    Ok(fixture.id)
}
