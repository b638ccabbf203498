//! Fixture registry: teams, players, matches and innings with their
//! lifecycle transitions.
//!
//! Ids are allocated here, sequentially per kind starting at 1. A league
//! exists once at least one team is registered in it.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use parking_lot::RwLock;
use scorebook_stats::MatchResult;
use scorebook_types::{
    Innings, InningsId, InningsStatus, InningsTotals, LeagueId, Match, MatchId, MatchStatus,
    Player, PlayerId, Result, ScorebookError, Team, TeamId, constants,
};

#[derive(Debug, Default)]
struct Counters {
    team: u64,
    player: u64,
    fixture: u64,
    innings: u64,
}

#[derive(Debug, Default)]
struct RegistryState {
    teams: BTreeMap<TeamId, Team>,
    players: BTreeMap<PlayerId, Player>,
    matches: BTreeMap<MatchId, Match>,
    innings: BTreeMap<InningsId, Innings>,
    results: HashMap<MatchId, MatchResult>,
    next: Counters,
}

impl RegistryState {
    fn fixture(&self, id: MatchId) -> Result<&Match> {
        self.matches.get(&id).ok_or(ScorebookError::MatchNotFound(id))
    }

    fn innings_mut(&mut self, id: InningsId) -> Result<&mut Innings> {
        self.innings
            .get_mut(&id)
            .ok_or(ScorebookError::InningsNotFound(id))
    }
}

/// Thread-safe record of every fixture the engine knows about.
#[derive(Debug, Default)]
pub struct Registry {
    state: RwLock<RegistryState>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Teams and players
    // -----------------------------------------------------------------

    pub fn add_team(&self, name: &str, league_id: LeagueId) -> Team {
        let mut state = self.state.write();
        state.next.team += 1;
        let team = Team {
            id: TeamId(state.next.team),
            name: name.to_string(),
            league_id,
        };
        state.teams.insert(team.id, team.clone());
        team
    }

    /// # Errors
    /// `TeamNotFound` if the team is not registered.
    pub fn add_player(&self, name: &str, team_id: TeamId) -> Result<Player> {
        let mut state = self.state.write();
        if !state.teams.contains_key(&team_id) {
            return Err(ScorebookError::TeamNotFound(team_id));
        }
        state.next.player += 1;
        let player = Player {
            id: PlayerId(state.next.player),
            name: name.to_string(),
            team_id,
        };
        state.players.insert(player.id, player.clone());
        Ok(player)
    }

    pub fn team(&self, id: TeamId) -> Result<Team> {
        self.state
            .read()
            .teams
            .get(&id)
            .cloned()
            .ok_or(ScorebookError::TeamNotFound(id))
    }

    pub fn player(&self, id: PlayerId) -> Result<Player> {
        self.state
            .read()
            .players
            .get(&id)
            .cloned()
            .ok_or(ScorebookError::PlayerNotFound(id))
    }

    /// Teams of a league in id order.
    ///
    /// # Errors
    /// `LeagueNotFound` if no team is registered in the league.
    pub fn league_teams(&self, league: LeagueId) -> Result<Vec<Team>> {
        let teams: Vec<Team> = self
            .state
            .read()
            .teams
            .values()
            .filter(|t| t.league_id == league)
            .cloned()
            .collect();
        if teams.is_empty() {
            return Err(ScorebookError::LeagueNotFound(league));
        }
        Ok(teams)
    }

    /// Players whose team plays in `league`, in id order.
    pub fn league_players(&self, league: LeagueId) -> Result<Vec<Player>> {
        let teams = self.league_teams(league)?;
        let state = self.state.read();
        Ok(state
            .players
            .values()
            .filter(|p| teams.iter().any(|t| t.id == p.team_id))
            .cloned()
            .collect())
    }

    // -----------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------

    /// # Errors
    /// - `TeamNotFound` for an unregistered team
    /// - `InvalidMatch` if the teams are the same or not both in `league`
    pub fn add_match(
        &self,
        league_id: LeagueId,
        team1: TeamId,
        team2: TeamId,
        venue: &str,
        date: NaiveDate,
    ) -> Result<Match> {
        let mut state = self.state.write();
        if team1 == team2 {
            return Err(ScorebookError::InvalidMatch {
                reason: format!("{team1} cannot play itself"),
            });
        }
        for team in [team1, team2] {
            let registered = state
                .teams
                .get(&team)
                .ok_or(ScorebookError::TeamNotFound(team))?;
            if registered.league_id != league_id {
                return Err(ScorebookError::InvalidMatch {
                    reason: format!("{team} does not play in {league_id}"),
                });
            }
        }
        state.next.fixture += 1;
        let fixture = Match {
            id: MatchId(state.next.fixture),
            league_id,
            team1,
            team2,
            venue: venue.to_string(),
            date,
            status: MatchStatus::Scheduled,
        };
        state.matches.insert(fixture.id, fixture.clone());
        Ok(fixture)
    }

    pub fn fixture(&self, id: MatchId) -> Result<Match> {
        self.state.read().fixture(id).cloned()
    }

    /// Matches of a league in id order.
    #[must_use]
    pub fn league_matches(&self, league: LeagueId) -> Vec<Match> {
        self.state
            .read()
            .matches
            .values()
            .filter(|m| m.league_id == league)
            .cloned()
            .collect()
    }

    /// Move a match to `to`, provided its current status is `from`.
    ///
    /// # Errors
    /// `WrongMatchStatus` naming `from` as the expected status.
    pub fn transition_match(
        &self,
        id: MatchId,
        from: MatchStatus,
        to: MatchStatus,
    ) -> Result<Match> {
        let mut state = self.state.write();
        let fixture = state
            .matches
            .get_mut(&id)
            .ok_or(ScorebookError::MatchNotFound(id))?;
        if fixture.status != from {
            return Err(ScorebookError::WrongMatchStatus {
                expected: from,
                actual: fixture.status,
            });
        }
        fixture.status = to;
        Ok(fixture.clone())
    }

    /// Move a match that has not finished into the terminal status `to`.
    ///
    /// # Errors
    /// `WrongMatchStatus` if the match already is terminal.
    pub fn end_match(&self, id: MatchId, to: MatchStatus) -> Result<Match> {
        let mut state = self.state.write();
        let fixture = state
            .matches
            .get_mut(&id)
            .ok_or(ScorebookError::MatchNotFound(id))?;
        if fixture.status.is_terminal() {
            return Err(ScorebookError::WrongMatchStatus {
                expected: MatchStatus::InProgress,
                actual: fixture.status,
            });
        }
        fixture.status = to;
        Ok(fixture.clone())
    }

    pub fn set_result(&self, id: MatchId, result: MatchResult) {
        self.state.write().results.insert(id, result);
    }

    #[must_use]
    pub fn result(&self, id: MatchId) -> Option<MatchResult> {
        self.state.read().results.get(&id).copied()
    }

    // -----------------------------------------------------------------
    // Innings
    // -----------------------------------------------------------------

    /// Open innings `number` of a match.
    ///
    /// # Errors
    /// - `MatchNotFound`, or `WrongMatchStatus` unless the match is `IN_PROGRESS`
    /// - `InvalidInnings` for a bad number, wrong teams, a duplicate number,
    ///   a team batting twice or a second innings without a first
    /// - `WrongInningsStatus` if the first innings is still `IN_PROGRESS`
    pub fn open_innings(
        &self,
        match_id: MatchId,
        batting: TeamId,
        bowling: TeamId,
        number: u8,
    ) -> Result<Innings> {
        let mut state = self.state.write();
        let fixture = state.fixture(match_id)?;
        if fixture.status != MatchStatus::InProgress {
            return Err(ScorebookError::WrongMatchStatus {
                expected: MatchStatus::InProgress,
                actual: fixture.status,
            });
        }
        let invalid = |reason: String| Err(ScorebookError::InvalidInnings { reason });
        if number == 0 || number > constants::INNINGS_PER_MATCH {
            return invalid(format!("innings number must be 1 or 2, got {number}"));
        }
        if batting == bowling || !fixture.features(batting) || !fixture.features(bowling) {
            return invalid(format!(
                "{batting} and {bowling} are not the two sides of {match_id}"
            ));
        }

        let existing: Vec<&Innings> = state
            .innings
            .values()
            .filter(|i| i.match_id == match_id)
            .collect();
        if existing.iter().any(|i| i.number == number) {
            return invalid(format!("{match_id} already has innings {number}"));
        }
        if existing.iter().any(|i| i.batting_team == batting) {
            return invalid(format!("{batting} has already batted in {match_id}"));
        }
        if number == 2 {
            match existing.iter().find(|i| i.number == 1) {
                None => return invalid(format!("{match_id} has no first innings")),
                Some(first) if first.status == InningsStatus::InProgress => {
                    return Err(ScorebookError::WrongInningsStatus {
                        expected: InningsStatus::Completed,
                        actual: first.status,
                    });
                }
                Some(_) => {}
            }
        }

        state.next.innings += 1;
        let innings = Innings::open(
            InningsId(state.next.innings),
            match_id,
            batting,
            bowling,
            number,
        );
        state.innings.insert(innings.id, innings.clone());
        Ok(innings)
    }

    pub fn innings(&self, id: InningsId) -> Result<Innings> {
        self.state
            .read()
            .innings
            .get(&id)
            .cloned()
            .ok_or(ScorebookError::InningsNotFound(id))
    }

    /// Innings of a match ordered by innings number.
    #[must_use]
    pub fn match_innings(&self, match_id: MatchId) -> Vec<Innings> {
        let mut innings: Vec<Innings> = self
            .state
            .read()
            .innings
            .values()
            .filter(|i| i.match_id == match_id)
            .cloned()
            .collect();
        innings.sort_by_key(|i| i.number);
        innings
    }

    pub fn set_totals(&self, id: InningsId, totals: InningsTotals) -> Result<Innings> {
        let mut state = self.state.write();
        let innings = state.innings_mut(id)?;
        innings.totals = totals;
        Ok(innings.clone())
    }

    /// Close an `IN_PROGRESS` innings as `COMPLETED` or `DECLARED`.
    ///
    /// # Errors
    /// `WrongInningsStatus` unless the innings is `IN_PROGRESS`.
    pub fn close_innings(&self, id: InningsId, to: InningsStatus) -> Result<Innings> {
        let mut state = self.state.write();
        let innings = state.innings_mut(id)?;
        if innings.status != InningsStatus::InProgress {
            return Err(ScorebookError::WrongInningsStatus {
                expected: InningsStatus::InProgress,
                actual: innings.status,
            });
        }
        innings.status = to;
        Ok(innings.clone())
    }
}
