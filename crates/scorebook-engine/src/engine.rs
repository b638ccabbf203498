//! The scoring engine: serialised ledger mutations, match lifecycle and the
//! materialised scorecard.
//!
//! ## Write path
//!
//! ```text
//! record_delivery(innings) ── innings shard locked ──────────────────────┐
//!   registry lookups → DeliveryLedger.record() → aggregate_innings()     │
//!   → registry totals → sink.save_innings_totals()                       │
//!   → match shard locked → build_scorecard() → sink.save_scorecard()     │
//! ───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shards are always taken innings first, then match, so two writers can
//! never wait on each other in opposite order.
//!
//! Every error path leaves the ledger and the registry totals as they were.
//! Sink failures do not count as errors: snapshots are republished in full
//! on the next mutation.

use std::sync::Arc;

use chrono::NaiveDate;
use scorebook_ledger::{DeliveryLedger, LedgerStore};
use scorebook_stats::{
    MatchResult, aggregate_innings, build_scorecard, compute_ledger_root, decide_result,
    man_of_the_match,
};
use scorebook_types::{
    Delivery, DeliveryInput, EngineConfig, Innings, InningsId, InningsStatus, InningsTotals,
    LeagueId, Match, MatchId, MatchStatus, Player, PlayerId, Result, Scorecard, Team, TeamId,
};
use tracing::{debug, info, warn};

use crate::registry::Registry;
use crate::shard::ShardLocks;
use crate::sink::SnapshotSink;

/// Serialised scoring engine over a ledger store and a snapshot sink.
///
/// All methods take `&self`; the engine is `Send + Sync` whenever its
/// store and sink are.
pub struct ScoringEngine<S, K> {
    pub(crate) config: EngineConfig,
    pub(crate) ledger: DeliveryLedger<S>,
    pub(crate) sink: Arc<K>,
    pub(crate) registry: Registry,
    innings_shards: ShardLocks<InningsId>,
    match_shards: ShardLocks<MatchId>,
}

impl<S: LedgerStore, K: SnapshotSink> ScoringEngine<S, K> {
    /// # Errors
    /// `Configuration` if the config fails validation.
    pub fn new(config: EngineConfig, store: Arc<S>, sink: Arc<K>) -> Result<Self> {
        config.validate()?;
        info!(
            over_limit = config.match_over_limit,
            max_wickets = config.max_wickets,
            tie_break = ?config.tie_break,
            "Scoring engine started"
        );
        Ok(Self {
            ledger: DeliveryLedger::new(store, &config),
            config,
            sink,
            registry: Registry::new(),
            innings_shards: ShardLocks::new(),
            match_shards: ShardLocks::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn sink(&self) -> &Arc<K> {
        &self.sink
    }

    // =================================================================
    // Fixtures and lifecycle
    // =================================================================

    pub fn register_team(&self, name: &str, league: LeagueId) -> Team {
        let team = self.registry.add_team(name, league);
        info!(team = %team.id, league = %league, name, "Team registered");
        team
    }

    pub fn register_player(&self, name: &str, team: TeamId) -> Result<Player> {
        let player = self.registry.add_player(name, team)?;
        info!(player = %player.id, team = %team, name, "Player registered");
        Ok(player)
    }

    pub fn schedule_match(
        &self,
        league: LeagueId,
        team1: TeamId,
        team2: TeamId,
        venue: &str,
        date: NaiveDate,
    ) -> Result<Match> {
        let fixture = self.registry.add_match(league, team1, team2, venue, date)?;
        info!(match_id = %fixture.id, %team1, %team2, venue, "Match scheduled");
        Ok(fixture)
    }

    /// `SCHEDULED → IN_PROGRESS`; publishes an empty scorecard.
    pub fn start_match(&self, match_id: MatchId) -> Result<Match> {
        let fixture = self.registry.transition_match(
            match_id,
            MatchStatus::Scheduled,
            MatchStatus::InProgress,
        )?;
        info!(match_id = %match_id, "Match started");
        self.publish_scorecard(match_id);
        Ok(fixture)
    }

    /// Open innings `number` with `batting` at the crease.
    pub fn start_innings(
        &self,
        match_id: MatchId,
        batting: TeamId,
        bowling: TeamId,
        number: u8,
    ) -> Result<Innings> {
        let innings = self
            .registry
            .open_innings(match_id, batting, bowling, number)?;
        info!(innings = %innings.id, match_id = %match_id, %batting, number, "Innings started");
        self.publish_totals(innings.id, &innings.totals);
        self.publish_scorecard(match_id);
        Ok(innings)
    }

    /// `IN_PROGRESS → COMPLETED`.
    pub fn complete_innings(&self, innings_id: InningsId) -> Result<Innings> {
        self.close_innings(innings_id, InningsStatus::Completed)
    }

    /// `IN_PROGRESS → DECLARED`.
    pub fn declare_innings(&self, innings_id: InningsId) -> Result<Innings> {
        self.close_innings(innings_id, InningsStatus::Declared)
    }

    fn close_innings(&self, innings_id: InningsId, to: InningsStatus) -> Result<Innings> {
        let innings = self.innings_shards.with(innings_id, || {
            self.registry.close_innings(innings_id, to)
        })?;
        self.innings_shards.remove(innings_id);
        info!(innings = %innings_id, status = %to, runs = innings.totals.runs, "Innings closed");
        self.publish_scorecard(innings.match_id);
        Ok(innings)
    }

    /// `IN_PROGRESS → COMPLETED`: closes open innings, decides winner and
    /// margin, and publishes the final scorecard.
    pub fn complete_match(&self, match_id: MatchId) -> Result<Scorecard> {
        self.registry.transition_match(
            match_id,
            MatchStatus::InProgress,
            MatchStatus::Completed,
        )?;
        self.close_open_innings(match_id);

        let innings = self.registry.match_innings(match_id);
        let result = decide_result(&innings, self.config.max_wickets);
        self.registry.set_result(match_id, result);

        let card = self
            .match_shards
            .with(match_id, || -> Result<Scorecard> {
                let card = self.build_scorecard(match_id)?;
                self.save_scorecard(&card);
                Ok(card)
            })?;
        info!(
            match_id = %match_id,
            winner = ?card.winning_team,
            margin = ?card.win_margin,
            man_of_the_match = ?card.man_of_the_match,
            "Match completed"
        );
        Ok(card)
    }

    /// Any unfinished match → `ABANDONED`.
    pub fn abandon_match(&self, match_id: MatchId) -> Result<Match> {
        self.end_match(match_id, MatchStatus::Abandoned)
    }

    /// Any unfinished match → `CANCELLED`.
    pub fn cancel_match(&self, match_id: MatchId) -> Result<Match> {
        self.end_match(match_id, MatchStatus::Cancelled)
    }

    fn end_match(&self, match_id: MatchId, to: MatchStatus) -> Result<Match> {
        let fixture = self.registry.end_match(match_id, to)?;
        self.close_open_innings(match_id);
        info!(match_id = %match_id, status = %to, "Match ended without result");
        self.publish_scorecard(match_id);
        Ok(fixture)
    }

    fn close_open_innings(&self, match_id: MatchId) {
        for innings in self.registry.match_innings(match_id) {
            if innings.status != InningsStatus::InProgress {
                continue;
            }
            // May already have been closed by a concurrent caller.
            let closed = self.innings_shards.with(innings.id, || {
                self.registry
                    .close_innings(innings.id, InningsStatus::Completed)
            });
            if closed.is_ok() {
                self.innings_shards.remove(innings.id);
                debug!(innings = %innings.id, "Open innings closed with its match");
            }
        }
    }

    // =================================================================
    // Ledger mutations
    // =================================================================

    /// Record a delivery and recompute everything derived from it.
    ///
    /// # Errors
    /// - `InningsNotFound` / `PlayerNotFound` for unknown ids
    /// - any ledger error (status, validation, innings closed)
    pub fn record_delivery(
        &self,
        innings_id: InningsId,
        input: DeliveryInput,
    ) -> Result<Delivery> {
        self.innings_shards.with(innings_id, || {
            let innings = self.registry.innings(innings_id)?;
            self.registry.player(input.batter)?;
            self.registry.player(input.bowler)?;

            let delivery = self.ledger.record(&innings, input)?;
            if let Err(err) = self.refresh(&innings) {
                warn!(innings = %innings_id, error = %err, "Recompute failed, reverting delivery");
                self.ledger.store().remove_last(innings_id)?;
                return Err(err);
            }

            info!(
                innings = %innings_id,
                position = %delivery.position(),
                batter = %delivery.batter,
                bowler = %delivery.bowler,
                runs = delivery.total_runs(),
                wicket = delivery.is_wicket,
                "Delivery recorded"
            );
            Ok(delivery)
        })
    }

    /// Remove the most recent delivery of an innings and recompute.
    ///
    /// # Errors
    /// - `InningsNotFound`
    /// - `WrongInningsStatus` unless the innings is `IN_PROGRESS`
    /// - `EmptyLedger` if nothing has been recorded
    pub fn undo_last(&self, innings_id: InningsId) -> Result<Delivery> {
        self.innings_shards.with(innings_id, || {
            let innings = self.registry.innings(innings_id)?;
            let removed = self.ledger.undo_last(&innings)?;
            if let Err(err) = self.refresh(&innings) {
                warn!(innings = %innings_id, error = %err, "Recompute failed, restoring delivery");
                self.ledger.store().append(removed)?;
                return Err(err);
            }
            info!(
                innings = %innings_id,
                position = %removed.position(),
                "Delivery undone"
            );
            Ok(removed)
        })
    }

    /// Fold the ledger into fresh totals and republish.
    pub fn recompute(&self, innings_id: InningsId) -> Result<InningsTotals> {
        let innings = self.registry.innings(innings_id)?;
        if innings.status.is_closed() {
            // Closed ledgers are frozen.
            return self.refresh(&innings);
        }
        self.innings_shards.with(innings_id, || {
            let innings = self.registry.innings(innings_id)?;
            self.refresh(&innings)
        })
    }

    /// Caller holds the innings shard, unless the innings is closed.
    fn refresh(&self, innings: &Innings) -> Result<InningsTotals> {
        let deliveries = self.ledger.deliveries(innings.id)?;
        let totals = aggregate_innings(&deliveries);
        self.registry.set_totals(innings.id, totals.clone())?;
        debug!(
            innings = %innings.id,
            runs = totals.runs,
            wickets = totals.wickets,
            overs = %totals.overs_notation(),
            ledger_root = %hex::encode(compute_ledger_root(&deliveries)),
            "Innings recomputed"
        );
        self.publish_totals(innings.id, &totals);
        self.publish_scorecard(innings.match_id);
        Ok(totals)
    }

    // =================================================================
    // Snapshots
    // =================================================================

    fn publish_totals(&self, innings_id: InningsId, totals: &InningsTotals) {
        if let Err(err) = self.sink.save_innings_totals(innings_id, totals) {
            warn!(innings = %innings_id, error = %err, "Innings totals snapshot not saved");
        }
    }

    fn publish_scorecard(&self, match_id: MatchId) {
        self.match_shards.with(match_id, || {
            match self.build_scorecard(match_id) {
                Ok(card) => self.save_scorecard(&card),
                Err(err) => {
                    warn!(match_id = %match_id, error = %err, "Scorecard not rebuilt");
                }
            }
        });
    }

    fn save_scorecard(&self, card: &Scorecard) {
        match self.sink.save_scorecard(card.match_id, card) {
            Ok(()) => debug!(match_id = %card.match_id, digest = %card.digest, "Scorecard saved"),
            Err(err) => {
                warn!(match_id = %card.match_id, error = %err, "Scorecard snapshot not saved");
            }
        }
    }

    fn build_scorecard(&self, match_id: MatchId) -> Result<Scorecard> {
        let fixture = self.registry.fixture(match_id)?;
        let innings = self.registry.match_innings(match_id);
        let deliveries = self.match_deliveries(&innings)?;
        let mom = man_of_the_match(&deliveries, &self.config);
        let result = if fixture.status == MatchStatus::Completed {
            self.registry.result(match_id).unwrap_or_default()
        } else {
            MatchResult::default()
        };
        Ok(build_scorecard(&fixture, &innings, mom, result))
    }

    pub(crate) fn match_deliveries(&self, innings: &[Innings]) -> Result<Vec<Delivery>> {
        let mut all = Vec::new();
        for i in innings {
            all.extend(self.ledger.deliveries(i.id)?);
        }
        Ok(all)
    }

    // =================================================================
    // Match-level reads
    // =================================================================

    pub fn innings(&self, innings_id: InningsId) -> Result<Innings> {
        self.registry.innings(innings_id)
    }

    pub fn fixture(&self, match_id: MatchId) -> Result<Match> {
        self.registry.fixture(match_id)
    }

    /// Every delivery of an innings in recording order.
    pub fn deliveries(&self, innings_id: InningsId) -> Result<Vec<Delivery>> {
        self.registry.innings(innings_id)?;
        self.ledger.deliveries(innings_id)
    }

    /// Hex content hash of an innings ledger. Equal ledgers have equal roots
    /// regardless of delivery ids and timestamps.
    pub fn ledger_root(&self, innings_id: InningsId) -> Result<String> {
        let deliveries = self.deliveries(innings_id)?;
        Ok(hex::encode(compute_ledger_root(&deliveries)))
    }

    /// The scorecard as it stands, rebuilt from the ledger.
    pub fn scorecard(&self, match_id: MatchId) -> Result<Scorecard> {
        self.build_scorecard(match_id)
    }

    /// Highest match points across both innings.
    pub fn man_of_the_match(&self, match_id: MatchId) -> Result<Option<PlayerId>> {
        self.registry.fixture(match_id)?;
        let innings = self.registry.match_innings(match_id);
        let deliveries = self.match_deliveries(&innings)?;
        Ok(man_of_the_match(&deliveries, &self.config))
    }
}
