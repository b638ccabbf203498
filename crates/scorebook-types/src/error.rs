//! Error types for the Scorebook engine.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors (malformed delivery, innings or match input)
//! - 2xx: Not-found errors
//! - 3xx: Undo errors
//! - 4xx: State errors (operation not allowed in the current status)
//! - 9xx: General / internal errors
//!
//! No error is retried internally. Every failing operation leaves the ledger
//! and its derived aggregates exactly as they were before the call.

use thiserror::Error;

use crate::{InningsId, InningsStatus, LeagueId, MatchId, MatchStatus, PlayerId, TeamId};

/// Coarse classification of a [`ScorebookError`], for callers deciding remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, rejected before any mutation.
    Validation,
    /// Unknown innings, match, player, team or league id.
    NotFound,
    /// Undo requested with nothing to undo.
    EmptyUndo,
    /// Operation attempted in the wrong lifecycle status.
    State,
    /// Storage, serialization or configuration failure.
    Internal,
}

/// Central error enum for all Scorebook operations.
#[derive(Debug, Error)]
pub enum ScorebookError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The delivery failed validation (runs out of range, missing wicket
    /// kind, inconsistent extras).
    #[error("SB_ERR_100: Invalid delivery: {reason}")]
    InvalidDelivery { reason: String },

    /// An innings could not be started with the given parameters.
    #[error("SB_ERR_101: Invalid innings: {reason}")]
    InvalidInnings { reason: String },

    /// A match could not be scheduled with the given parameters.
    #[error("SB_ERR_102: Invalid match: {reason}")]
    InvalidMatch { reason: String },

    // =================================================================
    // Not Found Errors (2xx)
    // =================================================================
    #[error("SB_ERR_200: Innings not found: {0}")]
    InningsNotFound(InningsId),

    #[error("SB_ERR_201: Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("SB_ERR_202: Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("SB_ERR_203: Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("SB_ERR_204: League not found: {0}")]
    LeagueNotFound(LeagueId),

    // =================================================================
    // Undo Errors (3xx)
    // =================================================================
    /// Undo was requested for an innings with no recorded deliveries.
    #[error("SB_ERR_300: Nothing to undo for {0}")]
    EmptyLedger(InningsId),

    // =================================================================
    // State Errors (4xx)
    // =================================================================
    /// The innings is not in the status the operation requires.
    #[error("SB_ERR_400: Wrong innings status: expected {expected}, got {actual}")]
    WrongInningsStatus {
        expected: InningsStatus,
        actual: InningsStatus,
    },

    /// The match is not in the status the operation requires.
    #[error("SB_ERR_401: Wrong match status: expected {expected}, got {actual}")]
    WrongMatchStatus {
        expected: MatchStatus,
        actual: MatchStatus,
    },

    /// The innings can take no further deliveries (all out or overs expired).
    #[error("SB_ERR_402: Innings closed: {reason}")]
    InningsClosed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, out-of-range values).
    #[error("SB_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// The ledger store or snapshot sink failed.
    #[error("SB_ERR_903: Storage error: {0}")]
    Storage(String),
}

impl ScorebookError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDelivery { .. } | Self::InvalidInnings { .. } | Self::InvalidMatch { .. } => {
                ErrorKind::Validation
            }
            Self::InningsNotFound(_)
            | Self::MatchNotFound(_)
            | Self::PlayerNotFound(_)
            | Self::TeamNotFound(_)
            | Self::LeagueNotFound(_) => ErrorKind::NotFound,
            Self::EmptyLedger(_) => ErrorKind::EmptyUndo,
            Self::WrongInningsStatus { .. }
            | Self::WrongMatchStatus { .. }
            | Self::InningsClosed { .. } => ErrorKind::State,
            Self::Internal(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for an [`ScorebookError::InvalidDelivery`].
    pub fn invalid_delivery(reason: impl Into<String>) -> Self {
        Self::InvalidDelivery {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ScorebookError>;

impl From<serde_json::Error> for ScorebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
