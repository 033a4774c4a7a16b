use thiserror::Error;
use tracing::{error, warn};

use crate::models::{Location, PlayerId};

/// Tracing target for caller/state divergence reports.
///
/// Kept separate from user-facing notices so that divergence can be filtered
/// and alerted on independently (`RUST_LOG=roster::divergence=error`).
pub const DIVERGENCE_TARGET: &str = "roster::divergence";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Player {player} not found at {location}")]
    SourceNotFound { player: PlayerId, location: Location },

    #[error("Invalid target location: {location}")]
    TargetInvalid { location: Location },

    #[error("Player {player} already has an active rotation link")]
    AlreadyPaired { player: PlayerId },

    #[error("Rotation link mismatch for player {active}: expected {expected:?}, found {found:?}")]
    LinkMismatch { active: PlayerId, expected: Option<PlayerId>, found: Option<PlayerId> },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Selection id is missing")]
    InvalidSelectionId,

    #[error("Could not allocate a unique id after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("Unknown player {player}")]
    UnknownPlayer { player: PlayerId },

    #[error("History entry no longer applies: {0}")]
    HistoryDiverged(String),

    #[error("Invalid skill {attribute}: {value}. Must be between 1 and 5")]
    InvalidSkill { attribute: &'static str, value: u8 },

    #[error("Invalid roster snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Balancing failed: {0}")]
    Balancing(#[from] BalancingError),
}

impl RosterError {
    /// Stable machine-readable code used by the JSON API.
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            RosterError::TargetInvalid { .. } => "TARGET_INVALID",
            RosterError::AlreadyPaired { .. } => "ALREADY_PAIRED",
            RosterError::LinkMismatch { .. } => "LINK_MISMATCH",
            RosterError::NothingToUndo => "NOTHING_TO_UNDO",
            RosterError::InvalidSelectionId => "INVALID_SELECTION_ID",
            RosterError::AllocationExhausted { .. } => "ALLOCATION_EXHAUSTED",
            RosterError::UnknownPlayer { .. } => "UNKNOWN_PLAYER",
            RosterError::HistoryDiverged(_) => "HISTORY_DIVERGED",
            RosterError::InvalidSkill { .. } => "INVALID_SKILL",
            RosterError::InvalidSnapshot(_) => "INVALID_SNAPSHOT",
            RosterError::Balancing(_) => "BALANCING_FAILED",
        }
    }

    /// Everything except a broken seed can be retried by the user.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RosterError::InvalidSnapshot(_) | RosterError::Balancing(_))
    }

    /// The caller's view of the roster diverged from the store.
    pub fn is_logic_bug(&self) -> bool {
        matches!(self, RosterError::LinkMismatch { .. } | RosterError::HistoryDiverged(_))
    }

    /// Logs a rejected operation and hands the error back to the caller.
    ///
    /// User-facing notices go out at `warn`; divergence goes to
    /// [`DIVERGENCE_TARGET`] at `error`.
    pub(crate) fn reported(self, operation: &'static str) -> Self {
        if self.is_logic_bug() {
            error!(target: DIVERGENCE_TARGET, operation, code = self.code(), "{}", self);
        } else {
            warn!(operation, code = self.code(), "{}", self);
        }
        self
    }
}

/// Failure reported by the external balancing service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalancingError {
    #[error("Balancing service unavailable: {0}")]
    Unavailable(String),

    #[error("Balancing request rejected: {0}")]
    Rejected(String),

    #[error("Malformed balancing response: {0}")]
    Malformed(String),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, RosterError>;
