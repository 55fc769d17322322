use thiserror::Error;

use super::{
    ERROR_INSUFFICIENT_CREDITS, ERROR_INTERNAL, ERROR_SESSION_NOT_FOUND,
    ERROR_SESSION_NOT_FOUND_OR_INACTIVE,
};

/// Failure of a slots operation.
///
/// The first three variants are user-facing domain errors. `Internal` covers
/// faults outside the game rules (corrupt store contents, journal I/O) and is
/// never produced by the rules themselves.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SlotsError {
    #[error("session not found")]
    SessionNotFound,
    /// Play and cash-out report unknown and closed sessions identically so a
    /// caller cannot probe whether a closed session exists.
    #[error("session not found or inactive")]
    SessionNotFoundOrInactive,
    #[error("not enough credits")]
    InsufficientCredits,
    #[error("internal error: {0}")]
    Internal(String),
}

impl SlotsError {
    pub fn code(&self) -> u8 {
        match self {
            Self::SessionNotFound => ERROR_SESSION_NOT_FOUND,
            Self::SessionNotFoundOrInactive => ERROR_SESSION_NOT_FOUND_OR_INACTIVE,
            Self::InsufficientCredits => ERROR_INSUFFICIENT_CREDITS,
            Self::Internal(_) => ERROR_INTERNAL,
        }
    }

    /// Returns true for the rule-level errors a player can trigger.
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
