//! JSON shapes exchanged with the request-handling layer.

use serde::{Deserialize, Serialize};

use crate::slots::{glyphs, Reels, RollRecord, Session, SessionId, SlotsError, REELS};

/// Body of play and cash-out requests.
///
/// The identifier stays a string here so a malformed value can be reported
/// the same way as an unknown one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub credits: u64,
    pub account_credits: u64,
}

impl From<&Session> for SessionCreated {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            credits: session.credits,
            account_credits: session.account_credits,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub symbols: Reels,
    pub symbols_display: [String; REELS],
    pub is_winning: bool,
    pub credits_won: u64,
    pub total_credits: u64,
    pub was_rerolled: bool,
}

impl From<&RollRecord> for RollOutcome {
    fn from(roll: &RollRecord) -> Self {
        Self {
            symbols: roll.symbols,
            symbols_display: glyphs(&roll.symbols).map(str::to_string),
            is_winning: roll.was_winning_roll,
            credits_won: roll.credits_won,
            total_credits: roll.credits_after,
            was_rerolled: roll.was_rerolled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutReceipt {
    pub success: bool,
    pub total_account_credits: u64,
    /// Credits moved out of play by this cash-out.
    pub cashed_out: u64,
    pub message: String,
}

impl CashOutReceipt {
    pub fn new(total_account_credits: u64, cashed_out: u64) -> Self {
        Self {
            success: true,
            total_account_credits,
            cashed_out,
            message: format!("Successfully cashed out {total_account_credits} credits!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: SessionId,
    pub credits: u64,
    pub account_credits: u64,
    pub is_active: bool,
    pub can_play: bool,
}

impl From<&Session> for SessionStatus {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            credits: session.credits,
            account_credits: session.account_credits,
            is_active: session.is_active,
            can_play: session.can_play(),
        }
    }
}

/// Roll record as exposed by the audit lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollView {
    pub index: u64,
    pub symbols: Reels,
    pub credits_before: u64,
    pub credits_after: u64,
    pub credits_won: u64,
    pub was_winning_roll: bool,
    pub was_rerolled: bool,
    pub created_at: u64,
}

impl From<&RollRecord> for RollView {
    fn from(roll: &RollRecord) -> Self {
        Self {
            index: roll.index,
            symbols: roll.symbols,
            credits_before: roll.credits_before,
            credits_after: roll.credits_after,
            credits_won: roll.credits_won,
            was_winning_roll: roll.was_winning_roll,
            was_rerolled: roll.was_rerolled,
            created_at: roll.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u8,
}

impl From<&SlotsError> for ErrorBody {
    fn from(err: &SlotsError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}
