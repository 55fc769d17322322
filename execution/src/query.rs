//! Read-only lookups. Unlike play and cash out, these accept closed sessions.

use slots_types::{
    api::SessionStatus,
    slots::{RollRecord, MAX_ROLLS_PER_LOOKUP},
    SessionId, SlotsError,
};

use crate::state::{load_roll, load_session, State};

pub async fn session_status<S: State>(
    state: &S,
    session_id: &SessionId,
) -> Result<SessionStatus, SlotsError> {
    match load_session(state, session_id).await? {
        Some(session) => Ok(SessionStatus::from(&session)),
        None => Err(SlotsError::SessionNotFound),
    }
}

/// Roll history of a session in play order, capped at the most recent
/// [MAX_ROLLS_PER_LOOKUP] rolls.
pub async fn list_rolls<S: State>(
    state: &S,
    session_id: &SessionId,
) -> Result<Vec<RollRecord>, SlotsError> {
    let session = load_session(state, session_id)
        .await?
        .ok_or(SlotsError::SessionNotFound)?;

    let start = session.roll_count.saturating_sub(MAX_ROLLS_PER_LOOKUP);
    let mut rolls = Vec::with_capacity((session.roll_count - start) as usize);
    for index in start..session.roll_count {
        rolls.push(load_roll(state, session_id, index).await?);
    }
    Ok(rolls)
}
