//! A single roll against a session's ledger.

use slots_types::slots::{RollRecord, Session, SlotsError};
use tracing::debug;

use super::fairness::should_suppress_win;
use super::outcome::reward_for;
use super::reels::{generate_losing_roll, generate_roll};
use super::RandomSource;

/// Play one roll, mutating `session` and returning the record to persist.
///
/// Fails without touching the session when it is closed or cannot cover the
/// play cost. On success exactly one credit is deducted and at most one win
/// is paid. The fairness check sees the balance after the deduction and
/// before the win.
pub fn play<R: RandomSource>(
    session: &mut Session,
    rng: &mut R,
    now: u64,
) -> Result<RollRecord, SlotsError> {
    if !session.is_active {
        return Err(SlotsError::SessionNotFoundOrInactive);
    }
    if !session.can_play() {
        return Err(SlotsError::InsufficientCredits);
    }

    let credits_before = session.credits;
    session.deduct_credit()?;

    let mut symbols = generate_roll(rng);
    let mut credits_won = reward_for(&symbols).unwrap_or(0);
    let mut winning = credits_won > 0;
    let mut was_rerolled = false;

    if winning && should_suppress_win(session.credits, credits_won, rng) {
        debug!(
            session = %session.id,
            credits = session.credits,
            suppressed = credits_won,
            "win suppressed"
        );
        symbols = generate_losing_roll(rng);
        winning = false;
        credits_won = 0;
        was_rerolled = true;
    }

    if winning {
        session.add_credits(credits_won);
    }

    let index = session.roll_count;
    session.roll_count += 1;

    Ok(RollRecord {
        session_id: session.id,
        index,
        symbols,
        credits_before,
        credits_after: session.credits,
        credits_won,
        was_winning_roll: winning,
        was_rerolled,
        created_at: now,
    })
}
