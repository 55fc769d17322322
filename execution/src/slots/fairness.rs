//! Win suppression policy.
//!
//! The house re-rolls a pending win into a loss with a probability that grows
//! with the balance the win would produce:
//!
//! | projected balance | suppression chance |
//! |---|---|
//! | below 40 | 0 (no draw consumed) |
//! | 40 to 60 | 0.3 |
//! | above 60 | 0.6 |

use slots_types::slots::{
    SUPPRESSION_CHANCE_HIGH, SUPPRESSION_CHANCE_LOW, SUPPRESSION_HIGH_THRESHOLD,
    SUPPRESSION_LOW_THRESHOLD,
};

use super::RandomSource;

/// Suppression probability for a projected balance, or `None` when no
/// suppression applies.
pub fn suppression_chance(future_credits: u64) -> Option<f64> {
    if future_credits < SUPPRESSION_LOW_THRESHOLD {
        None
    } else if future_credits <= SUPPRESSION_HIGH_THRESHOLD {
        Some(SUPPRESSION_CHANCE_LOW)
    } else {
        Some(SUPPRESSION_CHANCE_HIGH)
    }
}

/// Decide whether to suppress a win of `potential_win_credits` for a player
/// currently holding `current_credits`.
///
/// Consumes exactly one unit draw when a chance applies and none otherwise.
pub fn should_suppress_win<R: RandomSource>(
    current_credits: u64,
    potential_win_credits: u64,
    rng: &mut R,
) -> bool {
    let future_credits = current_credits.saturating_add(potential_win_credits);
    match suppression_chance(future_credits) {
        Some(chance) => rng.next_unit() < chance,
        None => false,
    }
}
