use super::outcome::is_winning_combination;
use super::roll::play;
use super::GameRng;
use crate::mocks::ScriptedRng;
use slots_types::slots::{Session, SlotsError, Symbol::*, PLAY_COST, STARTING_CREDITS};
use slots_types::SessionId;

fn session_with_credits(credits: u64) -> Session {
    let mut session = Session::new(SessionId::random(), 0);
    session.credits = credits;
    session
}

#[test]
fn test_cherry_win_is_paid() {
    let mut session = Session::new(SessionId::random(), 0);
    let mut rng = ScriptedRng::new().with_indices(&[0, 0, 0]);

    let record = play(&mut session, &mut rng, 7).expect("roll should succeed");

    assert_eq!(record.symbols, [Cherry, Cherry, Cherry]);
    assert!(record.was_winning_roll);
    assert!(!record.was_rerolled);
    assert_eq!(record.credits_won, 10);
    assert_eq!(record.credits_before, STARTING_CREDITS);
    assert_eq!(record.credits_after, 19);
    assert_eq!(record.created_at, 7);
    assert_eq!(record.index, 0);
    assert_eq!(session.credits, 19);
    assert_eq!(session.roll_count, 1);
    // 9 + 10 = 19 is below every band, so no fairness draw.
    assert_eq!(rng.unit_draws(), 0);
}

#[test]
fn test_losing_roll() {
    let mut session = Session::new(SessionId::random(), 0);
    let mut rng = ScriptedRng::new().with_indices(&[0, 1, 2]);

    let record = play(&mut session, &mut rng, 0).unwrap();

    assert_eq!(record.symbols, [Cherry, Lemon, Orange]);
    assert!(!record.was_winning_roll);
    assert_eq!(record.credits_won, 0);
    assert_eq!(record.credits_after, STARTING_CREDITS - PLAY_COST);
}

#[test]
fn test_win_suppressed_near_threshold() {
    // 40 - 1 + 40 = 79 projected: high band, draw 0.5 suppresses.
    let mut session = session_with_credits(40);
    let mut rng = ScriptedRng::new()
        .with_indices(&[3, 3, 3, 1, 1, 1, 0])
        .with_units(&[0.5]);

    let record = play(&mut session, &mut rng, 0).unwrap();

    assert!(record.was_rerolled);
    assert!(!record.was_winning_roll);
    assert_eq!(record.credits_won, 0);
    assert_eq!(record.symbols, [Lemon, Lemon, Cherry]);
    assert_eq!(record.credits_after, 39);
    assert_eq!(session.credits, 39);
    assert_eq!(rng.unit_draws(), 1);
}

#[test]
fn test_fairness_uses_balance_after_deduction() {
    // 30 - 1 + 10 = 39: below the low band, no draw and no suppression.
    let mut session = session_with_credits(30);
    let mut rng = ScriptedRng::new().with_indices(&[0, 0, 0]);
    let record = play(&mut session, &mut rng, 0).unwrap();
    assert!(record.was_winning_roll);
    assert_eq!(rng.unit_draws(), 0);

    // 31 - 1 + 10 = 40: low band, a draw of 0.1 suppresses.
    let mut session = session_with_credits(31);
    let mut rng = ScriptedRng::new()
        .with_indices(&[0, 0, 0, 0, 1, 2])
        .with_units(&[0.1]);
    let record = play(&mut session, &mut rng, 0).unwrap();
    assert!(record.was_rerolled);
    assert_eq!(record.credits_after, 30);
}

#[test]
fn test_insufficient_credits() {
    let mut session = session_with_credits(0);
    let before = session.clone();
    let mut rng = ScriptedRng::new();

    assert_eq!(
        play(&mut session, &mut rng, 0),
        Err(SlotsError::InsufficientCredits)
    );
    assert_eq!(session, before);
    assert_eq!(rng.index_draws(), 0);
}

#[test]
fn test_closed_session_cannot_play() {
    let mut session = Session::new(SessionId::random(), 0);
    session.cash_out(5);
    let before = session.clone();
    let mut rng = ScriptedRng::new();

    assert_eq!(
        play(&mut session, &mut rng, 6),
        Err(SlotsError::SessionNotFoundOrInactive)
    );
    assert_eq!(session, before);
}

#[test]
fn test_credit_conservation() {
    let seed = [42u8; 32];
    let mut session = session_with_credits(50);
    let mut rolls = 0;
    while session.can_play() && rolls < 5_000 {
        let mut rng = GameRng::new(&seed, &session.id, session.roll_count);
        let record = play(&mut session, &mut rng, rolls).unwrap();
        assert_eq!(
            record.credits_after,
            record.credits_before - PLAY_COST + record.credits_won
        );
        assert_eq!(record.was_winning_roll, record.credits_won > 0);
        assert_eq!(record.was_winning_roll, is_winning_combination(&record.symbols));
        if record.was_rerolled {
            assert!(!record.was_winning_roll);
        }
        assert_eq!(record.index, rolls);
        rolls += 1;
    }
    assert_eq!(session.roll_count, rolls);
}
