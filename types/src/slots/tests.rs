use super::*;
use crate::api::{RollOutcome, SessionStatus};
use crate::execution::{Key, Value};
use commonware_codec::{DecodeExt, Encode, ReadExt};

fn closed_session() -> Session {
    let mut session = Session::new(SessionId::random(), 1_000);
    session.credits = 25;
    session.cash_out(2_000);
    session
}

#[test]
fn test_catalog_matches_published_table() {
    let table: Vec<(&str, &str, u64)> = Symbol::ALL
        .iter()
        .map(|s| (s.name(), s.glyph(), s.reward()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("cherry", "C", 10),
            ("lemon", "L", 20),
            ("orange", "O", 30),
            ("watermelon", "W", 40),
        ]
    );
}

#[test]
fn test_symbol_parse_and_display() {
    for symbol in Symbol::ALL {
        assert_eq!(symbol.name().parse::<Symbol>(), Ok(symbol));
        assert_eq!(symbol.to_string(), symbol.name());
    }
    assert!("banana".parse::<Symbol>().is_err());
    assert_eq!(Symbol::from_index(4), None);
}

#[test]
fn test_symbol_rejects_unknown_tag() {
    let encoded = 7u8.encode();
    assert!(Symbol::read(&mut &encoded[..]).is_err());
}

#[test]
fn test_new_session_defaults() {
    let session = Session::new(SessionId::random(), 42);
    assert_eq!(session.credits, 10);
    assert_eq!(session.account_credits, 0);
    assert!(session.is_active);
    assert!(session.can_play());
    assert_eq!(session.created_at, 42);
    assert_eq!(session.closed_at, None);
    assert_eq!(session.roll_count, 0);
}

#[test]
fn test_deduct_credit() {
    let mut session = Session::new(SessionId::random(), 0);
    assert_eq!(session.deduct_credit(), Ok(()));
    assert_eq!(session.credits, 9);
}

#[test]
fn test_deduct_credit_insufficient_funds() {
    let mut session = Session::new(SessionId::random(), 0);
    session.credits = 0;
    assert!(!session.can_play());
    assert_eq!(session.deduct_credit(), Err(SlotsError::InsufficientCredits));
    assert_eq!(session.credits, 0);
}

#[test]
fn test_add_credits() {
    let mut session = Session::new(SessionId::random(), 0);
    session.add_credits(20);
    assert_eq!(session.credits, 30);
}

#[test]
fn test_cash_out_closes_session() {
    let session = closed_session();
    assert_eq!(session.credits, 0);
    assert_eq!(session.account_credits, 25);
    assert!(!session.is_active);
    assert!(!session.can_play());
    assert_eq!(session.closed_at, Some(2_000));
}

#[test]
fn test_session_roundtrip() {
    for session in [Session::new(SessionId::random(), 7), closed_session()] {
        let encoded = session.encode();
        let decoded = Session::decode(&mut encoded.as_ref()).unwrap();
        assert_eq!(session, decoded);
    }
}

#[test]
fn test_closed_session_with_credits_is_rejected() {
    let mut session = closed_session();
    session.credits = 3;
    let encoded = session.encode();
    assert!(Session::decode(&mut encoded.as_ref()).is_err());
}

#[test]
fn test_storage_entries_roundtrip() {
    let id = SessionId::random();
    let roll = RollRecord {
        session_id: id,
        index: 3,
        symbols: [Symbol::Orange, Symbol::Orange, Symbol::Lemon],
        credits_before: 12,
        credits_after: 11,
        credits_won: 0,
        was_winning_roll: false,
        was_rerolled: true,
        created_at: 99,
    };

    let key = Key::Roll(id, 3);
    assert_eq!(Key::decode(&mut key.encode().as_ref()).unwrap(), key);

    let value = Value::Roll(roll);
    assert_eq!(Value::decode(&mut value.encode().as_ref()).unwrap(), value);

    let value = Value::Session(Session::new(id, 1));
    assert_eq!(Value::decode(&mut value.encode().as_ref()).unwrap(), value);
}

#[test]
fn test_session_id_text_form() {
    let id = SessionId::random();
    assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
    assert!("not-a-uuid".parse::<SessionId>().is_err());
}

#[test]
fn test_roll_outcome_json_shape() {
    let roll = RollRecord {
        session_id: SessionId::random(),
        index: 0,
        symbols: [Symbol::Cherry, Symbol::Cherry, Symbol::Cherry],
        credits_before: 10,
        credits_after: 19,
        credits_won: 10,
        was_winning_roll: true,
        was_rerolled: false,
        created_at: 0,
    };
    let json = serde_json::to_value(RollOutcome::from(&roll)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "symbols": ["cherry", "cherry", "cherry"],
            "symbols_display": ["C", "C", "C"],
            "is_winning": true,
            "credits_won": 10,
            "total_credits": 19,
            "was_rerolled": false,
        })
    );
}

#[test]
fn test_status_reports_closed_session() {
    let session = closed_session();
    let status = SessionStatus::from(&session);
    assert_eq!(status.credits, 0);
    assert_eq!(status.account_credits, 25);
    assert!(!status.is_active);
    assert!(!status.can_play);
}

#[test]
fn test_error_codes_are_distinct() {
    let errors = [
        SlotsError::SessionNotFound,
        SlotsError::SessionNotFoundOrInactive,
        SlotsError::InsufficientCredits,
        SlotsError::Internal("boom".to_string()),
    ];
    let mut codes: Vec<u8> = errors.iter().map(SlotsError::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
    assert!(errors[..3].iter().all(SlotsError::is_domain));
    assert!(!errors[3].is_domain());
}
