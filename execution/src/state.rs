use slots_types::{
    execution::{Key, Value},
    slots::{RollRecord, Session},
    SessionId, SlotsError,
};
use std::{collections::HashMap, future::Future};

pub trait State {
    fn get(&self, key: &Key) -> impl Future<Output = Option<Value>>;
    fn insert(&mut self, key: Key, value: Value) -> impl Future<Output = ()>;

    fn apply(&mut self, changes: Vec<(Key, Value)>) -> impl Future<Output = ()> {
        async {
            for (key, value) in changes {
                self.insert(key, value).await;
            }
        }
    }
}

#[derive(Default)]
pub struct Memory {
    state: HashMap<Key, Value>,
}

impl Memory {
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl State for Memory {
    async fn get(&self, key: &Key) -> Option<Value> {
        self.state.get(key).cloned()
    }

    async fn insert(&mut self, key: Key, value: Value) {
        self.state.insert(key, value);
    }
}

pub(crate) async fn load_session<S: State>(
    state: &S,
    session_id: &SessionId,
) -> Result<Option<Session>, SlotsError> {
    match state.get(&Key::Session(*session_id)).await {
        Some(Value::Session(session)) => Ok(Some(session)),
        Some(_) => Err(SlotsError::Internal(format!(
            "unexpected value stored for session {session_id}"
        ))),
        None => Ok(None),
    }
}

pub(crate) async fn load_roll<S: State>(
    state: &S,
    session_id: &SessionId,
    index: u64,
) -> Result<RollRecord, SlotsError> {
    match state.get(&Key::Roll(*session_id, index)).await {
        Some(Value::Roll(record)) => Ok(record),
        Some(_) => Err(SlotsError::Internal(format!(
            "unexpected value stored for roll {index} of session {session_id}"
        ))),
        None => Err(SlotsError::Internal(format!(
            "missing roll {index} of session {session_id}"
        ))),
    }
}
