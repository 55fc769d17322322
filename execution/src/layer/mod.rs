use slots_types::{
    api::{CashOutReceipt, RollOutcome, SessionCreated},
    execution::{Instruction, Key, Output, Value},
    slots::Session,
    SessionId, SlotsError,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::slots::{roll::play, Entropy};
use crate::state::{load_session, State};

mod handlers;

/// Pending changes on top of a [State].
///
/// Reads fall through to the underlying state unless overwritten. Nothing
/// reaches the underlying state until the caller applies [Layer::commit].
pub struct Layer<'a, S: State, E: Entropy> {
    state: &'a S,
    entropy: &'a E,
    pending: BTreeMap<Key, Value>,

    now: u64,
}

impl<'a, S: State, E: Entropy> Layer<'a, S, E> {
    pub fn new(state: &'a S, entropy: &'a E, now: u64) -> Self {
        Self {
            state,
            entropy,
            pending: BTreeMap::new(),

            now,
        }
    }

    fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, value);
    }

    /// Apply one instruction. A failed instruction leaves no pending changes.
    pub async fn apply(&mut self, instruction: &Instruction) -> Result<Output, SlotsError> {
        match instruction {
            Instruction::CreateSession { session_id } => {
                self.handle_create_session(session_id).await
            }
            Instruction::PlayRoll { session_id } => self.handle_play_roll(session_id).await,
            Instruction::CashOut { session_id } => self.handle_cash_out(session_id).await,
        }
    }

    pub async fn execute(
        &mut self,
        instructions: Vec<Instruction>,
    ) -> Vec<Result<Output, SlotsError>> {
        let mut outputs = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            outputs.push(self.apply(&instruction).await);
        }
        outputs
    }

    pub fn commit(self) -> Vec<(Key, Value)> {
        self.pending.into_iter().collect()
    }
}

impl<'a, S: State, E: Entropy> State for Layer<'a, S, E> {
    async fn get(&self, key: &Key) -> Option<Value> {
        match self.pending.get(key) {
            Some(value) => Some(value.clone()),
            None => self.state.get(key).await,
        }
    }

    async fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, value);
    }
}
