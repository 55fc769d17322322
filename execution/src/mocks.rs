//! Scripted randomness and state helpers for tests.

use crate::slots::{Entropy, RandomSource};
use crate::state::{Memory, State};
use slots_types::{
    execution::{Key, Value},
    slots::Session,
    SessionId,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
    index_draws: usize,
    unit_draws: usize,
}

/// A [RandomSource] that replays queued values.
///
/// Clones share the same queue, so a handle kept by a test observes draws made
/// through the copy handed to the code under test. Once a queue is exhausted,
/// indices fall back to `0` and units to `0.99` (never suppresses).
#[derive(Clone, Default)]
pub struct ScriptedRng {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(self, indices: &[usize]) -> Self {
        self.push_indices(indices);
        self
    }

    pub fn with_units(self, units: &[f64]) -> Self {
        self.push_units(units);
        self
    }

    pub fn push_indices(&self, indices: &[usize]) {
        self.script.lock().unwrap().indices.extend(indices);
    }

    pub fn push_units(&self, units: &[f64]) {
        self.script.lock().unwrap().units.extend(units);
    }

    pub fn index_draws(&self) -> usize {
        self.script.lock().unwrap().index_draws
    }

    pub fn unit_draws(&self) -> usize {
        self.script.lock().unwrap().unit_draws
    }
}

impl RandomSource for ScriptedRng {
    fn next_index(&mut self, len: usize) -> usize {
        let mut script = self.script.lock().unwrap();
        script.index_draws += 1;
        let index = script.indices.pop_front().unwrap_or(0);
        assert!(index < len, "scripted index {index} out of range {len}");
        index
    }

    fn next_unit(&mut self) -> f64 {
        let mut script = self.script.lock().unwrap();
        script.unit_draws += 1;
        script.units.pop_front().unwrap_or(0.99)
    }
}

impl Entropy for ScriptedRng {
    type Rng = ScriptedRng;

    fn roll_rng(&self, _session_id: &SessionId, _roll_index: u64) -> Self::Rng {
        self.clone()
    }
}

/// Store a session holding `credits` directly, bypassing the rules.
pub async fn create_session_with_credits(state: &mut Memory, credits: u64) -> SessionId {
    let id = SessionId::random();
    let mut session = Session::new(id, 0);
    session.credits = credits;
    state.insert(Key::Session(id), Value::Session(session)).await;
    id
}
