//! Slot machine rules.
//!
//! This module contains everything a single roll needs:
//! - reel generation (uniform and guaranteed-losing)
//! - outcome evaluation
//! - the win suppression policy
//! - the roll itself, which ties them to a session's ledger

pub mod fairness;
#[cfg(test)]
mod integration_tests;
pub mod outcome;
pub mod reels;
pub mod roll;

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use rand::RngCore;
use slots_types::SessionId;

/// Server-side entropy that every roll RNG is derived from.
pub type ServerSeed = [u8; 32];

/// Source of uniform randomness consumed by the rules.
///
/// Every draw the rules make goes through this trait so tests can script
/// exact symbol indices and unit draws.
pub trait RandomSource {
    /// Uniform index in `[0, len)`. `len` must be in `1..=256`.
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform value in `[0.0, 1.0)`.
    fn next_unit(&mut self) -> f64;
}

/// Hands out the random source for a given roll.
pub trait Entropy {
    type Rng: RandomSource;

    fn roll_rng(&self, session_id: &SessionId, roll_index: u64) -> Self::Rng;
}

/// Deterministic random number generator for a single roll.
///
/// Uses SHA256 hash chains seeded from the server seed, the session and the
/// roll index, so any roll can be replayed for audit.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    pub fn new(seed: &ServerSeed, session_id: &SessionId, roll_index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(session_id.as_bytes());
        hasher.update(&roll_index.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    /// Get the next random byte.
    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    pub fn next_u8(&mut self) -> u8 {
        self.next_byte()
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        for byte in bytes.iter_mut() {
            *byte = self.next_byte();
        }
        u64::from_be_bytes(bytes)
    }
}

impl RandomSource for GameRng {
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!((1..=256).contains(&len), "index range out of bounds: {len}");
        if len <= 1 {
            return 0;
        }
        // Rejection sampling for unbiased distribution
        let limit = 256 - (256 % len);
        loop {
            let value = self.next_byte() as usize;
            if value < limit {
                return value % len;
            }
        }
    }

    fn next_unit(&mut self) -> f64 {
        // Top 53 bits fill the f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Production entropy: one `GameRng` per roll, keyed by a fixed server seed.
#[derive(Clone)]
pub struct SeededEntropy {
    seed: ServerSeed,
}

impl SeededEntropy {
    pub fn new(seed: ServerSeed) -> Self {
        Self { seed }
    }

    /// Seed drawn from the operating system.
    pub fn random() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        Self::new(seed)
    }

    pub fn seed(&self) -> &ServerSeed {
        &self.seed
    }
}

impl Entropy for SeededEntropy {
    type Rng = GameRng;

    fn roll_rng(&self, session_id: &SessionId, roll_index: u64) -> GameRng {
        GameRng::new(&self.seed, session_id, roll_index)
    }
}
