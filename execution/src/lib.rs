pub mod query;
pub mod slots;
pub mod state_transition;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod layer;

mod state;

pub use layer::Layer;
pub use slots::{Entropy, GameRng, RandomSource, SeededEntropy, ServerSeed};
pub use state::{Memory, State};
