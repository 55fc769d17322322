//! Common types used throughout slots.

pub mod api;
pub mod execution;
pub mod slots;

pub use slots::{SessionId, SlotsError};
