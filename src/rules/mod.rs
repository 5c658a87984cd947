//! Environment contract and legal move enumeration.
//!
//! - `Environment`: the `reset` / `step` / `legal_actions` interface that
//!   learning agents program against
//! - `ActionSpace`: legal cells for a board, recomputed on every call

pub mod action_space;
pub mod engine;

pub use action_space::{ActionSpace, LegalActions};
pub use engine::Environment;
