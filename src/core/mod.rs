//! Core types: marks, cell actions, RNG, configuration, errors.
//!
//! These are the leaf building blocks shared by the board, the opponent,
//! and the environment.

pub mod mark;
pub mod action;
pub mod rng;
pub mod config;
pub mod error;

pub use mark::{Cell, Mark};
pub use action::{CellIndex, MoveRecord, NUM_CELLS, SIDE};
pub use rng::{GameRng, GameRngState};
pub use config::{EnvConfig, IllegalMovePolicy, RewardConfig, StartPosition};
pub use error::{EnvError, IllegalMoveReason, Result};
