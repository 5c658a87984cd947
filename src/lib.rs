//! # tictactoe-rl
//!
//! A tic-tac-toe environment for reinforcement learning agents.
//!
//! The agent places its mark, and the environment answers with a move from a
//! built-in heuristic opponent, then reports the new board, a scalar reward,
//! and whether the episode is over.
//!
//! ## Design Principles
//!
//! 1. **Read-only queries**: `Board` and `ActionSpace` only inspect. The
//!    environment is the single place that places marks.
//!
//! 2. **Table-driven rules**: win detection and opponent threats both walk
//!    the same static table of eight lines.
//!
//! 3. **Explicit randomness**: every random opponent choice draws from the
//!    environment's seeded `GameRng`. Same seed and same agent moves give the
//!    same episode.
//!
//! ## Modules
//!
//! - `core`: marks, cell indices, RNG, configuration, errors
//! - `board`: the 3x3 board, line table, game status
//! - `rules`: the `Environment` trait and legal-action enumeration
//! - `opponent`: opponent policies and their tiers
//! - `env`: `TicTacToeEnv`, observations, transitions, episodes, observers
//! - `python`: PyO3 bindings (feature `python`)
//!
//! ## Example
//!
//! ```
//! use tictactoe_rl::{EnvConfig, TicTacToeEnv};
//!
//! let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
//! let episode = env.rollout(|_, legal| legal[0].index()).unwrap();
//! assert!(episode.is_finished());
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod opponent;
pub mod env;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Cell, Mark,
    CellIndex, MoveRecord, NUM_CELLS,
    GameRng, GameRngState,
    EnvConfig, IllegalMovePolicy, RewardConfig, StartPosition,
    EnvError, IllegalMoveReason, Result,
};

pub use crate::board::{Board, GameStatus, LINES};

pub use crate::rules::{ActionSpace, Environment, LegalActions};

pub use crate::opponent::{
    OpponentPolicy, OpponentStrategy, Tier,
    FirstEmptyOpponent, UniformOpponent, HeuristicOpponent,
};

pub use crate::env::{
    TicTacToeEnv, EnvSnapshot,
    Observation, Transition, Episode,
    EnvironmentObserver, OutcomeTally, TallyCounts,
};
