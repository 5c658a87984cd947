//! The tic-tac-toe environment and the values it hands out.
//!
//! - `environment`: `TicTacToeEnv`, the stateful MDP
//! - `observation`: `Observation` and `Transition` value snapshots
//! - `episode`: `Episode`, a recorded game
//! - `observer`: callbacks notified on reset and step

pub mod environment;
pub mod episode;
pub mod observation;
pub mod observer;

pub use environment::{EnvSnapshot, TicTacToeEnv};
pub use episode::Episode;
pub use observation::{Observation, Transition};
pub use observer::{EnvironmentObserver, OutcomeTally, TallyCounts};
