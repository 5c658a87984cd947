//! The environment contract offered to learning agents.
//!
//! Agents drive an episode through three calls:
//! - `reset` to start an episode
//! - `legal_actions` to see which cells are open
//! - `step` to play a cell and receive the outcome
//!
//! The trait knows nothing about any particular learning algorithm.

use crate::core::Result;
use crate::env::{Observation, Transition};

use super::action_space::{ActionSpace, LegalActions};

/// A single-agent MDP environment over tic-tac-toe positions.
///
/// ## Implementation Notes
///
/// - `reset` must always succeed and return the episode's first observation
/// - `step` must reject calls once the episode is terminal
/// - `step` takes a raw index so out-of-range moves can be reported
pub trait Environment {
    /// Start a new episode.
    fn reset(&mut self) -> Observation;

    /// Play the agent's move at `action` (0-based cell index).
    fn step(&mut self, action: usize) -> Result<Transition>;

    /// The observation the agent currently sees.
    fn current_observation(&self) -> Observation;

    // === Convenience Methods ===

    /// Legal actions from an observation.
    ///
    /// Default implementation enumerates empty cells of the observed board.
    fn legal_actions(&self, observation: &Observation) -> LegalActions {
        ActionSpace::legal_actions(&observation.board)
    }

    /// Check if the current episode is over.
    fn is_terminal(&self) -> bool {
        self.current_observation().status.is_terminal()
    }
}
