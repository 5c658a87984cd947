//! Episode records.
//!
//! An episode records one game from reset to terminal status as the agent
//! experienced it: the first observation, then one transition per step.

use serde::{Deserialize, Serialize};

use crate::board::GameStatus;

use super::observation::{Observation, Transition};

/// A complete (or in-progress) episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Observation returned by reset.
    pub initial: Observation,

    /// One entry per step, in order.
    pub transitions: Vec<Transition>,
}

impl Episode {
    /// Start recording from `initial`.
    #[must_use]
    pub fn new(initial: Observation) -> Self {
        Self {
            initial,
            transitions: Vec::new(),
        }
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Number of steps taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Latest observation.
    #[must_use]
    pub fn last_observation(&self) -> Observation {
        self.transitions
            .last()
            .map_or(self.initial, |t| t.next)
    }

    /// Status of the latest observation.
    #[must_use]
    pub fn outcome(&self) -> GameStatus {
        self.last_observation().status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.transitions.last().is_some_and(|t| t.terminated)
    }

    /// Sum of rewards.
    #[must_use]
    pub fn total_reward(&self) -> f64 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// Discounted return from the first step: sum of `gamma^t * r_t`.
    #[must_use]
    pub fn discounted_return(&self, gamma: f64) -> f64 {
        self.transitions
            .iter()
            .rev()
            .fold(0.0, |acc, t| t.reward + gamma * acc)
    }

    /// Actions the agent took, in order.
    pub fn actions(&self) -> impl Iterator<Item = usize> + '_ {
        self.transitions.iter().map(|t| t.action)
    }
}
