//! Observers notified of environment activity.
//!
//! An observer sees every reset and every transition, after the
//! environment's own state has been updated. Observers cannot change the
//! episode.

use std::sync::{Arc, Mutex, PoisonError};

use crate::board::GameStatus;

use super::observation::{Observation, Transition};

/// Callbacks for environment events. Both default to no-ops.
pub trait EnvironmentObserver: Send {
    /// Called after `reset` (or `reset_to`) installs a new episode.
    fn observe_reset(&mut self, _observation: &Observation) {}

    /// Called after every successful `step`.
    fn observe_step(&mut self, _transition: &Transition) {}
}

/// Running totals of finished episodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TallyCounts {
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
    pub steps: u64,
}

impl TallyCounts {
    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Observer that counts episode outcomes.
///
/// Clones share the same counts, so keep one handle and give the other to
/// the environment.
///
/// ```
/// use tictactoe_rl::env::{OutcomeTally, TicTacToeEnv};
/// use tictactoe_rl::core::EnvConfig;
///
/// let tally = OutcomeTally::new();
/// let mut env = TicTacToeEnv::new(EnvConfig::default()).unwrap();
/// env.add_observer(Box::new(tally.clone()));
///
/// env.rollout(|_, legal| legal[0].index()).unwrap();
/// assert_eq!(tally.counts().episodes(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OutcomeTally {
    counts: Arc<Mutex<TallyCounts>>,
}

impl OutcomeTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current counts.
    #[must_use]
    pub fn counts(&self) -> TallyCounts {
        *self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvironmentObserver for OutcomeTally {
    fn observe_step(&mut self, transition: &Transition) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts.steps += 1;
        if transition.terminated {
            match transition.next.status {
                GameStatus::XWon => counts.x_wins += 1,
                GameStatus::OWon => counts.o_wins += 1,
                GameStatus::Draw => counts.draws += 1,
                GameStatus::InProgress => {}
            }
        }
    }
}
