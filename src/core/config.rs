//! Environment configuration.
//!
//! Everything that varies between environment variants lives here:
//! - `RewardConfig`: reward constants per outcome
//! - `StartPosition`: what `reset` puts on the board
//! - `IllegalMovePolicy`: reject vs. ignore bad moves
//! - `EnvConfig`: combines the above with the opponent strategy, the agent's
//!   mark, and the RNG seed

use serde::{Deserialize, Serialize};

use super::mark::Mark;
use crate::board::{Board, GameStatus};
use crate::opponent::OpponentStrategy;

/// Reward constants, from the learning agent's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// The agent completed a line.
    pub win: f64,
    /// The opponent completed a line.
    pub loss: f64,
    /// Board filled with no line.
    pub draw: f64,
    /// Any non-terminal transition.
    pub step: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win: 10.0,
            loss: -10.0,
            draw: -1.0,
            step: -1.0,
        }
    }
}

impl RewardConfig {
    /// The smaller terminal rewards used by the first environment revision.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            win: 7.0,
            loss: -7.0,
            ..Self::default()
        }
    }

    /// Reward for landing in `status`, with the agent playing `agent`.
    #[must_use]
    pub fn for_status(&self, status: GameStatus, agent: Mark) -> f64 {
        match status {
            GameStatus::InProgress => self.step,
            GameStatus::Draw => self.draw,
            GameStatus::XWon | GameStatus::OWon => {
                if status.winner() == Some(agent) {
                    self.win
                } else {
                    self.loss
                }
            }
        }
    }
}

/// Board installed by `reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartPosition {
    /// All nine cells empty.
    #[default]
    Empty,
    /// A fixed position, e.g. one opening mark already placed.
    Preset(Board),
    /// The opponent policy places the first mark using the environment RNG.
    OpponentOpens,
}

/// What `step` does with an out-of-range or occupied cell.
///
/// Either way the board is left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalMovePolicy {
    /// Return `EnvError::IllegalMove`.
    #[default]
    Reject,
    /// Return a no-op transition carrying the step reward.
    Ignore,
}

/// Complete environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub rewards: RewardConfig,

    /// Heuristic the built-in opponent plays.
    pub opponent: OpponentStrategy,

    pub start: StartPosition,

    pub illegal_moves: IllegalMovePolicy,

    /// Mark played by the learning agent; the opponent plays the other one.
    pub agent_mark: Mark,

    /// Seed for the opponent RNG.
    /// Same seed and same agent moves produce the same episode.
    pub seed: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            rewards: RewardConfig::default(),
            opponent: OpponentStrategy::default(),
            start: StartPosition::Empty,
            illegal_moves: IllegalMovePolicy::Reject,
            agent_mark: Mark::X,
            seed: 42,
        }
    }
}

impl EnvConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: OpponentStrategy) -> Self {
        self.opponent = opponent;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: StartPosition) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_illegal_moves(mut self, policy: IllegalMovePolicy) -> Self {
        self.illegal_moves = policy;
        self
    }

    #[must_use]
    pub fn with_agent_mark(mut self, mark: Mark) -> Self {
        self.agent_mark = mark;
        self
    }

    /// The opponent's mark.
    #[must_use]
    pub fn opponent_mark(&self) -> Mark {
        self.agent_mark.other()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.agent_mark, Mark::X);
        assert_eq!(config.opponent_mark(), Mark::O);
        assert_eq!(config.seed, 42);
        assert_eq!(config.start, StartPosition::Empty);
        assert_eq!(config.illegal_moves, IllegalMovePolicy::Reject);
        assert_eq!(config.rewards.win, 10.0);
        assert_eq!(config.rewards.loss, -10.0);
        assert_eq!(config.rewards.draw, -1.0);
        assert_eq!(config.rewards.step, -1.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EnvConfig::default()
            .with_seed(123)
            .with_agent_mark(Mark::O)
            .with_opponent(OpponentStrategy::Random)
            .with_illegal_moves(IllegalMovePolicy::Ignore)
            .with_rewards(RewardConfig::legacy());

        assert_eq!(config.seed, 123);
        assert_eq!(config.agent_mark, Mark::O);
        assert_eq!(config.opponent_mark(), Mark::X);
        assert_eq!(config.opponent, OpponentStrategy::Random);
        assert_eq!(config.illegal_moves, IllegalMovePolicy::Ignore);
        assert_eq!(config.rewards.win, 7.0);
        assert_eq!(config.rewards.draw, -1.0);
    }

    #[test]
    fn test_reward_for_status() {
        let rewards = RewardConfig::default();

        assert_eq!(rewards.for_status(GameStatus::XWon, Mark::X), 10.0);
        assert_eq!(rewards.for_status(GameStatus::OWon, Mark::X), -10.0);
        assert_eq!(rewards.for_status(GameStatus::OWon, Mark::O), 10.0);
        assert_eq!(rewards.for_status(GameStatus::XWon, Mark::O), -10.0);
        assert_eq!(rewards.for_status(GameStatus::Draw, Mark::X), -1.0);
        assert_eq!(rewards.for_status(GameStatus::InProgress, Mark::O), -1.0);
    }

    #[test]
    fn test_serialization() {
        let config = EnvConfig::default()
            .with_seed(7)
            .with_start(StartPosition::OpponentOpens);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_preset_serialization() {
        let board: Board = "X........".parse().unwrap();
        let config = EnvConfig::default()
            .with_agent_mark(Mark::O)
            .with_start(StartPosition::Preset(board));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.start, StartPosition::Preset(board));
    }
}
