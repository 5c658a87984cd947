//! Configurable choice of built-in opponent.

use serde::{Deserialize, Serialize};

use crate::core::EnvError;

use super::policy::{FirstEmptyOpponent, HeuristicOpponent, OpponentPolicy, UniformOpponent};

/// Built-in opponent, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentStrategy {
    FirstEmpty,
    Random,
    BlockOrRandom,
    WinBlockRandom,
    #[default]
    WinBlockPositional,
}

impl OpponentStrategy {
    pub const ALL: [OpponentStrategy; 5] = [
        OpponentStrategy::FirstEmpty,
        OpponentStrategy::Random,
        OpponentStrategy::BlockOrRandom,
        OpponentStrategy::WinBlockRandom,
        OpponentStrategy::WinBlockPositional,
    ];

    /// Build the policy this strategy names.
    #[must_use]
    pub fn build(self) -> Box<dyn OpponentPolicy> {
        match self {
            OpponentStrategy::FirstEmpty => Box::new(FirstEmptyOpponent),
            OpponentStrategy::Random => Box::new(UniformOpponent),
            OpponentStrategy::BlockOrRandom => Box::new(HeuristicOpponent::block_or_random()),
            OpponentStrategy::WinBlockRandom => Box::new(HeuristicOpponent::win_block_random()),
            OpponentStrategy::WinBlockPositional => {
                Box::new(HeuristicOpponent::win_block_positional())
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OpponentStrategy::FirstEmpty => "first_empty",
            OpponentStrategy::Random => "random",
            OpponentStrategy::BlockOrRandom => "block_or_random",
            OpponentStrategy::WinBlockRandom => "win_block_random",
            OpponentStrategy::WinBlockPositional => "win_block_positional",
        }
    }
}

impl std::fmt::Display for OpponentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OpponentStrategy {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| EnvError::InvalidConfig {
                message: format!(
                    "unknown opponent '{s}', expected one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ),
            })
    }
}
