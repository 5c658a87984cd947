//! Game status derived from board contents.

use serde::{Deserialize, Serialize};

use crate::core::Mark;

/// Outcome classification of a board.
///
/// Always a pure function of the board; see `Board::status`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    XWon,
    OWon,
    /// Board full, no line.
    Draw,
}

impl GameStatus {
    /// Status for a win by `mark`.
    #[must_use]
    pub const fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winning mark, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    /// Short name, also accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::XWon => "x_won",
            GameStatus::OWon => "o_won",
            GameStatus::Draw => "draw",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(GameStatus::InProgress),
            "x_won" => Ok(GameStatus::XWon),
            "o_won" => Ok(GameStatus::OWon),
            "draw" => Ok(GameStatus::Draw),
            other => Err(format!("unknown game status '{other}'")),
        }
    }
}
