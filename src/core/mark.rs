//! Player marks and board cells.
//!
//! ## Mark
//!
//! The token a player places. `X` is player A and moves first on a blank
//! board; `O` is player B.
//!
//! ## Cell
//!
//! One board position: empty, or holding exactly one mark.

use serde::{Deserialize, Serialize};

/// A player's token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mark {
    /// Player A, first to move on a blank board.
    X,
    /// Player B.
    O,
}

impl Mark {
    /// Both marks, in turn order.
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    /// The opposing mark.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character form used in board strings.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parse a mark from its symbol (case-insensitive).
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of a single board position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    /// Symbol used for empty cells when rendering.
    pub const EMPTY_SYMBOL: char = '.';

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The mark in this cell, if any.
    #[must_use]
    pub const fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(m) => Some(m),
        }
    }

    /// Check whether this cell holds `mark`.
    #[must_use]
    pub fn holds(self, mark: Mark) -> bool {
        self == Cell::Marked(mark)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => Self::EMPTY_SYMBOL,
            Cell::Marked(m) => m.symbol(),
        }
    }

    /// Parse a cell symbol. Empty accepts `.`, `_` and `-`.
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            other => Mark::from_symbol(other).map(Cell::Marked),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Marked(mark)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
