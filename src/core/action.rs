//! Action representation: a single cell index.
//!
//! Every move places one mark on one cell, so the whole action space is the
//! nine board positions. Indices are 0-based and row-major:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

use serde::{Deserialize, Serialize};

use super::mark::Mark;

/// Number of cells on the board.
pub const NUM_CELLS: usize = 9;

/// Board side length.
pub const SIDE: usize = 3;

/// A checked cell index in `0..9`.
///
/// ## Example
///
/// ```
/// use tictactoe_rl::core::CellIndex;
///
/// let center = CellIndex::CENTER;
/// assert_eq!(center.index(), 4);
/// assert_eq!(center.row_col(), (1, 1));
///
/// assert!(CellIndex::new(9).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(u8);

impl CellIndex {
    /// The center cell.
    pub const CENTER: CellIndex = CellIndex(4);

    /// The four corner cells, in index order.
    pub const CORNERS: [CellIndex; 4] = [CellIndex(0), CellIndex(2), CellIndex(6), CellIndex(8)];

    /// Create a cell index, returning `None` if out of range.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < NUM_CELLS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Create a cell index from row and column.
    #[must_use]
    pub const fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < SIDE && col < SIDE {
            Some(Self((row * SIDE + col) as u8))
        } else {
            None
        }
    }

    /// Get the raw 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get (row, column).
    #[must_use]
    pub const fn row_col(self) -> (usize, usize) {
        (self.index() / SIDE, self.index() % SIDE)
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Iterate over all nine cells in index order.
    pub fn all() -> impl Iterator<Item = CellIndex> + Clone {
        (0..NUM_CELLS as u8).map(CellIndex)
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("cell index {value} out of range 0-8"))
    }
}

impl From<CellIndex> for usize {
    fn from(cell: CellIndex) -> Self {
        cell.index()
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed mark, kept in the environment's per-episode history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Who moved.
    pub mark: Mark,

    /// Where the mark went.
    pub cell: CellIndex,

    /// True when the environment's opponent made this move.
    pub by_opponent: bool,
}

impl MoveRecord {
    #[must_use]
    pub fn new(mark: Mark, cell: CellIndex, by_opponent: bool) -> Self {
        Self {
            mark,
            cell,
            by_opponent,
        }
    }
}
