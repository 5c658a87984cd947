//! The four decision tiers the heuristic opponent is built from.
//!
//! Each tier is a read-only query on the board that either proposes a cell
//! or passes. Deterministic tiers break ties by line-table order; random
//! tiers draw from the caller's `GameRng`.

use smallvec::SmallVec;

use crate::board::{lines, Board};
use crate::core::{CellIndex, GameRng, Mark};

/// Which tier produced a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Completed a line for the mover.
    WinNow,
    /// Took the cell the other player needed.
    Block,
    /// Center, else a corner.
    Positional,
    /// Any empty cell.
    Random,
    /// Lowest-index empty cell.
    FirstEmpty,
}

/// First cell, in table order, that completes a line for `mark`.
#[must_use]
pub fn win_now(board: &Board, mark: Mark) -> Option<CellIndex> {
    lines::completing_cell(board, mark)
}

/// First cell, in table order, that would complete a line for the other mark.
#[must_use]
pub fn block(board: &Board, mark: Mark) -> Option<CellIndex> {
    lines::completing_cell(board, mark.other())
}

/// The center if empty, otherwise a uniformly random empty corner.
pub fn positional(board: &Board, rng: &mut GameRng) -> Option<CellIndex> {
    if board.is_empty_at(CellIndex::CENTER) {
        return Some(CellIndex::CENTER);
    }

    let corners: SmallVec<[CellIndex; 4]> = CellIndex::CORNERS
        .into_iter()
        .filter(|&c| board.is_empty_at(c))
        .collect();
    rng.choose(&corners).copied()
}

/// A uniformly random empty cell.
pub fn random_empty(board: &Board, rng: &mut GameRng) -> Option<CellIndex> {
    let empty: SmallVec<[CellIndex; 9]> = board.empty_cells().collect();
    rng.choose(&empty).copied()
}

/// The lowest-index empty cell.
#[must_use]
pub fn first_empty(board: &Board) -> Option<CellIndex> {
    board.empty_cells().next()
}
