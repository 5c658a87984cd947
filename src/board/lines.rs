//! The eight winning lines, as a static table of index triples.
//!
//! Every line query iterates this table in order, so "first match" always
//! means rows top to bottom, then columns left to right, then the two
//! diagonals.

use crate::core::{Cell, CellIndex, Mark};

use super::grid::Board;

/// A line: three cell indices.
pub type Line = [usize; 3];

/// Winning lines on the 3x3 board.
pub const LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Check whether all three cells of `line` hold `mark`.
#[must_use]
pub fn is_complete(board: &Board, line: &Line, mark: Mark) -> bool {
    line.iter().all(|&idx| board.cells()[idx].holds(mark))
}

/// Check whether any line is complete for `mark`.
#[must_use]
pub fn has_line(board: &Board, mark: Mark) -> bool {
    LINES.iter().any(|line| is_complete(board, line, mark))
}

/// The empty cell that would complete `line` for `mark`.
///
/// Requires two cells holding `mark` and the third empty.
#[must_use]
pub fn completion_in_line(board: &Board, line: &Line, mark: Mark) -> Option<CellIndex> {
    let mut count = 0;
    let mut empty = None;

    for &idx in line {
        match board.cells()[idx] {
            Cell::Empty => {
                if empty.is_some() {
                    return None;
                }
                empty = Some(idx);
            }
            c if c.holds(mark) => count += 1,
            _ => return None,
        }
    }

    if count == 2 {
        empty.and_then(CellIndex::new)
    } else {
        None
    }
}

/// First cell, in table order, that completes a line for `mark`.
#[must_use]
pub fn completing_cell(board: &Board, mark: Mark) -> Option<CellIndex> {
    LINES
        .iter()
        .find_map(|line| completion_in_line(board, line, mark))
}

/// Every line complete for `mark`, in table order.
pub fn complete_lines(board: &Board, mark: Mark) -> impl Iterator<Item = &'static Line> + '_ {
    LINES.iter().filter(move |line| is_complete(board, line, mark))
}
