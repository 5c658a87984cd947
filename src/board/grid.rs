//! The 3x3 board.
//!
//! `Board` is a plain `Copy` value: nine cells, no history. Mutation goes
//! through `apply`, which refuses out-of-range and occupied cells, so a cell
//! can never hold two marks. Status is never stored here; `status()` derives
//! it from the cells on every call.

use serde::{Deserialize, Serialize};

use super::lines;
use super::status::GameStatus;
use crate::core::{Cell, CellIndex, EnvError, Mark, Result, NUM_CELLS, SIDE};

/// Fixed-size tic-tac-toe board.
///
/// ## Example
///
/// ```
/// use tictactoe_rl::board::{Board, GameStatus};
/// use tictactoe_rl::core::Mark;
///
/// let mut board: Board = "XX.OO....".parse().unwrap();
/// assert_eq!(board.status(), GameStatus::InProgress);
///
/// board.apply(2, Mark::X).unwrap();
/// assert_eq!(board.status(), GameStatus::XWon);
///
/// // Occupied cells are refused
/// assert!(board.apply(0, Mark::O).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from raw cells.
    ///
    /// Does not check mark counts; use `validate` for untrusted input.
    #[must_use]
    pub fn from_cells(cells: [Cell; NUM_CELLS]) -> Self {
        Self { cells }
    }

    /// All cells in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell; NUM_CELLS] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, cell: CellIndex) -> Cell {
        self.cells[cell.index()]
    }

    /// Cell at a raw index, `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    #[must_use]
    pub fn is_empty_at(&self, cell: CellIndex) -> bool {
        self.cell(cell).is_empty()
    }

    /// Empty cells in ascending index order.
    pub fn empty_cells(&self) -> impl Iterator<Item = CellIndex> + Clone + '_ {
        CellIndex::all().filter(move |&c| self.is_empty_at(c))
    }

    /// Number of cells holding `mark`.
    #[must_use]
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| c.holds(mark)).count()
    }

    /// Number of marks of either kind.
    #[must_use]
    pub fn marks_placed(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    #[must_use]
    pub fn has_line(&self, mark: Mark) -> bool {
        lines::has_line(self, mark)
    }

    /// Derive the game status.
    ///
    /// X lines are checked before O lines, then fullness. Boards where both
    /// marks hold a line cannot arise from legal play.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let x_won = self.has_line(Mark::X);
        let o_won = self.has_line(Mark::O);
        debug_assert!(!(x_won && o_won), "both marks hold a line: {self}");

        if x_won {
            GameStatus::XWon
        } else if o_won {
            GameStatus::OWon
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Mark due to move next, assuming X moved first.
    #[must_use]
    pub fn next_mark(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    /// Place `mark` at a raw index.
    ///
    /// Fails with `EnvError::IllegalMove` when the index is outside `0..9`
    /// or the cell is not empty. The board is unchanged on failure.
    pub fn apply(&mut self, index: usize, mark: Mark) -> Result<CellIndex> {
        let cell = CellIndex::new(index).ok_or_else(|| EnvError::out_of_range(index))?;
        if !self.is_empty_at(cell) {
            return Err(EnvError::occupied(index));
        }
        self.cells[cell.index()] = Cell::Marked(mark);
        Ok(cell)
    }

    /// Overwrite a cell unconditionally. Used to build positions.
    pub(crate) fn set(&mut self, cell: CellIndex, mark: Mark) {
        self.cells[cell.index()] = Cell::Marked(mark);
    }

    /// Check that this board could arise from alternating play.
    ///
    /// Mark counts may differ by at most one, and at most one mark may hold
    /// a line.
    pub fn validate(&self) -> Result<()> {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        if x.abs_diff(o) > 1 {
            return Err(EnvError::InvalidBoard {
                input: self.to_string(),
                reason: format!("mark counts X={x}, O={o} differ by more than one"),
            });
        }
        if self.has_line(Mark::X) && self.has_line(Mark::O) {
            return Err(EnvError::InvalidBoard {
                input: self.to_string(),
                reason: "both marks hold a line".to_string(),
            });
        }
        Ok(())
    }

    /// Multi-line 3x3 rendering.
    #[must_use]
    pub fn to_grid_string(&self) -> String {
        self.cells
            .chunks(SIDE)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Board {
    type Err = EnvError;

    /// Parse a 9-character board string, e.g. `"XO..X...O"`.
    ///
    /// Counts are validated; cell symbols are `X`, `O`, and `.`/`_`/`-`.
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != NUM_CELLS {
            return Err(EnvError::InvalidBoard {
                input: s.to_string(),
                reason: format!("expected {NUM_CELLS} cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; NUM_CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_symbol(c).ok_or_else(|| EnvError::InvalidBoard {
                input: s.to_string(),
                reason: format!("invalid character '{c}' at position {i}"),
            })?;
        }

        let board = Board::from_cells(cells);
        board.validate()?;
        Ok(board)
    }
}

impl TryFrom<String> for Board {
    type Error = EnvError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}
