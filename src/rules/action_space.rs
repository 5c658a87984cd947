//! Legal move enumeration.
//!
//! The action space is recomputed from the board on every call; nothing is
//! cached. An agent uses it to pick a move, and the environment still
//! re-validates whatever move arrives.

use smallvec::SmallVec;

use crate::board::Board;
use crate::core::CellIndex;

/// Legal actions for one position.
///
/// Never more than nine entries, so it lives on the stack.
pub type LegalActions = SmallVec<[CellIndex; 9]>;

/// Enumerates legal moves for a board.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionSpace;

impl ActionSpace {
    /// Lazily iterate the empty cells in ascending order.
    ///
    /// Yields nothing once the game is over. The iterator is `Clone`, so it
    /// can be restarted from the same position.
    pub fn iter(board: &Board) -> impl Iterator<Item = CellIndex> + Clone + '_ {
        let open = !board.status().is_terminal();
        board.empty_cells().filter(move |_| open)
    }

    /// Collect the legal actions for `board`.
    ///
    /// ```
    /// use tictactoe_rl::board::Board;
    /// use tictactoe_rl::rules::ActionSpace;
    ///
    /// let actions = ActionSpace::legal_actions(&Board::new());
    /// assert_eq!(actions.len(), 9);
    /// ```
    #[must_use]
    pub fn legal_actions(board: &Board) -> LegalActions {
        Self::iter(board).collect()
    }

    /// Check a raw index against `board`.
    #[must_use]
    pub fn contains(board: &Board, index: usize) -> bool {
        CellIndex::new(index).is_some_and(|cell| Self::iter(board).any(|c| c == cell))
    }

    /// Size of the full action space, legal or not.
    #[must_use]
    pub const fn size() -> usize {
        crate::core::NUM_CELLS
    }

    /// Legal-action mask in index order, for masking policy outputs.
    #[must_use]
    pub fn mask(board: &Board) -> [bool; 9] {
        let mut mask = [false; 9];
        for cell in Self::iter(board) {
            mask[cell.index()] = true;
        }
        mask
    }
}
