//! Opponent policies: how the environment answers the agent's move.
//!
//! Policies are trait-based so callers can plug in their own:
//! - `FirstEmptyOpponent`: always the lowest open cell
//! - `UniformOpponent`: any open cell, uniformly
//! - `HeuristicOpponent`: win, then block, then (optionally) center/corner,
//!   then random

use tracing::trace;

use crate::board::Board;
use crate::core::{CellIndex, GameRng, Mark};

use super::tiers::{self, Tier};

// =============================================================================
// Opponent Policy
// =============================================================================

/// Policy choosing the opponent's reply.
///
/// Implementations must only read the board. The environment applies the
/// returned cell itself.
pub trait OpponentPolicy: Send + Sync {
    /// Choose a cell for `mark` to play.
    ///
    /// Returns `None` only when the board has no empty cell.
    fn select(&self, board: &Board, mark: Mark, rng: &mut GameRng) -> Option<CellIndex>;

    /// Short name for logs and reprs.
    fn name(&self) -> &'static str;
}

/// Plays the lowest-index empty cell.
#[derive(Clone, Debug, Default)]
pub struct FirstEmptyOpponent;

impl OpponentPolicy for FirstEmptyOpponent {
    fn select(&self, board: &Board, _mark: Mark, _rng: &mut GameRng) -> Option<CellIndex> {
        tiers::first_empty(board)
    }

    fn name(&self) -> &'static str {
        "first_empty"
    }
}

/// Uniform random opponent policy.
///
/// Selects uniformly from empty cells.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn select(&self, board: &Board, _mark: Mark, rng: &mut GameRng) -> Option<CellIndex> {
        tiers::random_empty(board, rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Tiered heuristic opponent.
///
/// Tiers run in strict priority order and the first one to propose a cell
/// wins:
/// 1. win now (if enabled)
/// 2. block (if enabled)
/// 3. center, else a random corner (if enabled)
/// 4. random empty cell
///
/// Tiers 1 and 2 take the first match in line-table order, so a given board
/// always gets the same deterministic answer from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeuristicOpponent {
    pub win: bool,
    pub block: bool,
    pub positional: bool,
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::win_block_positional()
    }
}

impl HeuristicOpponent {
    /// Block threats, otherwise random.
    #[must_use]
    pub fn block_or_random() -> Self {
        Self {
            win: false,
            block: true,
            positional: false,
        }
    }

    /// Win, else block, else random.
    #[must_use]
    pub fn win_block_random() -> Self {
        Self {
            win: true,
            block: true,
            positional: false,
        }
    }

    /// Win, else block, else center/corner, else random.
    #[must_use]
    pub fn win_block_positional() -> Self {
        Self {
            win: true,
            block: true,
            positional: true,
        }
    }

    /// Choose a cell and report which tier chose it.
    pub fn select_with_tier(
        &self,
        board: &Board,
        mark: Mark,
        rng: &mut GameRng,
    ) -> Option<(CellIndex, Tier)> {
        if self.win {
            if let Some(cell) = tiers::win_now(board, mark) {
                return Some((cell, Tier::WinNow));
            }
        }
        if self.block {
            if let Some(cell) = tiers::block(board, mark) {
                return Some((cell, Tier::Block));
            }
        }
        if self.positional {
            if let Some(cell) = tiers::positional(board, rng) {
                return Some((cell, Tier::Positional));
            }
        }
        tiers::random_empty(board, rng).map(|cell| (cell, Tier::Random))
    }
}

impl OpponentPolicy for HeuristicOpponent {
    fn select(&self, board: &Board, mark: Mark, rng: &mut GameRng) -> Option<CellIndex> {
        let (cell, tier) = self.select_with_tier(board, mark, rng)?;
        trace!(%board, %mark, %cell, ?tier, "opponent tier fired");
        Some(cell)
    }

    fn name(&self) -> &'static str {
        match (self.win, self.block, self.positional) {
            (true, true, true) => "win_block_positional",
            (true, true, false) => "win_block_random",
            (false, true, false) => "block_or_random",
            _ => "heuristic",
        }
    }
}
