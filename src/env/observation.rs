//! Value snapshots handed to the learning agent.

use serde::{Deserialize, Serialize};

use crate::board::{Board, GameStatus};
use crate::core::{Cell, CellIndex, Mark, NUM_CELLS};
use crate::rules::{ActionSpace, LegalActions};

/// What the agent sees: a board and its status.
///
/// `Copy`, so handing one out never exposes the environment's live board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub board: Board,
    pub status: GameStatus,
}

impl Observation {
    /// Observe `board`, deriving its status.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            status: board.status(),
            board,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal actions from this observation.
    #[must_use]
    pub fn legal_actions(&self) -> LegalActions {
        ActionSpace::legal_actions(&self.board)
    }

    /// Feature vector from `perspective`'s point of view.
    ///
    /// +1 for own marks, -1 for the other player's, 0 for empty cells.
    #[must_use]
    pub fn encode(&self, perspective: Mark) -> [f32; NUM_CELLS] {
        let mut features = [0.0; NUM_CELLS];
        for (feature, cell) in features.iter_mut().zip(self.board.cells()) {
            *feature = match cell {
                Cell::Empty => 0.0,
                Cell::Marked(m) if *m == perspective => 1.0,
                Cell::Marked(_) => -1.0,
            };
        }
        features
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.board, self.status)
    }
}

/// Result of one `step`.
///
/// Reward and termination describe the position after the last mark placed
/// in the step: the opponent's reply if one was made, else the agent's move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Observation before the agent moved.
    pub prior: Observation,

    /// Cell the agent asked for, as given.
    pub action: usize,

    /// Observation after the agent's move and any reply.
    pub next: Observation,

    pub reward: f64,

    pub terminated: bool,

    /// The opponent's reply, if the game continued after the agent's move.
    pub opponent_reply: Option<CellIndex>,
}

impl Transition {
    /// True when the step left the board untouched (ignored illegal move).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.prior.board == self.next.board
    }
}
