//! Error types for the environment.

use thiserror::Error;

use crate::board::GameStatus;

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// Index outside `0..9`.
    OutOfRange,
    /// Target cell already holds a mark.
    Occupied,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMoveReason::OutOfRange => write!(f, "out of range 0-8"),
            IllegalMoveReason::Occupied => write!(f, "already occupied"),
        }
    }
}

/// Main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EnvError {
    #[error("illegal move to cell {cell}: {reason}")]
    IllegalMove {
        cell: usize,
        reason: IllegalMoveReason,
    },

    #[error("episode already over ({status}); call reset first")]
    EpisodeTerminated { status: GameStatus },

    #[error("invalid board '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl EnvError {
    pub(crate) fn out_of_range(cell: usize) -> Self {
        EnvError::IllegalMove {
            cell,
            reason: IllegalMoveReason::OutOfRange,
        }
    }

    pub(crate) fn occupied(cell: usize) -> Self {
        EnvError::IllegalMove {
            cell,
            reason: IllegalMoveReason::Occupied,
        }
    }

    /// True for rejected moves (as opposed to lifecycle or config errors).
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, EnvError::IllegalMove { .. })
    }
}

/// Convenience type alias for Results using the crate's error type.
pub type Result<T> = std::result::Result<T, EnvError>;
