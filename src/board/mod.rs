//! Board representation and win/draw detection.
//!
//! - `grid`: the nine-cell `Board` and its read-only queries
//! - `lines`: the static table of eight winning lines
//! - `status`: `GameStatus`, derived from a board

pub mod grid;
pub mod lines;
pub mod status;

pub use grid::Board;
pub use lines::{Line, LINES};
pub use status::GameStatus;
