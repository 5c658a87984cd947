//! Python bindings for the tic-tac-toe environment.
//!
//! # Quick Start
//!
//! ```python
//! import tictactoe_rl as ttt
//!
//! env = ttt.TicTacToeEnv(seed=7, opponent="win_block_random")
//! board = env.reset()
//! while not env.is_terminal:
//!     action = env.legal_actions()[0]
//!     board, reward, terminated = env.step(action)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_env;

pub use py_env::*;

/// tictactoe_rl: a tic-tac-toe environment for reinforcement learning.
#[pymodule]
fn tictactoe_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTicTacToeEnv>()?;
    Ok(())
}
