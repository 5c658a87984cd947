//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::EnvConfig;
use crate::env::TicTacToeEnv;
use crate::opponent::OpponentStrategy;

use super::py_core::{parse_illegal_policy, parse_mark, to_py_err};

/// Python wrapper for TicTacToeEnv.
///
/// Boards are returned as nine-character strings in row-major order, with
/// `.` for empty cells.
#[pyclass(name = "TicTacToeEnv")]
pub struct PyTicTacToeEnv {
    env: TicTacToeEnv,
}

#[pymethods]
impl PyTicTacToeEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - seed: RNG seed for the opponent
    /// - opponent: one of first_empty, random, block_or_random,
    ///   win_block_random, win_block_positional
    /// - agent_mark: "X" (moves first) or "O"
    /// - illegal: "reject" raises ValueError, "ignore" returns a no-op step
    #[new]
    #[pyo3(signature = (
        seed = 42,
        opponent = "win_block_positional",
        agent_mark = "X",
        illegal = "reject"
    ))]
    fn new(seed: u64, opponent: &str, agent_mark: &str, illegal: &str) -> PyResult<Self> {
        let strategy: OpponentStrategy = opponent.parse().map_err(to_py_err)?;
        let config = EnvConfig::default()
            .with_seed(seed)
            .with_opponent(strategy)
            .with_agent_mark(parse_mark(agent_mark)?)
            .with_illegal_moves(parse_illegal_policy(illegal)?);
        let env = TicTacToeEnv::new(config).map_err(to_py_err)?;
        Ok(Self { env })
    }

    /// Start a new episode and return the board.
    fn reset(&mut self) -> String {
        self.env.reset().board.to_string()
    }

    /// Play `action` (0-8) and the opponent's reply.
    ///
    /// Returns (board, reward, terminated).
    fn step(&mut self, action: usize) -> PyResult<(String, f64, bool)> {
        let t = self.env.step(action).map_err(to_py_err)?;
        Ok((t.next.board.to_string(), t.reward, t.terminated))
    }

    /// Empty cell indices on the current board.
    fn legal_actions(&self) -> Vec<usize> {
        self.env
            .legal_actions()
            .iter()
            .map(|c| c.index())
            .collect()
    }

    /// Board as float32 features from the agent's perspective.
    ///
    /// +1 for agent marks, -1 for opponent marks, 0 for empty cells.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        let features = self
            .env
            .current_observation()
            .encode(self.env.agent_mark());
        PyArray1::from_slice_bound(py, &features)
    }

    /// Current board as a string.
    #[getter]
    fn board(&self) -> String {
        self.env.board().to_string()
    }

    /// One of "in_progress", "x_won", "o_won", "draw".
    #[getter]
    fn status(&self) -> &'static str {
        self.env.status().as_str()
    }

    #[getter]
    fn last_reward(&self) -> f64 {
        self.env.last_reward()
    }

    #[getter]
    fn is_terminal(&self) -> bool {
        self.env.is_terminal()
    }

    /// Reseed the opponent RNG.
    fn reseed(&mut self, seed: u64) {
        self.env.reseed(seed);
    }

    fn __repr__(&self) -> String {
        format!(
            "TicTacToeEnv(board={}, status={}, opponent={})",
            self.env.board(),
            self.env.status(),
            self.env.opponent_name()
        )
    }
}
