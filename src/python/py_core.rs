//! Conversions shared by the Python bindings.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::{EnvError, IllegalMovePolicy, Mark};

/// Map an environment error onto the matching Python exception.
///
/// Stepping a finished episode is a `RuntimeError`; everything else is a
/// bad argument and becomes `ValueError`.
pub(crate) fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::EpisodeTerminated { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

pub(crate) fn parse_mark(text: &str) -> PyResult<Mark> {
    let mut chars = text.trim().chars();
    match (chars.next().and_then(Mark::from_symbol), chars.next()) {
        (Some(mark), None) => Ok(mark),
        _ => Err(PyValueError::new_err(format!(
            "agent_mark must be 'X' or 'O', got '{text}'"
        ))),
    }
}

pub(crate) fn parse_illegal_policy(text: &str) -> PyResult<IllegalMovePolicy> {
    match text.trim().to_ascii_lowercase().as_str() {
        "reject" => Ok(IllegalMovePolicy::Reject),
        "ignore" => Ok(IllegalMovePolicy::Ignore),
        _ => Err(PyValueError::new_err(format!(
            "illegal must be 'reject' or 'ignore', got '{text}'"
        ))),
    }
}
