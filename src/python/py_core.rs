//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{BoardConfig, BoardError, Coord, DEFAULT_EVENT_CAPACITY};

impl From<BoardError> for PyErr {
    fn from(err: BoardError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Python wrapper for BoardConfig.
#[pyclass(name = "BoardConfig")]
#[derive(Clone, Debug)]
pub struct PyBoardConfig(pub BoardConfig);

#[pymethods]
impl PyBoardConfig {
    /// Create a board configuration.
    ///
    /// # Arguments
    /// - x_count: Number of columns
    /// - y_count: Number of rows
    /// - letter_count: Alphabet size (at least 2)
    /// - seed: RNG seed for deterministic refills
    /// - max_cascade_passes: Pass limit per resolution
    /// - event_capacity: Undrained events kept; 0 disables events
    #[new]
    #[pyo3(signature = (
        x_count = 8,
        y_count = 8,
        letter_count = 5,
        seed = 42,
        max_cascade_passes = 64,
        event_capacity = DEFAULT_EVENT_CAPACITY
    ))]
    fn new(
        x_count: usize,
        y_count: usize,
        letter_count: u8,
        seed: u64,
        max_cascade_passes: u32,
        event_capacity: usize,
    ) -> PyResult<Self> {
        let config = BoardConfig::new(x_count, y_count)
            .with_letter_count(letter_count)
            .with_seed(seed)
            .with_max_cascade_passes(max_cascade_passes)
            .with_event_capacity(event_capacity);
        config.validate()?;
        Ok(Self(config))
    }

    #[getter]
    fn x_count(&self) -> usize {
        self.0.x_count
    }

    #[getter]
    fn y_count(&self) -> usize {
        self.0.y_count
    }

    #[getter]
    fn letter_count(&self) -> u8 {
        self.0.letter_count
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    fn __repr__(&self) -> String {
        format!(
            "BoardConfig({}x{}, letters={}, seed={})",
            self.0.x_count, self.0.y_count, self.0.letter_count, self.0.seed
        )
    }
}

/// `(x, y)` tuple as seen from Python.
pub(crate) fn coord_tuple(coord: Coord) -> (usize, usize) {
    (coord.x, coord.y)
}
