//! Board bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::board::Board;
use crate::core::{Coord, Symbol};
use crate::events::BoardEvent;
use crate::selection::Transition;

use super::py_core::{coord_tuple, PyBoardConfig};

/// Python wrapper for Board.
///
/// Cells are returned as letter indices, `None` (or `-1` in arrays) for
/// Empty.
#[pyclass(name = "Board")]
pub struct PyBoard {
    board: Board,
}

#[pymethods]
impl PyBoard {
    /// Create a board from a configuration.
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyBoardConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.0).unwrap_or_default();
        Ok(Self {
            board: Board::new(config)?,
        })
    }

    /// Tap the cell at (x, y).
    ///
    /// Returns one of "selected", "unchanged", "reselected", "swapped".
    fn tap(&mut self, x: usize, y: usize) -> PyResult<&'static str> {
        let outcome = self.board.on_tap(x, y)?;
        Ok(match outcome.transition {
            Transition::Selected(_) => "selected",
            Transition::Unchanged(_) => "unchanged",
            Transition::Reselected { .. } => "reselected",
            Transition::Swap { .. } => "swapped",
        })
    }

    /// Letter index at (x, y), or None if Empty.
    fn symbol_at(&self, x: usize, y: usize) -> PyResult<Option<u8>> {
        Ok(self.board.symbol_at(x, y)?.map(Symbol::raw))
    }

    /// Overwrite (x, y) without resolving.
    #[pyo3(signature = (x, y, letter = None))]
    fn set_symbol(&mut self, x: usize, y: usize, letter: Option<u8>) -> PyResult<Option<u8>> {
        let prev = self.board.set_symbol(x, y, letter.map(Symbol::new))?;
        Ok(prev.map(Symbol::raw))
    }

    /// Run the cascade; returns the number of passes.
    fn resolve(&mut self) -> u32 {
        self.board.resolve().pass_count()
    }

    /// The pending selection as (x, y), or None.
    fn selection(&self) -> Option<(usize, usize)> {
        self.board.selection().map(coord_tuple)
    }

    fn clear_selection(&mut self) -> Option<(usize, usize)> {
        self.board.clear_selection().map(coord_tuple)
    }

    #[getter]
    fn revision(&self) -> u64 {
        self.board.revision()
    }

    #[getter]
    fn x_count(&self) -> usize {
        self.board.grid().x_count()
    }

    #[getter]
    fn y_count(&self) -> usize {
        self.board.grid().y_count()
    }

    fn is_stable(&self) -> bool {
        self.board.is_stable()
    }

    /// Grid as a (y_count, x_count) int16 array indexed `[y, x]`, row 0 at
    /// the bottom. Empty cells are -1.
    fn grid_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<i16>>> {
        let grid = self.board.grid();
        let (x_count, y_count) = (grid.x_count(), grid.y_count());
        let mut data = Vec::with_capacity(grid.len());
        for y in 0..y_count {
            for x in 0..x_count {
                let cell = grid[Coord::new(x, y)];
                data.push(cell.map_or(-1, |s| i16::from(s.raw())));
            }
        }
        PyArray1::from_vec_bound(py, data).reshape([y_count, x_count])
    }

    /// Text form of the grid, top row first.
    fn __str__(&self) -> String {
        self.board.grid().to_string()
    }

    fn __repr__(&self) -> String {
        let grid = self.board.grid();
        format!(
            "Board({}x{}, revision={})",
            grid.x_count(),
            grid.y_count(),
            self.board.revision()
        )
    }

    /// Take pending events as a list of dicts with a "kind" key.
    fn drain_events<'py>(&mut self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        self.board
            .drain_events()
            .into_iter()
            .map(|event| event_dict(py, &event))
            .collect()
    }
}

fn event_dict<'py>(py: Python<'py>, event: &BoardEvent) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    match event {
        BoardEvent::Selected(c) => {
            dict.set_item("kind", "selected")?;
            dict.set_item("cell", coord_tuple(*c))?;
        }
        BoardEvent::Deselected(c) => {
            dict.set_item("kind", "deselected")?;
            dict.set_item("cell", coord_tuple(*c))?;
        }
        BoardEvent::Swapped { a, b } => {
            dict.set_item("kind", "swapped")?;
            dict.set_item("a", coord_tuple(*a))?;
            dict.set_item("b", coord_tuple(*b))?;
        }
        BoardEvent::GroupDestroyed {
            pass,
            axis,
            symbol,
            cells,
        } => {
            dict.set_item("kind", "destroyed")?;
            dict.set_item("pass", *pass)?;
            dict.set_item("axis", format!("{:?}", axis).to_lowercase())?;
            dict.set_item("letter", symbol.raw())?;
            let cells: Vec<_> = cells.iter().copied().map(coord_tuple).collect();
            dict.set_item("cells", cells)?;
        }
        BoardEvent::Fell { from, to } => {
            dict.set_item("kind", "fell")?;
            dict.set_item("from", coord_tuple(*from))?;
            dict.set_item("to", coord_tuple(*to))?;
        }
        BoardEvent::Refilled {
            coord,
            symbol,
            starved,
        } => {
            dict.set_item("kind", "refilled")?;
            dict.set_item("cell", coord_tuple(*coord))?;
            dict.set_item("letter", symbol.raw())?;
            dict.set_item("starved", *starved)?;
        }
        BoardEvent::Resolved {
            revision,
            passes,
            capped,
        } => {
            dict.set_item("kind", "resolved")?;
            dict.set_item("revision", *revision)?;
            dict.set_item("passes", *passes)?;
            dict.set_item("capped", *capped)?;
        }
    }
    Ok(dict)
}
