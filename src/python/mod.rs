//! Python bindings for the match3 board engine.
//!
//! # Quick Start
//!
//! ```python
//! import match3
//!
//! board = match3.Board(match3.BoardConfig(x_count=8, y_count=8, seed=7))
//!
//! board.tap(2, 2)          # "selected"
//! board.tap(3, 2)          # "swapped"
//!
//! for event in board.drain_events():
//!     print(event["kind"])
//!
//! cells = board.grid_numpy()  # int16, [y, x], -1 for Empty
//! ```

use pyo3::prelude::*;

mod py_board;
mod py_core;

pub use py_board::*;
pub use py_core::*;

/// match3: a match-3 board engine.
#[pymodule]
fn match3(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBoardConfig>()?;
    m.add_class::<PyBoard>()?;
    Ok(())
}
