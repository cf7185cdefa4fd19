//! # match3
//!
//! A rectangular match-3 board engine: tap selection, adjacent swaps,
//! exactly-three run detection, gravity and constrained refill.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: No rendering, input or timing. The host forwards
//!    taps and reads back cells, selection and events.
//!
//! 2. **Explicit Instances**: A [`Board`] is an ordinary value the host
//!    creates and owns. There is no global board.
//!
//! 3. **Deterministic**: Refills draw from a [`SymbolSource`]; the default
//!    [`BoardRng`] is seeded from [`BoardConfig`], so a seed and a tap
//!    sequence fully determine the game.
//!
//! ## Architecture
//!
//! - **Cascade Loop**: detect → compact → refill, repeated while a pass
//!   changed the grid, capped at a configurable number of passes.
//!
//! - **Persistent Data Structures**: O(1) grid cloning via `im-rs` for
//!   snapshots, previews and dry-run detection.
//!
//! ## Coordinates
//!
//! `(x, y)` with `x` the column (0 = left) and `y` the row (0 = bottom).
//! Gravity pulls toward `y = 0`.
//!
//! ## Modules
//!
//! - `core`: Symbols, coordinates, configuration, errors, RNG
//! - `grid`: Fixed-size cell storage
//! - `detect`: Exactly-three run detection and clearing
//! - `gravity`: Column compaction
//! - `refill`: Neighbor-constrained refill and symbol sources
//! - `resolve`: The cascade loop
//! - `selection`: Two-tap selection state machine
//! - `events`: Change notifications for hosts
//! - `board`: The engine facade

pub mod core;
pub mod grid;
pub mod detect;
pub mod gravity;
pub mod refill;
pub mod resolve;
pub mod selection;
pub mod events;
pub mod board;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, BoardError, BoardRng, Cell, Coord, Result, RngState, Symbol,
    DEFAULT_EVENT_CAPACITY, RECOMMENDED_MIN_LETTERS,
};

pub use crate::grid::Grid;

pub use crate::detect::{Axis, DetectionPass, MatchDetector, MatchGroup, GROUP_LEN};

pub use crate::gravity::{Compactor, Fall};

pub use crate::refill::{CyclingSource, Placement, Refiller, SymbolSource};

pub use crate::resolve::{PassRecord, ResolutionLoop, ResolutionReport, ResolutionStatus};

pub use crate::selection::{SelectionController, Transition};

pub use crate::events::{BoardEvent, EventLog};

pub use crate::board::{Board, BoardSnapshot, TapOutcome};
