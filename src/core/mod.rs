//! Core engine types: symbols, coordinates, configuration, RNG, errors.
//!
//! These are the value types every other module builds on. None of them
//! know about rendering or input.

pub mod config;
pub mod coord;
pub mod error;
pub mod rng;
pub mod symbol;

pub use config::{BoardConfig, DEFAULT_EVENT_CAPACITY, RECOMMENDED_MIN_LETTERS};
pub use coord::Coord;
pub use error::{BoardError, Result};
pub use rng::{BoardRng, RngState};
pub use symbol::{Cell, Symbol};
