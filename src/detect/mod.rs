//! Match detection and destruction.
//!
//! ## The backward window
//!
//! Every non-Empty cell is visited in scan order (x ascending, then y
//! ascending) and acts as the *anchor* of two candidate groups:
//!
//! - **Row**: the anchor, plus `(x-1, y)` and `(x-2, y)` when they hold the
//!   anchor's symbol.
//! - **Column**: the anchor, plus `(x, y-1)` and `(x, y-2)` likewise.
//!
//! A group is destroyed iff it holds **exactly three** cells. Both groups
//! of an anchor are built before either is cleared, and clearing is
//! visible to every later anchor of the same pass.
//!
//! The window never looks forward and never looks further than two cells,
//! so a run of four loses only its first three cells in one pass: by the
//! time the fourth cell is the anchor, its neighbors are already Empty.
//! The leftover may survive until a later cascade builds a fresh run
//! through it.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Coord, Symbol};
use crate::grid::Grid;

/// Cells a destroy-eligible group holds.
pub const GROUP_LEN: usize = 3;

/// Axis a group was found along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Same row, looking toward lower `x`.
    Row,
    /// Same column, looking toward lower `y`.
    Column,
}

/// A run found by one anchor along one axis.
///
/// `cells[0]` is the anchor; the rest follow in window order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub axis: Axis,
    pub symbol: Symbol,
    pub cells: SmallVec<[Coord; GROUP_LEN]>,
}

impl MatchGroup {
    /// The cell that anchored this group.
    #[must_use]
    pub fn anchor(&self) -> Coord {
        self.cells[0]
    }

    /// True if this group is destroy-eligible.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.cells.len() == GROUP_LEN
    }
}

/// Result of one detection pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectionPass {
    /// Destroyed groups in the order they were found.
    pub groups: Vec<MatchGroup>,
    /// Distinct cells set to Empty by this pass.
    pub cleared: FxHashSet<Coord>,
}

impl DetectionPass {
    /// Did this pass destroy anything?
    #[must_use]
    pub fn destroyed_any(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Number of distinct cells cleared.
    #[must_use]
    pub fn cleared_count(&self) -> usize {
        self.cleared.len()
    }
}

/// Stateless exactly-3 backward-window detector.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchDetector;

impl MatchDetector {
    /// Build the candidate group for `anchor` along `axis`.
    fn candidate(grid: &Grid, anchor: Coord, symbol: Symbol, axis: Axis) -> MatchGroup {
        let mut cells = SmallVec::new();
        cells.push(anchor);

        for diff in 1..GROUP_LEN {
            let back = match axis {
                Axis::Row => anchor.x.checked_sub(diff).map(|x| Coord::new(x, anchor.y)),
                Axis::Column => anchor.y.checked_sub(diff).map(|y| Coord::new(anchor.x, y)),
            };
            if let Some(coord) = back {
                if grid.at(coord) == Some(symbol) {
                    cells.push(coord);
                }
            }
        }

        MatchGroup { axis, symbol, cells }
    }

    /// Run one pass over `grid`, clearing every eligible group in place.
    pub fn run(grid: &mut Grid) -> DetectionPass {
        let mut pass = DetectionPass::default();

        for anchor in grid.coords() {
            let Some(symbol) = grid.at(anchor) else {
                continue;
            };

            let row = Self::candidate(grid, anchor, symbol, Axis::Row);
            let column = Self::candidate(grid, anchor, symbol, Axis::Column);

            for group in [row, column] {
                if !group.is_eligible() {
                    continue;
                }
                trace!(anchor = %anchor, axis = ?group.axis, symbol = %symbol, "destroying group");
                for &cell in &group.cells {
                    grid.put(cell, None);
                    pass.cleared.insert(cell);
                }
                pass.groups.push(group);
            }
        }

        pass
    }

    /// Run a pass on a copy of `grid` and report what it would destroy.
    ///
    /// The grid's storage is persistent, so the copy is cheap.
    #[must_use]
    pub fn probe(grid: &Grid) -> DetectionPass {
        let mut scratch = grid.clone();
        Self::run(&mut scratch)
    }

    /// True if a pass over `grid` would destroy nothing.
    #[must_use]
    pub fn is_stable(grid: &Grid) -> bool {
        !Self::probe(grid).destroyed_any()
    }
}
