//! Cascade resolution.
//!
//! One *pass* is detect → compact → refill. Passes repeat while a pass
//! changed the grid. The first pass that destroys, moves and places nothing
//! leaves the board full and stable and ends the cascade.
//!
//! A grid that starts with Empty cells can destroy nothing in its first
//! pass and still line up a run during compaction, so a pass that only
//! compacted or refilled is followed by another one.
//!
//! The refill rule keeps new cells from pairing with their neighbors, but
//! compaction can still line up fresh runs, so the loop is capped at a
//! configurable number of passes.
//!
//! ```
//! use match3::core::Symbol;
//! use match3::grid::Grid;
//! use match3::refill::CyclingSource;
//! use match3::resolve::{ResolutionLoop, ResolutionStatus};
//!
//! let mut grid: Grid = "AAA\nBCB".parse().unwrap();
//! let report = ResolutionLoop::new(4, 16).run(&mut grid, &mut CyclingSource::new());
//!
//! assert_eq!(report.status, ResolutionStatus::Stable);
//! assert!(report.destroyed_any());
//! assert!(grid.is_full());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::detect::{MatchDetector, MatchGroup};
use crate::gravity::{Compactor, Fall};
use crate::grid::Grid;
use crate::refill::{Placement, Refiller, SymbolSource};

/// How a cascade ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// The last pass changed nothing; the board is full and stable.
    Stable,

    /// The pass limit was reached while passes were still destroying runs.
    Capped,
}

/// Everything one pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    pub groups: Vec<MatchGroup>,
    pub cleared: usize,
    pub falls: Vec<Fall>,
    pub placements: Vec<Placement>,
}

impl PassRecord {
    #[must_use]
    pub fn destroyed_any(&self) -> bool {
        !self.groups.is_empty()
    }

    /// True if the pass destroyed, moved or placed anything.
    #[must_use]
    pub fn changed_grid(&self) -> bool {
        self.destroyed_any() || !self.falls.is_empty() || !self.placements.is_empty()
    }
}

/// Outcome of one full cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub status: ResolutionStatus,
    /// Every pass run, including the final non-destroying one.
    pub passes: Vec<PassRecord>,
}

impl ResolutionReport {
    /// Number of passes run.
    #[must_use]
    pub fn pass_count(&self) -> u32 {
        self.passes.len() as u32
    }

    /// True if any pass destroyed a group.
    #[must_use]
    pub fn destroyed_any(&self) -> bool {
        self.passes.iter().any(PassRecord::destroyed_any)
    }

    /// Total groups destroyed across passes.
    #[must_use]
    pub fn groups_destroyed(&self) -> usize {
        self.passes.iter().map(|p| p.groups.len()).sum()
    }

    /// Total distinct cells cleared, summed per pass.
    #[must_use]
    pub fn cells_cleared(&self) -> usize {
        self.passes.iter().map(|p| p.cleared).sum()
    }

    /// Total cells refilled.
    #[must_use]
    pub fn cells_refilled(&self) -> usize {
        self.passes.iter().map(|p| p.placements.len()).sum()
    }

    /// Refills that had to ignore their neighbors.
    #[must_use]
    pub fn starved_refills(&self) -> usize {
        self.passes
            .iter()
            .flat_map(|p| &p.placements)
            .filter(|p| p.starved)
            .count()
    }
}

/// Runs detect/compact/refill passes to quiescence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionLoop {
    refiller: Refiller,
    max_passes: u32,
}

impl ResolutionLoop {
    /// Create a loop for a `letter_count`-letter alphabet, capped at
    /// `max_passes` passes.
    ///
    /// # Panics
    ///
    /// Panics if `max_passes` is zero.
    #[must_use]
    pub fn new(letter_count: u8, max_passes: u32) -> Self {
        assert!(max_passes > 0, "Cascade needs at least 1 pass");
        Self {
            refiller: Refiller::new(letter_count),
            max_passes,
        }
    }

    /// The refiller used for each pass.
    #[must_use]
    pub fn refiller(&self) -> &Refiller {
        &self.refiller
    }

    /// Run one detect → compact → refill pass.
    pub fn pass<S: SymbolSource + ?Sized>(&self, grid: &mut Grid, source: &mut S) -> PassRecord {
        let detection = MatchDetector::run(grid);
        let falls = Compactor::run(grid);
        let placements = self.refiller.run(grid, source);

        PassRecord {
            cleared: detection.cleared_count(),
            groups: detection.groups,
            falls,
            placements,
        }
    }

    /// Resolve the cascade.
    pub fn run<S: SymbolSource + ?Sized>(&self, grid: &mut Grid, source: &mut S) -> ResolutionReport {
        let mut passes = Vec::new();

        loop {
            let record = self.pass(grid, source);
            let changed = record.changed_grid();
            debug!(
                pass = passes.len() + 1,
                groups = record.groups.len(),
                cleared = record.cleared,
                refilled = record.placements.len(),
                "cascade pass"
            );
            passes.push(record);

            if !changed {
                return ResolutionReport {
                    status: ResolutionStatus::Stable,
                    passes,
                };
            }
            if passes.len() as u32 >= self.max_passes {
                warn!(max_passes = self.max_passes, "cascade hit pass limit");
                return ResolutionReport {
                    status: ResolutionStatus::Capped,
                    passes,
                };
            }
        }
    }
}
