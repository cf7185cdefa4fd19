//! The board engine.
//!
//! `Board` owns the grid, the selection, the symbol source and the event
//! log. Hosts create one, hold it, and pass it to whatever needs it; there
//! is no process-wide instance.
//!
//! ## Quick Start
//!
//! ```
//! use match3::{Board, BoardConfig};
//!
//! let mut board = Board::new(BoardConfig::new(6, 6).with_seed(1)).unwrap();
//!
//! // A fresh board is full and has no runs.
//! assert!(board.is_stable());
//!
//! // First tap selects, an adjacent second tap swaps and resolves.
//! board.on_tap(2, 2).unwrap();
//! let outcome = board.on_tap(3, 2).unwrap();
//! assert!(outcome.resolution.is_some());
//! assert_eq!(board.selection(), None);
//! assert!(board.grid().is_full());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{BoardConfig, BoardError, BoardRng, Cell, Coord, Result, RngState};
use crate::detect::MatchDetector;
use crate::events::{BoardEvent, EventLog};
use crate::grid::Grid;
use crate::refill::SymbolSource;
use crate::resolve::{ResolutionLoop, ResolutionReport, ResolutionStatus};
use crate::selection::{SelectionController, Transition};

/// Result of a tap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TapOutcome {
    /// What the tap did to the selection.
    pub transition: Transition,

    /// The cascade that followed a swap, if one happened.
    pub resolution: Option<ResolutionReport>,
}

impl TapOutcome {
    /// True if the tap swapped two cells.
    #[must_use]
    pub fn swapped(&self) -> bool {
        matches!(self.transition, Transition::Swap { .. })
    }
}

/// Serializable board state for hosts and replays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub config: BoardConfig,
    pub grid: Grid,
    pub selection: Option<Coord>,
    pub rng: RngState,
    pub revision: u64,
}

/// A match-3 board.
///
/// Generic over the [`SymbolSource`] feeding refills; the default is the
/// seeded [`BoardRng`].
#[derive(Clone, Debug)]
pub struct Board<S = BoardRng> {
    config: BoardConfig,
    grid: Grid,
    selection: SelectionController,
    resolver: ResolutionLoop,
    source: S,
    events: EventLog,
    revision: u64,
}

impl Board<BoardRng> {
    /// Create a board filled from a `BoardRng` seeded with `config.seed`.
    pub fn new(config: BoardConfig) -> Result<Self> {
        let rng = BoardRng::new(config.seed);
        Self::with_source(config, rng)
    }

    /// Capture the full board state, RNG position included.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            config: self.config.clone(),
            grid: self.grid.clone(),
            selection: self.selection.selection(),
            rng: self.source.state(),
            revision: self.revision,
        }
    }

    /// Rebuild a board from a snapshot.
    ///
    /// The restored board continues exactly as the captured one would have.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self> {
        snapshot.config.validate()?;
        let grid = &snapshot.grid;
        if grid.x_count() != snapshot.config.x_count || grid.y_count() != snapshot.config.y_count {
            return Err(BoardError::Snapshot(format!(
                "grid is {}x{}, config says {}x{}",
                grid.x_count(),
                grid.y_count(),
                snapshot.config.x_count,
                snapshot.config.y_count
            )));
        }
        if grid.len() != snapshot.config.cell_count() {
            return Err(BoardError::Snapshot(format!(
                "grid holds {} cells, expected {}",
                grid.len(),
                snapshot.config.cell_count()
            )));
        }
        if let Some(coord) = snapshot.selection {
            grid.check(coord).map_err(|e| BoardError::Snapshot(e.to_string()))?;
        }

        let mut board = Self::from_grid(
            snapshot.config.clone(),
            snapshot.grid.clone(),
            BoardRng::from_state(&snapshot.rng),
        )?;
        if let Some(coord) = snapshot.selection {
            board.selection.on_tap(coord);
        }
        board.revision = snapshot.revision;
        Ok(board)
    }

    /// Show what swapping `a` and `b` would lead to, without touching this
    /// board.
    ///
    /// Refills during the preview draw from a fork of the board's RNG, so
    /// they will generally differ from what a real swap produces. Returns
    /// `None` if the cells are not adjacent.
    pub fn preview_swap(&mut self, a: Coord, b: Coord) -> Result<Option<(Grid, ResolutionReport)>> {
        self.grid.check(a)?;
        self.grid.check(b)?;
        if !a.is_adjacent(b) {
            return Ok(None);
        }

        let mut grid = self.grid.clone();
        let mut rng = self.source.fork();
        grid.swap(a, b)?;
        let report = self.resolver.run(&mut grid, &mut rng);
        Ok(Some((grid, report)))
    }
}

impl<S: SymbolSource> Board<S> {
    /// Create a board whose refills come from `source`.
    ///
    /// The initial grid is produced by refilling an all-Empty grid, so no
    /// cell starts equal to its left or bottom neighbor.
    pub fn with_source(config: BoardConfig, mut source: S) -> Result<Self> {
        config.validate()?;
        if !config.has_comfortable_alphabet() {
            warn!(
                letter_count = config.letter_count,
                "small alphabet, refills may starve"
            );
        }

        let resolver = ResolutionLoop::new(config.letter_count, config.max_cascade_passes);
        let mut grid = Grid::new(config.x_count, config.y_count);
        resolver.refiller().run(&mut grid, &mut source);
        debug!(x_count = config.x_count, y_count = config.y_count, "board created");

        Ok(Self {
            events: EventLog::with_capacity(config.event_capacity),
            config,
            grid,
            selection: SelectionController::new(),
            resolver,
            source,
            revision: 0,
        })
    }

    /// Create a board around an existing grid, as-is.
    ///
    /// The grid is not resolved; call [`Board::resolve`] if it may hold runs
    /// or Empty cells.
    pub fn from_grid(config: BoardConfig, grid: Grid, source: S) -> Result<Self> {
        config.validate()?;
        if grid.x_count() != config.x_count || grid.y_count() != config.y_count {
            return Err(BoardError::InvalidConfig(format!(
                "grid is {}x{}, config says {}x{}",
                grid.x_count(),
                grid.y_count(),
                config.x_count,
                config.y_count
            )));
        }
        if let Some(symbol) = grid.max_symbol().filter(|s| !s.in_alphabet(config.letter_count)) {
            return Err(BoardError::UnknownSymbol {
                symbol,
                letter_count: config.letter_count,
            });
        }

        Ok(Self {
            resolver: ResolutionLoop::new(config.letter_count, config.max_cascade_passes),
            events: EventLog::with_capacity(config.event_capacity),
            config,
            grid,
            selection: SelectionController::new(),
            source,
            revision: 0,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current cell at `(x, y)`.
    pub fn symbol_at(&self, x: usize, y: usize) -> Result<Cell> {
        self.grid.get(Coord::new(x, y))
    }

    /// The pending selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Coord> {
        self.selection.selection()
    }

    /// Incremented after every resolution.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True if the board is full and a detection pass would destroy nothing.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.grid.is_full() && MatchDetector::is_stable(&self.grid)
    }

    /// Events not yet drained.
    ///
    /// The log is bounded by `BoardConfig::event_capacity`; see
    /// [`EventLog::dropped`] for how many were evicted.
    #[must_use]
    pub fn pending_events(&self) -> &EventLog {
        &self.events
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.events.drain().collect()
    }

    /// Mutable access to the symbol source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // === Mutation ===

    /// Handle a tap at `(x, y)`.
    ///
    /// Out-of-range taps are rejected before the selection changes.
    pub fn on_tap(&mut self, x: usize, y: usize) -> Result<TapOutcome> {
        let coord = Coord::new(x, y);
        self.grid.check(coord)?;

        let transition = self.selection.on_tap(coord);
        if let Some(previous) = transition.deselected() {
            self.events.push(BoardEvent::Deselected(previous));
        }
        if let Some(current) = transition.selected() {
            self.events.push(BoardEvent::Selected(current));
        }

        let resolution = match transition {
            Transition::Swap { from, to } => Some(self.swap_and_resolve(from, to)?),
            _ => None,
        };

        Ok(TapOutcome {
            transition,
            resolution,
        })
    }

    /// Swap two cells directly, bypassing the selection.
    ///
    /// Non-adjacent pairs are refused with `Ok(None)` and leave the board
    /// untouched.
    pub fn try_swap(&mut self, a: Coord, b: Coord) -> Result<Option<ResolutionReport>> {
        self.grid.check(a)?;
        self.grid.check(b)?;
        if !a.is_adjacent(b) {
            return Ok(None);
        }
        self.swap_and_resolve(a, b).map(Some)
    }

    fn swap_and_resolve(&mut self, a: Coord, b: Coord) -> Result<ResolutionReport> {
        self.grid.swap(a, b)?;
        debug!(a = %a, b = %b, "swapped");
        self.events.push(BoardEvent::Swapped { a, b });
        Ok(self.resolve())
    }

    /// Overwrite a single cell without resolving.
    ///
    /// For scenarios and editors; the board may hold runs or Empty cells
    /// afterwards until [`Board::resolve`] runs.
    pub fn set_symbol(&mut self, x: usize, y: usize, cell: Cell) -> Result<Cell> {
        if let Some(symbol) = cell {
            if !symbol.in_alphabet(self.config.letter_count) {
                return Err(BoardError::UnknownSymbol {
                    symbol,
                    letter_count: self.config.letter_count,
                });
            }
        }
        self.grid.set(Coord::new(x, y), cell)
    }

    /// Drop the pending selection.
    pub fn clear_selection(&mut self) -> Option<Coord> {
        let cleared = self.selection.clear();
        if let Some(coord) = cleared {
            self.events.push(BoardEvent::Deselected(coord));
        }
        cleared
    }

    /// Run the cascade to quiescence (or the pass cap) and record events.
    pub fn resolve(&mut self) -> ResolutionReport {
        let report = self.resolver.run(&mut self.grid, &mut self.source);
        self.revision += 1;
        self.record(&report);
        report
    }

    fn record(&mut self, report: &ResolutionReport) {
        if !self.events.is_recording() {
            return;
        }
        for (idx, pass) in report.passes.iter().enumerate() {
            let pass_no = idx as u32 + 1;
            self.events.extend(pass.groups.iter().map(|g| BoardEvent::GroupDestroyed {
                pass: pass_no,
                axis: g.axis,
                symbol: g.symbol,
                cells: g.cells.to_vec(),
            }));
            self.events.extend(pass.falls.iter().map(|f| BoardEvent::Fell {
                from: f.from,
                to: f.to,
            }));
            self.events.extend(pass.placements.iter().map(|p| BoardEvent::Refilled {
                coord: p.coord,
                symbol: p.symbol,
                starved: p.starved,
            }));
        }
        self.events.push(BoardEvent::Resolved {
            revision: self.revision,
            passes: report.pass_count(),
            capped: report.status == ResolutionStatus::Capped,
        });
    }
}

/// Panics if `coord` is out of range; use [`Board::symbol_at`] for a checked
/// read.
impl<S> std::ops::Index<Coord> for Board<S> {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        &self.grid[coord]
    }
}
