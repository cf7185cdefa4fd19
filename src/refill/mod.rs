//! Constrained refill of Empty cells.
//!
//! Each Empty cell gets a symbol that differs from every in-bounds,
//! non-Empty orthogonal neighbor at the moment it is assigned. Cells are
//! filled in scan order (x ascending, then y ascending), so on an all-Empty
//! grid only the left and bottom neighbors constrain the choice.
//!
//! When the neighbors cover the whole alphabet the cell is *starved*: the
//! constraint is dropped and the symbol is drawn from the full alphabet.
//!
//! ## Symbol sources
//!
//! The choice among candidates is delegated to a [`SymbolSource`]. The
//! default is the seedable [`BoardRng`]; hosts with their own randomness
//! implement the trait.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::{BoardRng, Coord, Symbol};
use crate::grid::Grid;

/// Supplies symbols for refills.
pub trait SymbolSource {
    /// Pick one of `candidates`.
    ///
    /// `candidates` is never empty. Returning a symbol outside it breaks
    /// the refill locality guarantee.
    fn pick(&mut self, candidates: &[Symbol]) -> Symbol;
}

impl SymbolSource for BoardRng {
    fn pick(&mut self, candidates: &[Symbol]) -> Symbol {
        candidates[self.gen_index(candidates.len())]
    }
}

/// Cycles through candidates in order. Deterministic without an RNG;
/// handy for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct CyclingSource {
    next: usize,
}

impl CyclingSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SymbolSource for CyclingSource {
    fn pick(&mut self, candidates: &[Symbol]) -> Symbol {
        let symbol = candidates[self.next % candidates.len()];
        self.next = self.next.wrapping_add(1);
        symbol
    }
}

/// One filled cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub coord: Coord,
    pub symbol: Symbol,
    /// The neighbor exclusion covered the alphabet and was dropped.
    pub starved: bool,
}

/// Candidate buffer; alphabets are small.
type Candidates = SmallVec<[Symbol; 8]>;

/// Fills Empty cells from an alphabet of `letter_count` symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refiller {
    letter_count: u8,
}

impl Refiller {
    /// Create a refiller for a `letter_count`-letter alphabet.
    ///
    /// # Panics
    ///
    /// Panics if `letter_count` is zero.
    #[must_use]
    pub fn new(letter_count: u8) -> Self {
        assert!(letter_count > 0, "Alphabet must have at least 1 letter");
        Self { letter_count }
    }

    /// Symbols allowed at `coord`, given its current neighbors.
    pub fn candidates(&self, grid: &Grid, coord: Coord) -> SmallVec<[Symbol; 8]> {
        let mut excluded: SmallVec<[Symbol; 4]> = grid.neighbor_symbols(coord).collect();
        excluded.sort_unstable();
        excluded.dedup();

        Symbol::alphabet(self.letter_count)
            .filter(|s| excluded.binary_search(s).is_err())
            .collect()
    }

    /// Fill a single Empty cell.
    fn fill_cell<S: SymbolSource + ?Sized>(&self, grid: &mut Grid, coord: Coord, source: &mut S) -> Placement {
        let mut candidates: Candidates = self.candidates(grid, coord);
        let starved = candidates.is_empty();
        if starved {
            warn!(
                coord = %coord,
                letter_count = self.letter_count,
                "refill starved, falling back to full alphabet"
            );
            candidates = Symbol::alphabet(self.letter_count).collect();
        }

        let symbol = source.pick(&candidates);
        grid.put(coord, Some(symbol));
        Placement { coord, symbol, starved }
    }

    /// Fill every Empty cell of `grid` in scan order.
    pub fn run<S: SymbolSource + ?Sized>(&self, grid: &mut Grid, source: &mut S) -> Vec<Placement> {
        let empties: Vec<Coord> = grid.coords().filter(|&c| grid.at(c).is_none()).collect();
        empties
            .into_iter()
            .map(|coord| self.fill_cell(grid, coord, source))
            .collect()
    }
}
