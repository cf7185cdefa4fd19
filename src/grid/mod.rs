//! The board grid: a fixed-size 2D array of cells.
//!
//! Storage is column-major in a persistent `im::Vector`, so each column is
//! contiguous (gravity walks columns) and cloning a grid is O(1). Clones
//! back snapshots handed to the host and dry-run detection passes.
//!
//! ## Text form
//!
//! Grids parse from and print to a compact text form, one line per row,
//! **top row first**, `A`..`Z` for symbols and `.` for Empty:
//!
//! ```
//! use match3::core::{Coord, Symbol};
//! use match3::grid::Grid;
//!
//! let grid: Grid = "AB.\nBCA".parse().unwrap();
//! assert_eq!(grid.x_count(), 3);
//! assert_eq!(grid.y_count(), 2);
//! // Bottom-left is (0, 0).
//! assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), Some(Symbol::new(1)));
//! assert_eq!(grid.get(Coord::new(2, 1)).unwrap(), None);
//! assert_eq!(grid.to_string(), "AB.\nBCA");
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{BoardError, Cell, Coord, Result, Symbol};

/// Fixed-size grid of cells with bounds-checked access.
///
/// Deserialization checks that the dimensions are non-zero and match the
/// number of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    x_count: usize,
    y_count: usize,
    /// `cells[x * y_count + y]`.
    cells: Vector<Cell>,
}

/// Unchecked serialized form of [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    x_count: usize,
    y_count: usize,
    cells: Vector<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = BoardError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        if raw.x_count == 0 || raw.y_count == 0 {
            return Err(BoardError::InvalidConfig("grid must not be empty".into()));
        }
        let expected = raw.x_count.checked_mul(raw.y_count);
        if expected != Some(raw.cells.len()) {
            return Err(BoardError::InvalidConfig(format!(
                "{}x{} grid cannot hold {} cells",
                raw.x_count,
                raw.y_count,
                raw.cells.len()
            )));
        }
        Ok(Self {
            x_count: raw.x_count,
            y_count: raw.y_count,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create an all-Empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(x_count: usize, y_count: usize) -> Self {
        assert!(x_count > 0, "Grid must have at least 1 column");
        assert!(y_count > 0, "Grid must have at least 1 row");

        Self {
            x_count,
            y_count,
            cells: std::iter::repeat(None).take(x_count * y_count).collect(),
        }
    }

    /// Build a grid from columns, `columns[x][y]`, bottom cell first.
    ///
    /// All columns must be non-empty and of equal height.
    pub fn from_columns(columns: Vec<Vec<Cell>>) -> Result<Self> {
        let x_count = columns.len();
        let y_count = columns.first().map_or(0, Vec::len);
        if x_count == 0 || y_count == 0 {
            return Err(BoardError::InvalidConfig("grid must not be empty".into()));
        }
        if let Some(x) = columns.iter().position(|c| c.len() != y_count) {
            return Err(BoardError::InvalidConfig(format!(
                "column {} has {} cells, expected {}",
                x,
                columns[x].len(),
                y_count
            )));
        }

        Ok(Self {
            x_count,
            y_count,
            cells: columns.into_iter().flatten().collect(),
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn x_count(&self) -> usize {
        self.x_count
    }

    /// Number of rows.
    #[must_use]
    pub fn y_count(&self) -> usize {
        self.y_count
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; grids have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if `coord` lies on the board.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.x_count && coord.y < self.y_count
    }

    /// `Ok(())` if `coord` lies on the board, `OutOfRange` otherwise.
    pub fn check(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                x: coord.x,
                y: coord.y,
                x_count: self.x_count,
                y_count: self.y_count,
            })
        }
    }

    #[inline]
    fn offset(&self, coord: Coord) -> usize {
        coord.x * self.y_count + coord.y
    }

    /// Cell at an in-bounds coordinate.
    ///
    /// Callers inside the crate iterate coordinates produced by the grid
    /// itself, so the bounds are already known to hold.
    #[inline]
    pub(crate) fn at(&self, coord: Coord) -> Cell {
        debug_assert!(self.contains(coord));
        self.cells[self.offset(coord)]
    }

    #[inline]
    pub(crate) fn put(&mut self, coord: Coord, cell: Cell) -> Cell {
        debug_assert!(self.contains(coord));
        let idx = self.offset(coord);
        self.cells.set(idx, cell)
    }

    /// Cell at `coord`.
    pub fn get(&self, coord: Coord) -> Result<Cell> {
        self.check(coord)?;
        Ok(self.at(coord))
    }

    /// Write `cell` at `coord`, returning the previous cell.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<Cell> {
        self.check(coord)?;
        Ok(self.put(coord, cell))
    }

    /// Exchange the contents of two cells. Nothing else changes.
    ///
    /// Adjacency is not checked here; that is the selection controller's job.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        let (ia, ib) = (self.offset(a), self.offset(b));
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Every coordinate in scan order: x ascending, then y ascending.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let y_count = self.y_count;
        (0..self.x_count).flat_map(move |x| (0..y_count).map(move |y| Coord::new(x, y)))
    }

    /// Cells of column `x`, bottom first.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of range.
    pub fn column(&self, x: usize) -> impl Iterator<Item = Cell> + '_ {
        assert!(x < self.x_count, "column {} out of range", x);
        let start = x * self.y_count;
        self.cells.iter().skip(start).take(self.y_count).copied()
    }

    /// Number of Empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// True if no cell is Empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Symbols of the in-bounds, non-Empty orthogonal neighbors of `coord`.
    pub fn neighbor_symbols(&self, coord: Coord) -> impl Iterator<Item = Symbol> + '_ {
        coord
            .neighbors(self.x_count, self.y_count)
            .filter_map(move |n| self.at(n))
    }

    /// Highest symbol index present, if any cell is filled.
    #[must_use]
    pub fn max_symbol(&self) -> Option<Symbol> {
        self.cells.iter().flatten().copied().max()
    }
}

/// Panics if `coord` is out of range; use [`Grid::get`] for a checked read.
impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        assert!(self.contains(coord), "{} is outside the grid", coord);
        &self.cells[self.offset(coord)]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.y_count).rev() {
            for x in 0..self.x_count {
                match self.at(Coord::new(x, y)) {
                    Some(symbol) if symbol.raw() < 26 => write!(f, "{}", symbol)?,
                    Some(_) => write!(f, "?")?,
                    None => write!(f, ".")?,
                }
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Grid {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let y_count = rows.len();
        let x_count = rows.first().map_or(0, |r| r.chars().count());

        let mut columns = vec![Vec::with_capacity(y_count); x_count];
        // Text is top row first; the grid is bottom row first.
        for (row_idx, row) in rows.iter().rev().enumerate() {
            if row.chars().count() != x_count {
                return Err(BoardError::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    y_count - 1 - row_idx,
                    row.chars().count(),
                    x_count
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    'A'..='Z' => Some(Symbol::new(ch as u8 - b'A')),
                    other => {
                        return Err(BoardError::InvalidConfig(format!(
                            "unexpected cell character {:?}",
                            other
                        )))
                    }
                };
                columns[x].push(cell);
            }
        }

        Self::from_columns(columns)
    }
}
