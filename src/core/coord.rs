//! Board coordinates.
//!
//! `x` indexes columns left to right, `y` indexes rows bottom to top.
//! Gravity pulls toward `y = 0`.

use serde::{Deserialize, Serialize};

/// A zero-based cell position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Per-axis distance to another coordinate, `(|dx|, |dy|)`.
    #[must_use]
    pub const fn delta(self, other: Coord) -> (usize, usize) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> usize {
        let (dx, dy) = self.delta(other);
        dx + dy
    }

    /// True if `other` is at Manhattan distance exactly 1: directly left,
    /// right, above or below.
    ///
    /// Diagonals and the coordinate itself are not adjacent.
    #[must_use]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Orthogonal neighbors inside an `x_count × y_count` board.
    ///
    /// Order: down, up, left, right.
    pub fn neighbors(self, x_count: usize, y_count: usize) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        let down = y.checked_sub(1).map(|ny| Coord::new(x, ny));
        let up = (y + 1 < y_count).then(|| Coord::new(x, y + 1));
        let left = x.checked_sub(1).map(|nx| Coord::new(nx, y));
        let right = (x + 1 < x_count).then(|| Coord::new(x + 1, y));
        [down, up, left, right].into_iter().flatten()
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
