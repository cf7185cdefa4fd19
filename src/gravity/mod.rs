//! Column gravity.
//!
//! After destruction, each column is compacted toward `y = 0`: surviving
//! symbols keep their relative order and every Empty cell ends up above
//! them.

use serde::{Deserialize, Serialize};

use crate::core::Coord;
use crate::grid::Grid;

/// One symbol sliding down its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fall {
    pub from: Coord,
    pub to: Coord,
}

/// Stateless column compactor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Compactor;

impl Compactor {
    /// Compact one column, appending every move to `falls`.
    ///
    /// `empty_idx` is the lowest Empty slot; `full_idx` scans upward for the
    /// next occupied cell. Everything strictly between them is Empty, so
    /// after a move the next Empty slot is always `empty_idx + 1`.
    fn compact_column(grid: &mut Grid, x: usize, falls: &mut Vec<Fall>) {
        let y_count = grid.y_count();

        let mut empty_idx = 0;
        while empty_idx < y_count && grid.at(Coord::new(x, empty_idx)).is_some() {
            empty_idx += 1;
        }

        let mut full_idx = empty_idx + 1;
        while full_idx < y_count {
            let from = Coord::new(x, full_idx);
            if let Some(symbol) = grid.at(from) {
                let to = Coord::new(x, empty_idx);
                grid.put(to, Some(symbol));
                grid.put(from, None);
                falls.push(Fall { from, to });
                empty_idx += 1;
            }
            full_idx += 1;
        }
    }

    /// Compact every column. Returns the moves performed, column by column,
    /// bottom-most move first.
    pub fn run(grid: &mut Grid) -> Vec<Fall> {
        let mut falls = Vec::new();
        for x in 0..grid.x_count() {
            Self::compact_column(grid, x, &mut falls);
        }
        falls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn test_gap_in_middle() {
        let mut g = grid("A\n.\nB");
        let falls = Compactor::run(&mut g);

        assert_eq!(g.to_string(), ".\nA\nB");
        assert_eq!(
            falls,
            vec![Fall {
                from: Coord::new(0, 2),
                to: Coord::new(0, 1)
            }]
        );
    }

    #[test]
    fn test_preserves_order() {
        let mut g = grid("C\n.\nB\n.\n.\nA\n.");
        Compactor::run(&mut g);
        assert_eq!(g.to_string(), ".\n.\n.\n.\nC\nB\nA");
    }

    #[test]
    fn test_full_column_untouched() {
        let mut g = grid("A\nB\nC");
        assert!(Compactor::run(&mut g).is_empty());
        assert_eq!(g.to_string(), "A\nB\nC");
    }

    #[test]
    fn test_empty_column_untouched() {
        let mut g = grid(".\n.\n.");
        assert!(Compactor::run(&mut g).is_empty());
    }

    #[test]
    fn test_top_cell_falls() {
        // Occupied top cell above an Empty one must still fall.
        let mut g = grid("A\n.");
        Compactor::run(&mut g);
        assert_eq!(g.to_string(), ".\nA");
    }

    #[test]
    fn test_columns_independent() {
        let mut g = grid("AB.\n.CD\nE.F");
        Compactor::run(&mut g);
        assert_eq!(g.to_string(), "...\nABD\nECF");
    }

    #[test]
    fn test_single_row_is_noop() {
        let mut g = grid("A.B");
        assert!(Compactor::run(&mut g).is_empty());
        assert_eq!(g.to_string(), "A.B");
    }
}
