//! Symbol values and the cell type.
//!
//! A `Symbol` is one letter of the board's alphabet. The engine never
//! interprets symbols beyond equality: the host decides what each one
//! looks like.
//!
//! ## Usage
//!
//! ```
//! use match3::core::{Cell, Symbol};
//!
//! let a = Symbol::new(0);
//! let empty: Cell = None;
//!
//! assert_eq!(Some(a), Some(Symbol::new(0)));
//! assert!(empty.is_none());
//! assert_eq!(Symbol::alphabet(3).count(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// One letter of the board alphabet, `0..letter_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub const fn new(letter: u8) -> Self {
        Self(letter)
    }

    /// Get the raw letter index.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check whether this symbol belongs to an alphabet of `letter_count` letters.
    #[must_use]
    pub const fn in_alphabet(self, letter_count: u8) -> bool {
        self.0 < letter_count
    }

    /// Iterate over every symbol of an alphabet of `letter_count` letters.
    pub fn alphabet(letter_count: u8) -> impl Iterator<Item = Symbol> {
        (0..letter_count).map(Symbol)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Letters read better than indices when dumping small boards.
        if self.0 < 26 {
            write!(f, "{}", (b'A' + self.0) as char)
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A grid cell: `Some(symbol)` or `None` for Empty.
///
/// Empty only exists between destruction and refill.
pub type Cell = Option<Symbol>;
