//! Tap selection state machine.
//!
//! Two states: Idle, or Pending(coord) with one highlighted cell waiting
//! for a partner.
//!
//! | state        | tap            | result                               |
//! |--------------|----------------|--------------------------------------|
//! | Idle         | c              | Pending(c)                           |
//! | Pending(p)   | p              | Pending(p), nothing else             |
//! | Pending(p)   | c adjacent to p| Idle, swap p and c                   |
//! | Pending(p)   | c elsewhere    | Pending(c), no swap                  |
//!
//! The controller only decides; the board performs the swap and the
//! cascade. Bounds are checked by the board before a tap gets here.

use serde::{Deserialize, Serialize};

use crate::core::Coord;

/// What a tap did to the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Nothing was selected; `0` is now selected.
    Selected(Coord),

    /// The already-selected cell was tapped again.
    Unchanged(Coord),

    /// A non-adjacent cell was tapped; it replaces the old selection.
    Reselected { previous: Coord, current: Coord },

    /// An adjacent cell was tapped; the two must be swapped.
    /// The selection is now empty.
    Swap { from: Coord, to: Coord },
}

impl Transition {
    /// The cell that lost its highlight, if any.
    #[must_use]
    pub fn deselected(&self) -> Option<Coord> {
        match *self {
            Transition::Reselected { previous, .. } => Some(previous),
            Transition::Swap { from, .. } => Some(from),
            Transition::Selected(_) | Transition::Unchanged(_) => None,
        }
    }

    /// The cell that gained the highlight, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Coord> {
        match *self {
            Transition::Selected(c) => Some(c),
            Transition::Reselected { current, .. } => Some(current),
            Transition::Unchanged(_) | Transition::Swap { .. } => None,
        }
    }
}

/// Holds at most one pending selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionController {
    selection: Option<Coord>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    /// Apply a tap at `coord`.
    pub fn on_tap(&mut self, coord: Coord) -> Transition {
        let Some(previous) = self.selection else {
            self.selection = Some(coord);
            return Transition::Selected(coord);
        };

        if previous == coord {
            return Transition::Unchanged(coord);
        }

        if previous.is_adjacent(coord) {
            self.selection = None;
            Transition::Swap {
                from: previous,
                to: coord,
            }
        } else {
            self.selection = Some(coord);
            Transition::Reselected {
                previous,
                current: coord,
            }
        }
    }

    /// Drop the pending selection, returning it.
    pub fn clear(&mut self) -> Option<Coord> {
        self.selection.take()
    }
}
