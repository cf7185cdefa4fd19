//! Outbound change notifications.
//!
//! The board records what happened during each call so the host can
//! re-render without diffing grids. Events accumulate in a bounded
//! [`EventLog`] until the host drains them.
//!
//! ## Example
//!
//! ```
//! use match3::core::Coord;
//! use match3::events::{BoardEvent, EventLog};
//!
//! let mut log = EventLog::new();
//! log.push(BoardEvent::Selected(Coord::new(1, 2)));
//!
//! let drained: Vec<_> = log.drain().collect();
//! assert_eq!(drained, vec![BoardEvent::Selected(Coord::new(1, 2))]);
//! assert!(log.is_empty());
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Symbol, DEFAULT_EVENT_CAPACITY};
use crate::detect::Axis;

/// Something the host may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A cell became the pending selection (highlight it).
    Selected(Coord),

    /// A cell stopped being the pending selection (un-highlight it).
    Deselected(Coord),

    /// Two adjacent cells exchanged symbols.
    Swapped { a: Coord, b: Coord },

    /// A run was destroyed during cascade pass `pass` (1-based).
    GroupDestroyed {
        pass: u32,
        axis: Axis,
        symbol: Symbol,
        cells: Vec<Coord>,
    },

    /// A symbol slid down its column.
    Fell { from: Coord, to: Coord },

    /// An Empty cell received a new symbol.
    Refilled {
        coord: Coord,
        symbol: Symbol,
        starved: bool,
    },

    /// A cascade finished. `capped` is true if it stopped at the pass limit
    /// rather than at a stable board.
    Resolved {
        revision: u64,
        passes: u32,
        capped: bool,
    },
}

/// Bounded buffer of events waiting for the host.
///
/// When full, the oldest event is dropped to make room, so a host that
/// never drains keeps memory bounded. A capacity of zero records nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog {
    events: VecDeque<BoardEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Maximum number of pending events.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// False if the log was created with zero capacity.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.capacity > 0
    }

    /// Events discarded because the log was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Record an event, evicting the oldest one if the log is full.
    pub fn push(&mut self, event: BoardEvent) {
        if !self.is_recording() {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    /// Record several events in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = BoardEvent>) {
        if !self.is_recording() {
            return;
        }
        for event in events {
            self.push(event);
        }
    }

    /// Pending events, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &BoardEvent> + '_ {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return every pending event, oldest first.
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_order() {
        let mut log = EventLog::new();
        log.push(BoardEvent::Selected(Coord::new(0, 0)));
        log.extend([
            BoardEvent::Deselected(Coord::new(0, 0)),
            BoardEvent::Swapped {
                a: Coord::new(0, 0),
                b: Coord::new(1, 0),
            },
        ]);

        assert_eq!(log.len(), 3);
        assert_eq!(log.pending().next(), Some(&BoardEvent::Selected(Coord::new(0, 0))));

        let drained: Vec<_> = log.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(log.is_empty());
    }

    #[test]
    fn test_full_log_drops_oldest() {
        let mut log = EventLog::with_capacity(2);
        for x in 0..5 {
            log.push(BoardEvent::Selected(Coord::new(x, 0)));
        }

        assert_eq!(log.len(), 2);
        assert_eq!(log.dropped(), 3);
        let kept: Vec<_> = log.drain().collect();
        assert_eq!(
            kept,
            vec![
                BoardEvent::Selected(Coord::new(3, 0)),
                BoardEvent::Selected(Coord::new(4, 0)),
            ]
        );
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut log = EventLog::with_capacity(0);
        assert!(!log.is_recording());
        log.push(BoardEvent::Selected(Coord::new(0, 0)));
        log.extend([BoardEvent::Deselected(Coord::new(0, 0))]);

        assert!(log.is_empty());
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn test_event_serde() {
        let event = BoardEvent::GroupDestroyed {
            pass: 1,
            axis: Axis::Row,
            symbol: Symbol::new(2),
            cells: vec![Coord::new(2, 0), Coord::new(1, 0), Coord::new(0, 0)],
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new();
        log.push(BoardEvent::Selected(Coord::new(0, 0)));
        log.clear();
        assert!(log.is_empty());
    }
}
