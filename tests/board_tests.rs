//! Board engine integration tests.
//!
//! These drive the public `Board` API the way a host would: taps in,
//! cells and events out.

use match3::core::{BoardConfig, BoardError, BoardRng, Coord, Symbol};
use match3::events::BoardEvent;
use match3::grid::Grid;
use match3::refill::{CyclingSource, SymbolSource};
use match3::resolve::ResolutionStatus;
use match3::selection::Transition;
use match3::{Board, BoardSnapshot, MatchDetector};

const A: Symbol = Symbol::new(0);
const B: Symbol = Symbol::new(1);

fn board_with(grid: Grid, letters: u8) -> Board<CyclingSource> {
    let config = BoardConfig::new(grid.x_count(), grid.y_count()).with_letter_count(letters);
    Board::from_grid(config, grid, CyclingSource::new()).unwrap()
}

// =============================================================================
// Swap Tests
// =============================================================================

/// Two-by-two board: no run of three fits, so an adjacent swap is a pure
/// exchange.
#[test]
fn test_two_by_two_adjacent_swap_is_exchange_only() {
    let grid = Grid::from_columns(vec![vec![Some(A), Some(A)], vec![Some(B), Some(B)]]).unwrap();
    let mut board = board_with(grid, 4);

    board.on_tap(0, 0).unwrap();
    let outcome = board.on_tap(1, 0).unwrap();

    assert_eq!(
        outcome.transition,
        Transition::Swap {
            from: Coord::new(0, 0),
            to: Coord::new(1, 0)
        }
    );
    let report = outcome.resolution.unwrap();
    assert_eq!(report.status, ResolutionStatus::Stable);
    assert_eq!(report.groups_destroyed(), 0);

    assert_eq!(board.symbol_at(0, 0).unwrap(), Some(B));
    assert_eq!(board.symbol_at(1, 0).unwrap(), Some(A));
    assert_eq!(board.symbol_at(0, 1).unwrap(), Some(A));
    assert_eq!(board.symbol_at(1, 1).unwrap(), Some(B));
    assert_eq!(board.selection(), None);
}

/// Tap events come out in the order the host needs to render them.
#[test]
fn test_tap_event_sequence() {
    let mut board = board_with("AB\nBA".parse().unwrap(), 4);

    board.on_tap(0, 1).unwrap();
    board.on_tap(0, 1).unwrap();
    board.on_tap(1, 1).unwrap();

    let events = board.drain_events();
    assert_eq!(
        events,
        vec![
            BoardEvent::Selected(Coord::new(0, 1)),
            BoardEvent::Deselected(Coord::new(0, 1)),
            BoardEvent::Swapped {
                a: Coord::new(0, 1),
                b: Coord::new(1, 1)
            },
            BoardEvent::Resolved {
                revision: 1,
                passes: 1,
                capped: false
            },
        ]
    );
    assert!(board.drain_events().is_empty());
}

/// Diagonal taps move the selection instead of swapping.
#[test]
fn test_diagonal_tap_moves_selection() {
    let mut board = board_with("AB\nBA".parse().unwrap(), 4);
    let before = board.grid().clone();

    board.on_tap(0, 0).unwrap();
    let outcome = board.on_tap(1, 1).unwrap();

    assert!(!outcome.swapped());
    assert_eq!(board.selection(), Some(Coord::new(1, 1)));
    assert_eq!(board.grid(), &before);
}

/// Out-of-range taps are rejected without side effects.
#[test]
fn test_out_of_range_tap_rejected() {
    let mut board = Board::new(BoardConfig::new(4, 3)).unwrap();

    let err = board.on_tap(4, 0).unwrap_err();
    assert_eq!(
        err,
        BoardError::OutOfRange {
            x: 4,
            y: 0,
            x_count: 4,
            y_count: 3
        }
    );
    assert_eq!(board.selection(), None);
    assert!(board.pending_events().is_empty());
    assert!(board.symbol_at(0, 3).is_err());
}

// =============================================================================
// Cascade Tests
// =============================================================================

/// Setting the last cell of `[A, A, B]` to A makes a run that the next
/// resolution destroys and refills.
#[test]
fn test_external_edit_run_is_destroyed_and_refilled() {
    let mut board = board_with("AAB".parse().unwrap(), 4);
    board.set_symbol(2, 0, Some(A)).unwrap();

    let report = board.resolve();
    let first = &report.passes[0];
    assert_eq!(first.groups.len(), 1);
    assert_eq!(
        first.groups[0].cells.as_slice(),
        &[Coord::new(2, 0), Coord::new(1, 0), Coord::new(0, 0)]
    );
    assert_eq!(first.cleared, 3);
    assert!(first.falls.is_empty());
    assert_eq!(first.placements.len(), 3);

    assert!(board.grid().is_full());
    // Each refill differs from the neighbor to its left.
    let row: Vec<_> = (0..3).map(|x| board.symbol_at(x, 0).unwrap()).collect();
    assert_ne!(row[0], row[1]);
    assert_ne!(row[1], row[2]);
}

/// A run of four loses only its first three cells in one pass.
#[test]
fn test_run_of_four_leaves_last_cell() {
    let mut grid: Grid = "AAAA".parse().unwrap();
    let pass = MatchDetector::run(&mut grid);

    assert_eq!(pass.groups.len(), 1);
    assert_eq!(grid.to_string(), "...A");
}

/// Destroyed cells in a column let the cells above fall.
#[test]
fn test_column_run_drops_cells_above() {
    let mut board = board_with("C\nB\nA\nA\nA".parse().unwrap(), 4);
    let report = board.resolve();

    let first = &report.passes[0];
    assert_eq!(first.cleared, 3);
    assert_eq!(first.falls.len(), 2);
    assert_eq!(board.symbol_at(0, 0).unwrap(), Some(B));
    assert_eq!(board.symbol_at(0, 1).unwrap(), Some(Symbol::new(2)));
    assert!(board.is_stable());

    let events = board.drain_events();
    let fell = events
        .iter()
        .filter(|e| matches!(e, BoardEvent::Fell { .. }))
        .count();
    assert_eq!(fell, 2);
}

/// A source that always answers A keeps recreating the same run.
struct Stubborn;

impl SymbolSource for Stubborn {
    fn pick(&mut self, _candidates: &[Symbol]) -> Symbol {
        A
    }
}

#[test]
fn test_runaway_cascade_is_capped() {
    let grid: Grid = "AAA".parse().unwrap();
    let config = BoardConfig::new(3, 1).with_max_cascade_passes(4);
    let mut board = Board::from_grid(config, grid, Stubborn).unwrap();

    let report = board.resolve();
    assert_eq!(report.status, ResolutionStatus::Capped);
    assert_eq!(report.pass_count(), 4);
    assert!(board.grid().is_full());

    let last = board.drain_events().pop();
    assert_eq!(
        last,
        Some(BoardEvent::Resolved {
            revision: 1,
            passes: 4,
            capped: true
        })
    );
}

/// With two letters and a cell boxed in by both, refill must still fill.
#[test]
fn test_starved_refill_uses_full_alphabet() {
    let mut board = board_with(".A.\nBAB\n.B.".parse().unwrap(), 2);
    board.set_symbol(1, 1, None).unwrap();

    let report = board.resolve();
    assert_eq!(report.status, ResolutionStatus::Stable);
    assert!(board.grid().is_full());
    assert!(board.is_stable());
    assert!(report.starved_refills() >= 1);
}

/// Compaction can line up a run even when detection found nothing; the
/// cascade must keep going until a pass changes nothing.
#[test]
fn test_run_made_by_compaction_is_destroyed() {
    let mut board = board_with(".A.\nBAB\n.B.".parse().unwrap(), 4);
    board.set_symbol(1, 1, None).unwrap();

    let report = board.resolve();

    assert_eq!(report.status, ResolutionStatus::Stable);
    assert_eq!(report.pass_count(), 3);
    // Pass one only drops the B cells into a bottom row of three.
    assert!(!report.passes[0].destroyed_any());
    assert_eq!(report.passes[0].falls.len(), 3);
    // Pass two destroys that row.
    assert_eq!(report.passes[1].groups.len(), 1);
    assert!(!report.passes[2].changed_grid());

    assert!(board.is_stable());
    assert_eq!(board.grid().to_string(), "DAC\nBCA\nCAD");
}

// =============================================================================
// Construction and Determinism
// =============================================================================

#[test]
fn test_same_seed_same_game() {
    let taps = [(0, 0), (1, 0), (3, 3), (3, 4), (5, 5), (4, 5), (2, 6), (2, 7)];

    let play = |seed: u64| {
        let mut board = Board::new(BoardConfig::new(8, 8).with_seed(seed)).unwrap();
        for &(x, y) in &taps {
            board.on_tap(x, y).unwrap();
        }
        (board.grid().clone(), board.drain_events())
    };

    assert_eq!(play(99), play(99));
    assert_ne!(play(1).0, play(2).0);
}

#[test]
fn test_config_validation() {
    assert!(Board::new(BoardConfig::new(0, 5)).is_err());
    assert!(Board::new(BoardConfig::new(5, 5).with_letter_count(1)).is_err());
    assert!(Board::new(BoardConfig::new(5, 5).with_max_cascade_passes(0)).is_err());
    assert!(Board::new(BoardConfig::new(1, 1)).is_ok());
}

#[test]
fn test_small_alphabet_board_is_still_full() {
    let board = Board::new(BoardConfig::new(6, 6).with_letter_count(2).with_seed(3)).unwrap();
    assert!(board.grid().is_full());
    assert!(board.is_stable());
}

#[test]
fn test_custom_source_fills_board() {
    let board = Board::with_source(BoardConfig::new(5, 4), CyclingSource::new()).unwrap();
    assert!(board.is_stable());
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_json_round_trip() {
    let mut board = Board::new(BoardConfig::new(6, 6).with_seed(8)).unwrap();
    board.on_tap(2, 2).unwrap();
    board.on_tap(2, 3).unwrap();
    board.on_tap(4, 4).unwrap();

    let json = serde_json::to_string(&board.snapshot()).unwrap();
    let snapshot: BoardSnapshot = serde_json::from_str(&json).unwrap();
    let mut restored = Board::from_snapshot(&snapshot).unwrap();

    assert_eq!(restored.grid(), board.grid());
    assert_eq!(restored.selection(), board.selection());

    for &(x, y) in &[(4, 5), (0, 0), (1, 0)] {
        board.on_tap(x, y).unwrap();
        restored.on_tap(x, y).unwrap();
    }
    assert_eq!(restored.grid(), board.grid());
    assert_eq!(restored.revision(), board.revision());
}

#[test]
fn test_snapshot_rejects_foreign_selection() {
    let board = Board::new(BoardConfig::new(3, 3)).unwrap();
    let mut snapshot = board.snapshot();
    snapshot.selection = Some(Coord::new(9, 9));
    assert!(matches!(
        Board::from_snapshot(&snapshot),
        Err(BoardError::Snapshot(_))
    ));
}

#[test]
fn test_preview_does_not_advance_main_stream() {
    let config = BoardConfig::new(6, 6).with_seed(21);
    let mut previewed = Board::new(config.clone()).unwrap();
    let mut plain = Board::new(config).unwrap();

    let _ = previewed.preview_swap(Coord::new(1, 1), Coord::new(2, 1)).unwrap();

    previewed.try_swap(Coord::new(1, 1), Coord::new(2, 1)).unwrap();
    plain.try_swap(Coord::new(1, 1), Coord::new(2, 1)).unwrap();
    assert_eq!(previewed.grid(), plain.grid());
}

#[test]
fn test_board_rng_is_default_source() {
    let mut board: Board<BoardRng> = Board::new(BoardConfig::default()).unwrap();
    assert_eq!(board.source_mut().seed(), 42);
}
