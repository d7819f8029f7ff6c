//! Integration tests for weiqi
//!
//! These exercise the public API end to end: placement, captures, suicide,
//! whole-history repetition, end-of-game detection, area counting, history
//! management and replay.

use proptest::prelude::*;

use weiqi::board::{BoardState, Cell, Color, Point, parse_vertex};
use weiqi::config::Config;
use weiqi::placement::{MoveOutcome, evaluate, probe};
use weiqi::replay::ReplayNavigator;
use weiqi::session::{EndReason, GameSession};
use weiqi::territory::{count_area, count_area_with, has_no_legal_move};

const B: Color = Color::Black;
const W: Color = Color::White;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of moves with alternating colors, Black first.
/// Every move must be legal.
fn setup_position(size: usize, moves: &[Point]) -> BoardState {
    let mut board = BoardState::new(size);
    let mut color = B;
    for &pt in moves {
        let outcome = evaluate(&mut board, pt, color, true);
        assert_eq!(outcome, MoveOutcome::Legal, "setup move {pt:?} by {color}");
        color = color.opposite();
    }
    board
}

/// Place stones directly, without history.
fn setpos(size: usize, black: &[Point], white: &[Point]) -> BoardState {
    let mut board = BoardState::new(size);
    for &pt in black {
        board.set_cell(pt, Cell::Stone(B)).unwrap();
    }
    for &pt in white {
        board.set_cell(pt, Cell::Stone(W)).unwrap();
    }
    board
}

fn checkerboard(size: usize) -> BoardState {
    let mut board = BoardState::new(size);
    for (row, col) in board.interior_points() {
        let color = if (row + col) % 2 == 0 { B } else { W };
        board.set_cell((row, col), Cell::Stone(color)).unwrap();
    }
    board
}

// =============================================================================
// Basic placement
// =============================================================================

#[test]
fn test_first_moves_on_empty_board() {
    let mut board = BoardState::new(19);
    assert_eq!(evaluate(&mut board, (4, 4), B, true), MoveOutcome::Legal);
    assert_eq!(evaluate(&mut board, (4, 4), W, true), MoveOutcome::Occupied);
    assert_eq!(evaluate(&mut board, (4, 5), W, true), MoveOutcome::Legal);
    assert_eq!(board.history_len(), 2);
}

#[test]
fn test_occupied_regardless_of_color_or_history() {
    let mut board = setup_position(9, &[(5, 5), (5, 6)]);
    for color in [B, W] {
        for commit in [false, true] {
            assert_eq!(evaluate(&mut board, (5, 5), color, commit), MoveOutcome::Occupied);
            assert_eq!(evaluate(&mut board, (5, 6), color, commit), MoveOutcome::Occupied);
        }
    }
    assert_eq!(board.history_len(), 2);
}

#[test]
fn test_probe_leaves_board_unchanged() {
    let mut board = setpos(9, &[(1, 2), (2, 1)], &[(1, 3)]);
    let before = board.cells().to_vec();
    // A capture, a suicide and a plain move, all probed.
    assert_eq!(evaluate(&mut board, (2, 3), B, false), MoveOutcome::Legal);
    assert_eq!(evaluate(&mut board, (1, 1), W, false), MoveOutcome::Suicide);
    assert_eq!(evaluate(&mut board, (7, 7), W, false), MoveOutcome::Legal);
    assert_eq!(board.cells(), before.as_slice());
    assert_eq!(board.history_len(), 0);
}

// =============================================================================
// Capture tests
// =============================================================================

#[test]
fn test_surrounding_move_captures_single_stone() {
    // White at (4,4); Black closes in from all four sides while White plays
    // elsewhere. The fourth Black stone removes the White stone.
    let board = setup_position(
        19,
        &[(3, 4), (4, 4), (5, 4), (15, 15), (4, 3), (15, 16), (4, 5)],
    );
    assert_eq!(board.get((4, 4)), Cell::Empty);
    assert_eq!(board.get((4, 5)), Cell::Stone(B));
    assert_eq!(board.stone_count(W), 2);
    // The snapshot before the capture still holds the White stone.
    assert_eq!(board.snapshot(5).unwrap().get((4, 4)), Cell::Stone(W));
}

#[test]
fn test_capture_beats_suicide() {
    // Black at (1,1) has no liberty of its own, but removes White (1,2).
    let mut board = setpos(19, &[(1, 3), (2, 2)], &[(1, 2), (2, 1)]);
    assert_eq!(evaluate(&mut board, (1, 1), B, true), MoveOutcome::Legal);
    assert_eq!(board.get((1, 1)), Cell::Stone(B));
    assert_eq!(board.get((1, 2)), Cell::Empty);
    assert_eq!(board.get((2, 1)), Cell::Stone(W));
}

#[test]
fn test_capture_large_group() {
    // A White wall along the top edge of a 5x5 board, sealed by Black.
    let mut board = setpos(
        5,
        &[(2, 1), (2, 2), (2, 3), (2, 4), (2, 5)],
        &[(1, 1), (1, 2), (1, 4), (1, 5)],
    );
    assert_eq!(evaluate(&mut board, (1, 3), B, true), MoveOutcome::Legal);
    assert_eq!(board.stone_count(W), 0);
    assert_eq!(board.stone_count(B), 6);
}

// =============================================================================
// Suicide tests
// =============================================================================

#[test]
fn test_single_stone_suicide_rejected() {
    let mut board = setpos(19, &[(3, 4), (5, 4), (4, 3), (4, 5)], &[]);
    let before = board.cells().to_vec();
    assert_eq!(evaluate(&mut board, (4, 4), W, true), MoveOutcome::Suicide);
    assert_eq!(board.cells(), before.as_slice());
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_group_suicide_rejected() {
    // The White stone at (1,1) and a new one at (1,2) would form a group
    // with no liberty.
    let mut board = setpos(9, &[(2, 1), (2, 2), (1, 3)], &[(1, 1)]);
    assert_eq!(evaluate(&mut board, (1, 2), W, true), MoveOutcome::Suicide);
    assert_eq!(board.get((1, 2)), Cell::Empty);
}

// =============================================================================
// Repetition (ko) tests
// =============================================================================

/// Moves leading to a ko at (4,4)/(4,5): White has just played (4,4).
const KO_SETUP: &[Point] = &[
    (3, 4), // B
    (3, 5), // W
    (4, 3), // B
    (5, 5), // W
    (5, 4), // B
    (4, 6), // W
    (10, 10), // B
    (4, 4), // W
];

#[test]
fn test_immediate_ko_recapture_rejected() {
    let mut board = setup_position(19, KO_SETUP);

    // Black takes the ko.
    assert_eq!(evaluate(&mut board, (4, 5), B, true), MoveOutcome::Legal);
    assert_eq!(board.get((4, 4)), Cell::Empty);

    // White retaking recreates the position after White's (4,4).
    let before = board.cells().to_vec();
    assert_eq!(evaluate(&mut board, (4, 4), W, true), MoveOutcome::KoViolation);
    assert_eq!(board.cells(), before.as_slice());
    assert_eq!(board.history_len(), KO_SETUP.len() + 1);
}

#[test]
fn test_ko_retake_after_exchange_elsewhere() {
    let mut board = setup_position(19, KO_SETUP);
    assert!(evaluate(&mut board, (4, 5), B, true).is_legal());

    // A ko threat and its answer change the whole-board position.
    assert!(evaluate(&mut board, (16, 16), W, true).is_legal());
    assert!(evaluate(&mut board, (16, 17), B, true).is_legal());

    assert_eq!(evaluate(&mut board, (4, 4), W, true), MoveOutcome::Legal);
    assert_eq!(board.get((4, 5)), Cell::Empty);
}

#[test]
fn test_repetition_checked_against_all_history() {
    // 2x2 board: after a, d, b, c, a, b only a is empty and filling it would
    // recreate the position after the very first move.
    let mut board = setup_position(2, &[(1, 1), (2, 2), (1, 2), (2, 1), (1, 1), (1, 2)]);
    assert_eq!(probe(&board, (1, 1), B), MoveOutcome::KoViolation);
    assert_eq!(evaluate(&mut board, (1, 1), B, true), MoveOutcome::KoViolation);
    assert!(has_no_legal_move(&board, B));
}

// =============================================================================
// End of game and area counting
// =============================================================================

#[test]
fn test_no_legal_move_on_full_and_empty_boards() {
    let full = checkerboard(19);
    assert!(has_no_legal_move(&full, B));
    assert!(has_no_legal_move(&full, W));

    let empty = BoardState::new(19);
    assert!(!has_no_legal_move(&empty, B));
    assert!(!has_no_legal_move(&empty, W));
}

#[test]
fn test_area_count_on_full_board() {
    let board = checkerboard(19);
    assert_eq!(count_area(&board), (181.0, 180.0));
}

#[test]
fn test_area_count_threshold() {
    // Black owns the left half, White the right, one dame column between.
    let mut board = BoardState::new(9);
    for row in 1..=9 {
        board.set_cell((row, 4), Cell::Stone(B)).unwrap();
        board.set_cell((row, 6), Cell::Stone(W)).unwrap();
    }
    // 18 stones is below the default 41-stone threshold for 9x9.
    assert_eq!(count_area(&board), (9.0, 9.0));

    let (black, white) = count_area_with(&board, 18);
    assert_eq!(black, 9.0 + 27.0 + 4.5);
    assert_eq!(white, 9.0 + 27.0 + 4.5);
}

// =============================================================================
// History and replay
// =============================================================================

#[test]
fn test_push_pop_roundtrip() {
    let mut board = setup_position(9, &[(3, 3), (7, 7), (3, 7)]);
    let before = board.cells().to_vec();
    let len = board.history_len();
    board.push_snapshot().unwrap();
    assert!(board.pop_snapshot(true));
    assert_eq!(board.cells(), before.as_slice());
    assert_eq!(board.history_len(), len);
}

#[test]
fn test_replay_prev_from_first_step() {
    let mut board = setup_position(9, &[(3, 3)]);
    let mut nav = ReplayNavigator::new(&mut board);
    assert_eq!(nav.cursor(), Some(0));

    assert!(nav.prev());
    assert_eq!(nav.cursor(), None);
    assert!(nav.board().interior_points().all(|pt| nav.board().get(pt) == Cell::Empty));

    assert!(!nav.prev());
    assert_eq!(nav.cursor(), None);
    assert_eq!(nav.board().stones_placed(), 0);
}

#[test]
fn test_replay_walks_every_position() {
    let moves = [(3, 3), (7, 7), (3, 7), (7, 3)];
    let mut board = setup_position(9, &moves);
    let mut nav = ReplayNavigator::new(&mut board);
    nav.first();
    for expected in 1..=moves.len() {
        assert!(nav.next());
        assert_eq!(nav.board().stones_placed(), expected);
    }
    assert!(!nav.next());
}

// =============================================================================
// Game session
// =============================================================================

#[test]
fn test_session_game_with_vertices() {
    let mut game = GameSession::new(Config::for_size(9));
    for v in ["D4", "E5", "C5", "D5"] {
        let pt = parse_vertex(v, 9).unwrap();
        assert_eq!(game.play(pt), Ok(MoveOutcome::Legal), "move {v}");
    }
    assert_eq!(game.to_move(), B);
    game.undo().unwrap();
    assert_eq!(game.move_number(), 2);
    assert_eq!(game.to_move(), B);

    let over = game.resign().unwrap();
    assert_eq!(over.winner, W);
    assert_eq!(over.reason, EndReason::Resignation);
    let mut nav = game.review().unwrap();
    assert_eq!(nav.cursor(), Some(1));
    assert!(!nav.next());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Probing any point after any sequence of attempted moves never changes
    /// the grid or the history.
    #[test]
    fn prop_probe_never_mutates(
        moves in prop::collection::vec((1usize..=9, 1usize..=9, any::<bool>()), 0..60),
        target in (0usize..=10, 0usize..=10, any::<bool>()),
    ) {
        let mut board = BoardState::new(9);
        for (row, col, black) in moves {
            let color = if black { B } else { W };
            evaluate(&mut board, (row, col), color, true);
        }
        let cells = board.cells().to_vec();
        let len = board.history_len();

        let (row, col, black) = target;
        let color = if black { B } else { W };
        let probed = evaluate(&mut board, (row, col), color, false);

        prop_assert_eq!(board.cells(), cells.as_slice());
        prop_assert_eq!(board.history_len(), len);
        prop_assert_eq!(probed, probe(&board, (row, col), color));
    }

    /// Committed moves never touch the wall ring and never leave a group
    /// without liberties on the board.
    #[test]
    fn prop_walls_fixed_and_groups_alive(
        moves in prop::collection::vec((0usize..=10, 0usize..=10, any::<bool>()), 0..80),
    ) {
        let mut board = BoardState::new(9);
        for (row, col, black) in moves {
            let color = if black { B } else { W };
            evaluate(&mut board, (row, col), color, true);
        }
        for k in 0..=10 {
            prop_assert_eq!(board.get((0, k)), Cell::Wall);
            prop_assert_eq!(board.get((10, k)), Cell::Wall);
            prop_assert_eq!(board.get((k, 0)), Cell::Wall);
            prop_assert_eq!(board.get((k, 10)), Cell::Wall);
        }
        // Every stone belongs to a group with at least one liberty: an
        // empty neighbor reachable through same-colored stones.
        for pt in board.interior_points() {
            if let Some(color) = board.get(pt).color() {
                prop_assert!(group_has_liberty(&board, pt, color), "dead group at {:?}", pt);
            }
        }
    }
}

fn group_has_liberty(board: &BoardState, start: Point, color: Color) -> bool {
    let mut stack = vec![start];
    let mut seen = vec![start];
    while let Some((r, c)) = stack.pop() {
        for n in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
            match board.get(n) {
                Cell::Empty => return true,
                Cell::Stone(c2) if c2 == color && !seen.contains(&n) => {
                    seen.push(n);
                    stack.push(n);
                }
                _ => {}
            }
        }
    }
    false
}
