//! Move validation and execution.
//!
//! A move is resolved on a working copy of the grid in a fixed order:
//! occupancy, captures of adjacent enemy groups, suicide (only when nothing
//! was captured), then a whole-board repetition check against every recorded
//! snapshot. The live grid is only written once all checks have passed, so a
//! rejected or probed move never leaves a trace.

use std::fmt;

use tracing::debug;

use crate::board::{BoardState, Cell, Color, Point, neighbors};

/// Result of attempting to play a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Legal,
    /// Point is not empty
    Occupied,
    /// Move recreates an earlier whole-board position
    KoViolation,
    /// Move would leave its own group without liberties and captures nothing
    Suicide,
    /// Point lies outside the playable area
    OutOfBounds,
}

impl MoveOutcome {
    pub fn is_legal(self) -> bool {
        self == MoveOutcome::Legal
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Legal => write!(f, "legal"),
            MoveOutcome::Occupied => write!(f, "point not empty"),
            MoveOutcome::KoViolation => write!(f, "retakes ko"),
            MoveOutcome::Suicide => write!(f, "suicide"),
            MoveOutcome::OutOfBounds => write!(f, "off the board"),
        }
    }
}

/// Result of flooding a group.
enum Liberty {
    Found,
    /// No liberty; the group had this many stones.
    None(usize),
}

/// Evaluate placing a `color` stone at `pt`, and play it if `commit` is set.
///
/// With `commit == false` the board is left exactly as it was; this is the
/// legality probe. With `commit == true` a legal move replaces the live grid
/// and pushes a snapshot; an illegal one changes nothing.
///
/// # Panics
/// If `commit` is set, the move is legal and the history stack is already at
/// capacity. Callers that cannot size the history up front should check
/// [`BoardState::history_is_full`] first.
pub fn evaluate(board: &mut BoardState, pt: Point, color: Color, commit: bool) -> MoveOutcome {
    let work = match resolve(board, pt, color) {
        Ok(work) => work,
        Err(outcome) => return outcome,
    };
    if commit {
        if let Err(err) = board.commit(work) {
            panic!("cannot record move at {pt:?}: {err}");
        }
        debug!(?pt, %color, step = board.history_len(), "move committed");
    }
    MoveOutcome::Legal
}

/// Legality probe that only needs shared access to the board.
pub fn probe(board: &BoardState, pt: Point, color: Color) -> MoveOutcome {
    match resolve(board, pt, color) {
        Ok(_) => MoveOutcome::Legal,
        Err(outcome) => outcome,
    }
}

/// Whether `color` may play at `pt`.
pub fn is_legal(board: &BoardState, pt: Point, color: Color) -> bool {
    probe(board, pt, color).is_legal()
}

/// Every point where `color` has a legal move.
pub fn legal_moves(board: &BoardState, color: Color) -> Vec<Point> {
    board
        .interior_points()
        .filter(|&pt| is_legal(board, pt, color))
        .collect()
}

/// Apply the move to a copy of the grid, returning the resulting grid or the
/// reason it is illegal.
fn resolve(board: &BoardState, pt: Point, color: Color) -> Result<Vec<Cell>, MoveOutcome> {
    if !board.is_interior(pt) {
        return Err(MoveOutcome::OutOfBounds);
    }
    let at = board.idx(pt);
    if board.cells()[at] != Cell::Empty {
        return Err(MoveOutcome::Occupied);
    }

    let width = board.width();
    let mut work = board.cells().to_vec();
    work[at] = Cell::Stone(color);

    let enemy = Cell::Stone(color.opposite());
    let mut captured = 0;
    for n in neighbors(at, width) {
        if work[n] != enemy {
            continue;
        }
        if let Liberty::None(stones) = liberty_search(&mut work, width, n, true) {
            captured += stones;
        }
    }

    if captured == 0 {
        if let Liberty::None(_) = liberty_search(&mut work, width, at, false) {
            debug!(?pt, %color, "rejected: suicide");
            return Err(MoveOutcome::Suicide);
        }
    } else {
        debug!(?pt, %color, captured, "captures");
    }

    if board.history().iter().any(|snap| snap.cells() == work.as_slice()) {
        debug!(?pt, %color, "rejected: repeats an earlier position");
        return Err(MoveOutcome::KoViolation);
    }

    Ok(work)
}

/// Flood the group containing `start`.
///
/// Stops at the first empty neighbor. If the group has no liberty and
/// `remove` is set, all of its stones are cleared.
fn liberty_search(cells: &mut [Cell], width: usize, start: usize, remove: bool) -> Liberty {
    let color = cells[start];
    let mut visited = vec![false; cells.len()];
    let mut group = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(i) = stack.pop() {
        group.push(i);
        for n in neighbors(i, width) {
            match cells[n] {
                Cell::Empty => return Liberty::Found,
                c if c == color && !visited[n] => {
                    visited[n] = true;
                    stack.push(n);
                }
                _ => {}
            }
        }
    }

    if remove {
        for &i in &group {
            cells[i] = Cell::Empty;
        }
    }
    Liberty::None(group.len())
}
