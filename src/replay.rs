//! Post-game review: stepping through recorded positions.
//!
//! The navigator writes history snapshots straight into the live grid. It
//! never validates anything; every recorded position was legal when it was
//! played.

use tracing::trace;

use crate::board::BoardState;

/// Cursor over the history stack of a finished game.
///
/// `None` denotes the empty board before the first move, which is not itself
/// a recorded snapshot.
pub struct ReplayNavigator<'a> {
    board: &'a mut BoardState,
    cursor: Option<usize>,
}

impl<'a> ReplayNavigator<'a> {
    /// Enter review at the final position.
    pub fn new(board: &'a mut BoardState) -> Self {
        let mut nav = ReplayNavigator {
            board,
            cursor: None,
        };
        nav.last();
        nav
    }

    /// Current step, `None` at the initial empty board.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Index of the last recorded step.
    pub fn max_step(&self) -> Option<usize> {
        self.board.history_top()
    }

    pub fn board(&self) -> &BoardState {
        &*self.board
    }

    pub fn has_next(&self) -> bool {
        match (self.cursor, self.max_step()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(c), Some(top)) => c < top,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.cursor.is_some()
    }

    /// Advance one step. Returns `false` at the last step.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        let step = self.cursor.map_or(0, |c| c + 1);
        self.show(Some(step));
        true
    }

    /// Go back one step. Stepping back from the first move clears the board.
    /// Returns `false` at the initial empty board.
    pub fn prev(&mut self) -> bool {
        match self.cursor {
            None => false,
            Some(c) => {
                self.show(c.checked_sub(1));
                true
            }
        }
    }

    /// Seek directly to `step`. Returns `false` if it lies past the last
    /// recorded step.
    pub fn jump(&mut self, step: Option<usize>) -> bool {
        if let Some(s) = step {
            if self.max_step().is_none_or(|top| s > top) {
                return false;
            }
        }
        self.show(step);
        true
    }

    /// Rewind to the empty board.
    pub fn first(&mut self) {
        self.show(None);
    }

    /// Seek to the final position (or the empty board if nothing was played).
    pub fn last(&mut self) {
        let top = self.max_step();
        self.show(top);
    }

    fn show(&mut self, step: Option<usize>) {
        match step {
            Some(s) => {
                self.board.restore_snapshot(s);
            }
            None => self.board.clear_interior(),
        }
        self.cursor = step;
        trace!(?step, "replay cursor moved");
    }
}
