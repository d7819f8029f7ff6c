//! A single game between two players at one board.
//!
//! The session tracks whose turn it is, the two-step select/confirm flow,
//! undo requests and the ways a game can end. All rule decisions are
//! delegated to [`placement`](crate::placement) and
//! [`territory`](crate::territory).

use std::fmt;

use tracing::{debug, info};

use crate::board::{BoardState, Color, Point};
use crate::config::Config;
use crate::error::{SessionError, UndoDenied};
use crate::placement::{MoveOutcome, evaluate, probe};
use crate::replay::ReplayNavigator;
use crate::territory::{AreaScore, has_no_legal_move};

/// Why a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The loser had no legal move on their turn.
    NoLegalMove,
    Resignation,
    /// The loser's clock ran out.
    Timeout,
    /// The history filled up; the area count decided.
    StepLimit,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::NoLegalMove => write!(f, "no legal move"),
            EndReason::Resignation => write!(f, "resignation"),
            EndReason::Timeout => write!(f, "time expired"),
            EndReason::StepLimit => write!(f, "count at the move limit"),
        }
    }
}

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameOver {
    pub winner: Color,
    pub reason: EndReason,
    /// Area count of the final position.
    pub score: AreaScore,
}

/// What a selection did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The point is legal and now awaits confirmation.
    Pending(Point),
    /// The pending point was selected again and has been played.
    Played(Point),
    /// The point is illegal; any pending selection was dropped.
    Rejected(MoveOutcome),
}

pub struct GameSession {
    config: Config,
    board: BoardState,
    to_move: Color,
    pending: Option<Point>,
    over: Option<GameOver>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl GameSession {
    /// Start a game on an empty board. Black moves first.
    ///
    /// # Panics
    /// If the configured board size is unsupported.
    pub fn new(config: Config) -> Self {
        let board = BoardState::with_config(&config);
        GameSession {
            config,
            board,
            to_move: Color::Black,
            pending: None,
            over: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Point awaiting confirmation, if any.
    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    pub fn outcome(&self) -> Option<&GameOver> {
        self.over.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.over.is_some()
    }

    /// Number of moves currently on the board's history.
    pub fn move_number(&self) -> usize {
        self.board.history_len()
    }

    /// Area count of the current position.
    pub fn score(&self) -> AreaScore {
        AreaScore::compute(&self.board, &self.config)
    }

    /// Legality of `pt` for the side to move, without playing it.
    pub fn probe(&self, pt: Point) -> MoveOutcome {
        probe(&self.board, pt, self.to_move)
    }

    /// Two-step placement: the first selection of a legal point marks it
    /// pending, selecting the same point again plays it.
    pub fn select(&mut self, pt: Point) -> Result<Selection, SessionError> {
        self.ensure_running()?;
        if self.pending == Some(pt) {
            let outcome = self.play(pt)?;
            if outcome.is_legal() {
                return Ok(Selection::Played(pt));
            }
            self.pending = None;
            return Ok(Selection::Rejected(outcome));
        }
        let outcome = self.probe(pt);
        if outcome.is_legal() {
            self.pending = Some(pt);
            Ok(Selection::Pending(pt))
        } else {
            self.pending = None;
            Ok(Selection::Rejected(outcome))
        }
    }

    /// Play `pt` for the side to move.
    ///
    /// Illegal moves are reported through the returned outcome and leave the
    /// session unchanged. After a legal move the turn passes; if the new side
    /// to move has no legal move the game ends in favour of the mover.
    pub fn play(&mut self, pt: Point) -> Result<MoveOutcome, SessionError> {
        self.ensure_running()?;
        if self.board.history_is_full() {
            return Err(SessionError::HistoryFull(self.board.history_len()));
        }
        let color = self.to_move;
        let outcome = evaluate(&mut self.board, pt, color, true);
        if !outcome.is_legal() {
            debug!(?pt, %color, %outcome, "move rejected");
            return Ok(outcome);
        }
        self.pending = None;
        self.to_move = color.opposite();
        if has_no_legal_move(&self.board, self.to_move) {
            self.finish(color, EndReason::NoLegalMove);
        }
        Ok(outcome)
    }

    /// Take back the last full round (the opponent's reply and the requesting
    /// player's own move). The side to move keeps the turn.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.ensure_running()?;
        let color = self.to_move;
        if self.board.history_len() < 2 {
            return Err(SessionError::UndoUnavailable(UndoDenied::TooFewMoves));
        }
        if !self.board.spend_undo(color) {
            return Err(SessionError::UndoUnavailable(UndoDenied::BudgetExhausted(
                color,
            )));
        }
        self.board.pop_snapshot(false);
        self.board.pop_snapshot(false);
        match self.board.history_top() {
            Some(top) => {
                self.board.restore_snapshot(top);
            }
            None => self.board.clear_interior(),
        }
        self.pending = None;
        info!(%color, remaining = self.board.undo_remaining(color), "round taken back");
        Ok(())
    }

    /// The side to move resigns.
    pub fn resign(&mut self) -> Result<GameOver, SessionError> {
        self.ensure_running()?;
        Ok(self.finish(self.to_move.opposite(), EndReason::Resignation))
    }

    /// The clock of the side to move ran out. Once the game is over this
    /// returns the existing result unchanged.
    pub fn time_expired(&mut self) -> GameOver {
        match self.over {
            Some(over) => over,
            None => self.finish(self.to_move.opposite(), EndReason::Timeout),
        }
    }

    /// Stop a game whose history is full. The leader on the area count
    /// (komi included) wins; an exact tie goes to White.
    pub fn stop_at_step_limit(&mut self) -> Result<GameOver, SessionError> {
        self.ensure_running()?;
        let winner = self.score().leader().unwrap_or(Color::White);
        Ok(self.finish(winner, EndReason::StepLimit))
    }

    /// Enter post-game review at the final position.
    pub fn review(&mut self) -> Result<ReplayNavigator<'_>, SessionError> {
        if self.over.is_none() {
            return Err(SessionError::NotOver);
        }
        Ok(ReplayNavigator::new(&mut self.board))
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.over.is_some() {
            return Err(SessionError::GameOver);
        }
        Ok(())
    }

    fn finish(&mut self, winner: Color, reason: EndReason) -> GameOver {
        let over = GameOver {
            winner,
            reason,
            score: self.score(),
        };
        self.pending = None;
        self.over = Some(over);
        info!(%winner, %reason, score = %over.score, moves = self.move_number(), "game over");
        over
    }
}
