//! Weiqi: a rules engine for the game of Go.
//!
//! This crate validates and applies moves, resolves captures, rejects suicide
//! and any repetition of an earlier whole-board position, keeps a history of
//! every position for undo and post-game review, and detects the end of the
//! game when a player has no legal move left.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and rule defaults
//! - [`config`] - Rule parameters, loadable from TOML
//! - [`board`] - Padded grid, history stack and undo budget
//! - [`placement`] - Move legality, captures and repetition checks
//! - [`territory`] - No-legal-move detection and area counting
//! - [`replay`] - Stepping through a finished game
//! - [`session`] - Turn order, undo, resignation and time-out
//! - [`console`] - Text command loop used by the binary
//!
//! ## Example
//!
//! ```
//! use weiqi::board::{BoardState, Cell, Color};
//! use weiqi::placement::{MoveOutcome, evaluate};
//!
//! let mut board = BoardState::new(19);
//! assert_eq!(evaluate(&mut board, (4, 4), Color::Black, true), MoveOutcome::Legal);
//! assert_eq!(evaluate(&mut board, (4, 4), Color::White, true), MoveOutcome::Occupied);
//! assert_eq!(board.get((4, 4)), Cell::Stone(Color::Black));
//! assert_eq!(board.history_len(), 1);
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod placement;
pub mod replay;
pub mod session;
pub mod territory;
