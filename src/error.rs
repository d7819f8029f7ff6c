use crate::board::{Color, Point};

/// Contract violations on the board itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("point {0:?} is outside the board buffer")]
    OutOfBounds(Point),

    #[error("point {0:?} is a wall cell")]
    WallCell(Point),

    #[error("history is full ({0} steps recorded)")]
    HistoryFull(usize),
}

/// Errors reported by a game session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("game is over")]
    GameOver,

    #[error("game is still in progress")]
    NotOver,

    #[error("cannot undo: {0}")]
    UndoUnavailable(UndoDenied),

    #[error("history is full ({0} steps recorded)")]
    HistoryFull(usize),
}

/// Why an undo request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UndoDenied {
    #[error("not enough moves played")]
    TooFewMoves,

    #[error("{0} has no undo left")]
    BudgetExhausted(Color),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
