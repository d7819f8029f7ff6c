//! Line-oriented text console for driving a game session.
//!
//! The protocol follows the shape of GTP: each line is an optional numeric
//! id followed by a command and its arguments; responses start with `=` on
//! success or `?` on failure, echo the id and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `help` / `list_commands` - List all supported commands
//! - `name`, `version` - Engine identification
//! - `showboard` - Print the current board
//! - `play <vertex>` - Play a move for the side to move
//! - `select <vertex>` - Select a point; selecting it again plays it
//! - `legal <vertex>` - Probe a move without playing it
//! - `undo` - Take back the last full round
//! - `resign` - The side to move resigns
//! - `timeout` - The clock of the side to move expired
//! - `score` - Area count of the current position, or the final one once
//!   the game is over
//! - `review next|prev|first|last|<move>` - Step through a finished game
//! - `clear_board` - Start a new game with the same rules
//! - `quit` - Exit the loop

use std::io::{self, BufRead, Write};

use crate::board::{Point, parse_vertex, vertex_name};
use crate::config::Config;
use crate::session::{GameSession, Selection};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "help",
    "legal",
    "list_commands",
    "name",
    "play",
    "quit",
    "resign",
    "review",
    "score",
    "select",
    "showboard",
    "timeout",
    "undo",
    "version",
];

/// Console state.
pub struct Console {
    game: GameSession,
    /// Review cursor kept between commands (`None` = empty board).
    review: Option<Option<usize>>,
}

impl Console {
    pub fn new(config: Config) -> Self {
        Self {
            game: GameSession::new(config),
            review: None,
        }
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(out, "{prefix}{id_str} {message}\n")?;
            out.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn vertex(&self, args: &[&str]) -> Result<Point, String> {
        let arg = args.first().ok_or("missing argument")?;
        parse_vertex(arg, self.game.board().size()).ok_or_else(|| format!("invalid vertex {arg}"))
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match self.dispatch(command, args) {
            Ok(response) => (true, response),
            Err(message) => (false, message),
        }
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        let size = self.game.board().size();
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "help" | "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "quit" => Ok(String::new()),

            "showboard" => Ok(format!(
                "\n{}{} to move, move {}",
                self.game.board(),
                self.game.to_move(),
                self.game.move_number()
            )),

            "clear_board" => {
                self.game = GameSession::new(self.game.config().clone());
                self.review = None;
                Ok(String::new())
            }

            "legal" => {
                let pt = self.vertex(args)?;
                Ok(self.game.probe(pt).to_string())
            }

            "play" => {
                let pt = self.vertex(args)?;
                let outcome = self.game.play(pt).map_err(|e| e.to_string())?;
                if !outcome.is_legal() {
                    return Err(format!("illegal move: {outcome}"));
                }
                Ok(self.status())
            }

            "select" => {
                let pt = self.vertex(args)?;
                match self.game.select(pt).map_err(|e| e.to_string())? {
                    Selection::Pending(pt) => {
                        Ok(format!("{} pending, select again to play", vertex_name(pt, size)))
                    }
                    Selection::Played(_) => Ok(self.status()),
                    Selection::Rejected(outcome) => Err(format!("illegal move: {outcome}")),
                }
            }

            "undo" => {
                self.game.undo().map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            "resign" => {
                let over = self.game.resign().map_err(|e| e.to_string())?;
                Ok(format!("{} wins by {}", over.winner, over.reason))
            }

            "timeout" => {
                let over = self.game.time_expired();
                Ok(format!("{} wins by {}", over.winner, over.reason))
            }

            "score" => Ok(match self.game.outcome() {
                Some(over) => over.score.to_string(),
                None => self.game.score().to_string(),
            }),

            "review" => self.review(args),

            _ => Err(format!("unknown command: {command}")),
        }
    }

    /// Response after a successful move: empty, or the result if the game
    /// just ended.
    fn status(&self) -> String {
        match self.game.outcome() {
            Some(over) => format!("{} wins by {}", over.winner, over.reason),
            None => String::new(),
        }
    }

    fn review(&mut self, args: &[&str]) -> Result<String, String> {
        let saved = self.review;
        let mut nav = self.game.review().map_err(|e| e.to_string())?;
        if let Some(cursor) = saved {
            nav.jump(cursor);
        }
        let moved = match args.first().copied() {
            Some("next") => nav.next(),
            Some("prev") => nav.prev(),
            Some("first") => {
                nav.first();
                true
            }
            Some("last") | None => {
                nav.last();
                true
            }
            Some(n) => {
                let n: usize = n.parse().map_err(|_| format!("invalid step {n}"))?;
                nav.jump(n.checked_sub(1))
            }
        };
        let cursor = nav.cursor();
        let shown = format!("\n{}", nav.board());
        // Leave the final position on the board between review commands.
        nav.last();
        self.review = Some(cursor);
        if !moved {
            return Err("no such step".to_string());
        }
        let step = cursor.map_or(0, |c| c + 1);
        Ok(format!("move {step}{shown}"))
    }
}
