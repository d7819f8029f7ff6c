//! Weiqi: a Go rules engine.
//!
//! ## Usage
//!
//! - `weiqi` - Start the text console on stdin/stdout
//! - `weiqi console` - Same as above
//! - `weiqi demo` - Play a random game and review it

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weiqi::board::{Cell, vertex_name};
use weiqi::config::{Config, RulesFile};
use weiqi::console::Console;
use weiqi::error::SessionError;
use weiqi::placement::legal_moves;
use weiqi::session::GameSession;

/// Weiqi: a Go rules engine
#[derive(Parser)]
#[command(name = "weiqi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rules file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Board size, overrides the rules file
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Komi, overrides the rules file
    #[arg(long, global = true)]
    komi: Option<f32>,

    /// Undo requests per player, overrides the rules file
    #[arg(long, global = true)]
    undo: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin and answer on stdout
    Console,
    /// Play a random game to the end, then step back through it
    Demo {
        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Console) | None => {
            let mut console = Console::new(config);
            console
                .run(io::stdin().lock(), io::stdout())
                .context("console I/O failed")?;
        }
        Some(Commands::Demo { seed }) => run_demo(config, seed)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut rules = match &cli.config {
        Some(path) => RulesFile::read(path)?,
        None => RulesFile::default(),
    };
    rules.size = cli.size.or(rules.size);
    rules.komi = cli.komi.or(rules.komi);
    rules.undo_budget = cli.undo.or(rules.undo_budget);
    let config = Config::from(rules);
    config.validate()?;
    info!(?config, "rules loaded");
    Ok(config)
}

fn run_demo(config: Config, seed: u64) -> Result<()> {
    println!("Weiqi: random game on a {0}x{0} board\n", config.size);

    let size = config.size;
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut game = GameSession::new(config);

    while !game.is_over() {
        let moves = legal_moves(game.board(), game.to_move());
        if moves.is_empty() {
            bail!("{} has no legal move but the game is not over", game.to_move());
        }
        let pt = moves[rng.usize(..moves.len())];
        match game.play(pt) {
            Ok(_) => {}
            Err(SessionError::HistoryFull(n)) => {
                warn!(steps = n, "history full, deciding the game by count");
                game.stop_at_step_limit()?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("{}", game.board());
    if let Some(over) = game.outcome() {
        println!(
            "{} wins by {} after {} moves",
            over.winner,
            over.reason,
            game.move_number()
        );
        println!("Score: {}\n", over.score);
    }

    let mut nav = game.review()?;
    let halfway = nav.max_step().map(|top| top / 2);
    nav.jump(halfway);
    println!("=== Review: move {} ===", halfway.map_or(0, |s| s + 1));
    println!("{}", nav.board());

    // Recover the opening moves by diffing consecutive positions.
    nav.first();
    let mut before: Vec<Cell> = nav
        .board()
        .interior_points()
        .map(|pt| nav.board().get(pt))
        .collect();
    let mut record = Vec::new();
    while record.len() < 10 && nav.next() {
        let board = nav.board();
        let played = board
            .interior_points()
            .zip(&before)
            .find(|&(pt, &old)| old == Cell::Empty && board.get(pt) != Cell::Empty);
        if let Some((pt, _)) = played {
            record.push(vertex_name(pt, size));
        }
        before = board.interior_points().map(|pt| board.get(pt)).collect();
    }
    println!("Opening: {}", record.join(" "));
    Ok(())
}
