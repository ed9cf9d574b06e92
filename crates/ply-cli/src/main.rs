//! `ply` - play, replay and perft-test chess games in the terminal.

mod command;
mod config;
mod render;
mod session;
mod summary;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use config::PlyConfig;
use ply_engine::{perft, perft_divide, GameState};
use render::{render_board, render_status};
use session::Session;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use summary::ReplaySummary;
use tracing::Level;

#[derive(Parser)]
#[command(name = "ply")]
#[command(about = "Chess rules engine in the terminal")]
struct Cli {
    /// Path to the configuration file (default: ply.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on stdin/stdout
    Play,
    /// Play a sequence of coordinate moves and print the final position
    Replay {
        /// Moves such as e2e4 e7e5 g1f3
        moves: Vec<String>,
        /// Print a JSON summary instead of the board
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the move tree from the initial position
    ///
    /// Each promoting move is counted once (as a queen), so totals match
    /// published perft tables only at depths no pawn can promote within.
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn log_level(verbose: u8, config: &PlyConfig) -> anyhow::Result<Level> {
    Ok(match verbose {
        0 => config.level()?,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    })
}

fn replay(config: &PlyConfig, moves: &[String], json: bool) -> anyhow::Result<()> {
    let mut game = GameState::new();
    for (i, text) in moves.iter().enumerate() {
        game.play(text)
            .with_context(|| format!("move {} ({})", i + 1, text))?;
    }

    if json {
        let summary = ReplaySummary::from_game(&game);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_board(game.board(), config));
        println!("{}", render_status(&game));
    }
    Ok(())
}

fn run_perft(depth: u32, divide: bool) {
    let mut game = GameState::new();
    let start = Instant::now();
    let nodes = if divide {
        let results = perft_divide(&mut game, depth);
        for (mv, count) in &results {
            println!("{}: {}", mv, count);
        }
        results.iter().map(|(_, n)| n).sum::<u64>()
    } else {
        perft(&mut game, depth)
    };
    let elapsed = start.elapsed();
    println!();
    println!("Nodes searched: {}", nodes);
    tracing::info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = PlyConfig::load(cli.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, &config)?)
        .with_writer(io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Play => {
            let mut session = Session::new(io::stdin().lock(), io::stdout(), config);
            session.run()?;
        }
        Commands::Replay { moves, json } => replay(&config, &moves, json)?,
        Commands::Perft { depth, divide } => run_perft(depth, divide),
    }
    Ok(())
}
