//! Self-play driver - pits two move choosers against each other.
//!
//! Settings come from `selfplay.toml` (or the file given with `--config`);
//! command-line flags override the file. Set `RUST_LOG=debug` to see search
//! statistics for every move.

mod config;
mod runner;

use chess_ai::Strategy;
use clap::Parser;
use config::SelfPlayConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runner::{GameRunner, Outcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Self-play - plays the engine against itself.
#[derive(Parser)]
#[command(name = "self-play")]
#[command(about = "Plays the chess engine against itself")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy for White (random, two-ply, negamax)
    #[arg(long)]
    white: Option<Strategy>,

    /// Strategy for Black (random, two-ply, negamax)
    #[arg(long)]
    black: Option<Strategy>,

    /// Negamax search depth in plies
    #[arg(long)]
    depth: Option<u8>,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    /// Random seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,
}

impl Args {
    fn apply(self, config: &mut SelfPlayConfig) {
        if let Some(white) = self.white {
            config.white = white;
        }
        if let Some(black) = self.black {
            config.black = black;
        }
        if let Some(depth) = self.depth {
            config.search.depth = depth;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.fen.is_some() {
            config.fen = self.fen;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let mut args = Args::parse();

    let config_path = args
        .config
        .take()
        .unwrap_or_else(SelfPlayConfig::default_path);
    let mut config = SelfPlayConfig::load(&config_path)?;
    args.apply(&mut config);

    tracing::info!("Config: {:?}", config_path);
    tracing::info!(
        "White: {}, Black: {}, depth {}, max plies {}",
        config.white,
        config.black,
        config.search.depth,
        config.max_plies
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut runner = GameRunner::new(
        config.white,
        config.black,
        config.search,
        config.max_plies,
        rng,
    );
    let record = match config.fen.as_deref() {
        Some(fen) => runner.play_from_fen(fen)?,
        None => runner.play_game(),
    };

    match record.outcome {
        Outcome::Checkmate(winner) => tracing::info!("Checkmate, {} wins", winner),
        Outcome::Stalemate => tracing::info!("Stalemate"),
        Outcome::Unfinished => tracing::info!("Stopped after {} plies", record.moves.len()),
    }
    tracing::info!("Moves: {}", record.moves.join(" "));
    tracing::info!("Final position: {}", record.final_fen);
    Ok(())
}
