//! Ludo self-play simulator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ludo::{
    config::GameConfig,
    engine::Strategy,
    simulation::{DEFAULT_MAX_TURNS, run_simulations},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ludo",
    version,
    about = "Plays Ludo games between automated players and reports the results"
)]
struct Cli {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Number of seats (2..=4). Overrides the config file.
    #[arg(short, long)]
    players: Option<usize>,

    /// Base seed. A random one is drawn when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Strategy per seat, comma separated. A single value applies to every seat.
    #[arg(long = "strategy", value_delimiter = ',', default_value = "heuristic")]
    strategies: Vec<Strategy>,

    /// TOML file with players, palette and names.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Roll cap per game.
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(players) = cli.players {
        config = config.with_players(players);
        config
            .validate()
            .context("--players does not fit the configured palette and names")?;
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(games = cli.games, seed, "Running games");

    let start = std::time::Instant::now();
    let report = run_simulations(&config, &cli.strategies, cli.games, seed, cli.max_turns)?;
    let duration = start.elapsed();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
        println!("Simulation took: {:?}", duration);
    }
    Ok(())
}
