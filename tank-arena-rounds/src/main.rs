//! Tank Arena Rounds
//!
//! Headless runner: plays a seeded game with simulated tanks, logs every
//! event, then replays it to confirm the progression is reproducible.
//!
//! Usage: `tank-arena-rounds [CONFIG.json] [SEED]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tank_arena::{
    TICK_RATE, VERSION,
    game::{
        GameConfig, GameEventData, GameOutcome,
        sim::run_headless,
    },
};

/// Ten minutes of frames
const MAX_FRAMES: u64 = 10 * 60 * TICK_RATE as u64;

const DEFAULT_SEED: u64 = 12345;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(PathBuf::from(path))?,
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("Invalid seed: {}", s))?,
        None => DEFAULT_SEED,
    };

    info!("Tank Arena Rounds v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);
    info!(
        "Rounds to win: {}, max losses: {}, game time: {}s",
        config.rounds_to_win, config.max_losses, config.max_game_time_secs
    );

    demo_game(config, seed)
}

fn load_config(path: PathBuf) -> Result<GameConfig> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = GameConfig::from_json(&text)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Play a game, report it, and verify a replay matches.
fn demo_game(config: GameConfig, seed: u64) -> Result<()> {
    info!("=== Starting Demo Game (seed {}) ===", seed);

    let run = run_headless(config.clone(), seed, MAX_FRAMES)?;

    for event in &run.events {
        match &event.data {
            GameEventData::RoundEnded { round, winner: Some(winner) } => {
                info!("Round {} won by player {}", round, winner.number());
            }
            GameEventData::RoundEnded { round, winner: None } => {
                info!("Round {} drawn", round);
            }
            _ => {}
        }
        tracing::debug!("event: {}", event.to_json()?);
    }

    info!("=== Game Results ===");
    match run.outcome {
        Some(GameOutcome::Winner { player, reason }) => {
            info!("Player {} wins ({:?})", player.number(), reason);
        }
        Some(GameOutcome::Tie) => info!("Perfect tie"),
        Some(GameOutcome::Timeout) => info!("Time ran out, both players lose"),
        None => warn!("Game did not finish within {} frames", MAX_FRAMES),
    }
    info!("Frames simulated: {}", run.frames);
    info!("Final State Hash: {}", hex::encode(run.final_hash));

    info!("=== Verifying Determinism ===");
    let replay = run_headless(config, seed, MAX_FRAMES)?;
    info!("Replay State Hash: {}", hex::encode(replay.final_hash));

    if run.final_hash == replay.final_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
