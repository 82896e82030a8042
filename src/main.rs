use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_arcade::game::{GameConfig, GameEngine};
use snake_arcade::modes::HumanMode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "26")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "20")]
    height: usize,

    /// File that receives log output (filtered by RUST_LOG)
    #[arg(long, default_value = "snake_arcade.log")]
    log_file: PathBuf,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_file)?;

    let config = GameConfig::new(cli.width, cli.height);
    config.validate().context("Invalid grid size")?;

    info!(width = cli.width, height = cli.height, seed = ?cli.seed, "Starting Snake Arcade");

    let result = match cli.seed {
        Some(seed) => {
            let engine = GameEngine::with_rng(config, StdRng::seed_from_u64(seed));
            let mut mode = HumanMode::with_engine(engine);
            mode.run().await
        }
        None => {
            let mut mode = HumanMode::new(config);
            mode.run().await
        }
    };
    result.context("Game session failed")?;

    Ok(())
}

/// Log to a file so output doesn't interfere with the TUI
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
