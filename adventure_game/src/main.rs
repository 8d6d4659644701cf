//! adventure_game - A party text adventure in the terminal
//!
//! Usage: `adventure_game [world.toml] [--seed N]`

mod app;
mod input;
mod presentation;
mod ui;

use adventure_core::prelude::*;
use anyhow::{Context, Result};
use app::App;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Default, PartialEq)]
struct Args {
    world: Option<PathBuf>,
    seed: Option<u64>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            if arg == "--seed" {
                let value = args.next().context("--seed needs a value")?;
                let seed = value
                    .parse()
                    .with_context(|| format!("invalid seed '{}'", value))?;
                parsed.seed = Some(seed);
            } else {
                parsed.world = Some(PathBuf::from(arg));
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    setup_logging()?;

    let world = match &args.world {
        Some(path) => {
            load_world(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => default_world()?,
    };
    let mut state = GameState::from_world(&world)?;
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, encounters = world.encounters.len(), "campaign starting");

    let mut app = App::new()?;
    let outcome = match run_campaign(&mut state, &world, &mut app, &mut rng) {
        Ok(outcome) => outcome,
        Err(err) => {
            app.restore()?;
            return Err(err.into());
        }
    };

    let message = match &outcome {
        CampaignOutcome::Completed => "The party made it through. Thanks for playing!".to_string(),
        CampaignOutcome::Defeated { encounter } => format!("The party fell in {}.", encounter),
    };
    tracing::info!(?outcome, "campaign finished");
    app.finish(&state, &message)?;
    println!("{}", message);

    Ok(())
}

/// Setup logging to a file; the terminal belongs to the UI
fn setup_logging() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "game.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole run
    std::mem::forget(guard);

    tracing::info!("Log file: {}/game.log", log_dir.display());
    Ok(())
}

fn get_log_directory() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Caches/adventure/logs");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join("adventure").join("logs");
        } else if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".cache").join("adventure").join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local).join("adventure").join("logs");
        }
    }

    std::env::temp_dir().join("adventure").join("logs")
}
