//! BottleFlip X — crash-style bottle-flip wagering game.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the game, and serves the web UI until shutdown.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use bottleflip::config::AppConfig;
use bottleflip::dashboard;
use bottleflip::game::Game;

const BANNER: &str = r#"
 ____        _   _   _      _____ _ _       __  __
| __ )  ___ | |_| |_| | ___|  ___| (_)_ __  \ \/ /
|  _ \ / _ \| __| __| |/ _ \ |_  | | | '_ \  \  /
| |_) | (_) | |_| |_| |  __/  _| | | | |_) | /  \
|____/ \___/ \__|\__|_|\___|_|   |_|_| .__/ /_/\_\
                                     |_|
  Dakuf: BottleFlip X — flip it, ride it, cash out
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (built-in defaults when config.toml is absent)
    let cfg = AppConfig::load_or_default("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        starting_bonus = %cfg.game.starting_bonus,
        min_stake = %cfg.game.min_stake,
        max_stake = %cfg.game.max_stake,
        min_recharge = %cfg.payment.min_recharge,
        "BottleFlip starting up"
    );

    let game = Arc::new(Game::new(cfg.game.clone(), cfg.payment.clone()));

    if cfg.dashboard.enabled {
        dashboard::spawn_dashboard(Arc::clone(&game), cfg.dashboard.port)?;
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received.");

    let snap = game.snapshot().await;
    info!(wallet = %snap.wallet, "BottleFlip shut down cleanly.");

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bottleflip=info"));

    let json_logging = std::env::var("BOTTLEFLIP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
