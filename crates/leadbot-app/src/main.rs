//! Leadbot application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Install the tracing subscriber
//! 3. Build the session manager and mailer
//! 4. Serve the HTTP API, or chat on the terminal with `--interactive`

mod cli;
mod repl;

use clap::Parser;

use leadbot_api::state::AppState;
use leadbot_core::config::LeadbotConfig;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let config_file = args.resolve_config_path();
    let loaded = LeadbotConfig::load(&config_file);

    // RUST_LOG wins, then --log-level, then the config file.
    let level = args
        .resolve_log_level()
        .or_else(|| loaded.as_ref().ok().map(|c| c.general.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Leadbot v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %config_file.display(),
                error = %e,
                "Failed to load config. Using defaults."
            );
            LeadbotConfig::default()
        }
    };
    config.general.log_level = level;
    config.server.port = args.resolve_port(config.server.port);

    let state = AppState::from_config(config.clone())?;

    if args.interactive {
        repl::run(state.sessions.clone(), state.mailer.clone()).await?;
        return Ok(());
    }

    if let Err(e) = leadbot_api::start_server(&config, state).await {
        tracing::error!(error = %e, "API server stopped");
        tracing::error!("Try: LEADBOT_PORT={} leadbot", config.server.port.saturating_add(1));
        return Err(e.into());
    }

    Ok(())
}
