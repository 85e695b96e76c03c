use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use laserbot::config::AgentConfig;
use laserbot::metrics::AgentMetrics;
use laserbot::net::http::HttpTransport;
use laserbot::net::session::GameSession;

/// Autonomous laser duel player
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Game server host
    #[arg(long)]
    host: Option<String>,
    /// Game server port
    #[arg(long)]
    port: Option<u16>,
    /// Player moniker announced on join
    #[arg(long)]
    name: Option<String>,
    /// Id of the game to join
    #[arg(long)]
    game: Option<String>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Command-line flags take precedence over environment and defaults
    fn apply(self, config: &mut AgentConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(game) = self.game {
            config.game = Some(game);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Laserbot v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = AgentConfig::load_or_default();
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: {}:{}, name={}, game={}",
        config.host,
        config.port,
        config.name,
        config.game.as_deref().unwrap_or_default()
    );

    let metrics = Arc::new(AgentMetrics::new());
    let transport = HttpTransport::new(&config).context("failed to build HTTP client")?;
    let mut session = GameSession::new(transport, config.name.clone(), metrics.clone());

    // Shutdown signal handler
    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    let outcome = tokio::select! {
        result = session.run() => Some(result),
        _ = shutdown => None,
    };

    info!("Agent stats: {}", metrics.summary());

    match outcome {
        Some(result) => {
            let summary = match result {
                Ok(summary) => summary,
                Err(e) => {
                    error!("Game session failed: {}", e);
                    return Err(e).context("game session failed");
                }
            };
            info!(
                "Finished after {} turns with status '{}'",
                summary.turns, summary.final_status
            );
        }
        None => info!("Left game before it finished"),
    }

    Ok(())
}
