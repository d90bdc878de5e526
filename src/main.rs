//! Device validator host.
//!
//! Serves HTTP, forwards every request to one upstream origin, and runs the
//! device validator middleware in front of the forwarder.
//!
//! ```text
//!     Client ──▶ request id ─▶ trace ─▶ timeout ─▶ device validator ─▶ upstream ──▶ Origin
//!                                                   │ classify + annotate
//!     Client ◀── (HTML for mobile: script injected, Content-Length fixed) ◀─────────── Origin
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use device_validator::config::{read_config, validate_config, ConfigError, ValidatorConfig};
use device_validator::http::HttpServer;
use device_validator::lifecycle::{wait_for_signal, Shutdown};
use device_validator::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "device-validator")]
#[command(about = "Mobile User-Agent validator and touch-point script injector", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override upstream.url
    #[arg(short, long)]
    upstream: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ValidatorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ValidatorConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(upstream) = self.upstream {
            config.upstream.url = upstream;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        validator_enabled = config.validator.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "device-validator v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
