//! Motorpool server binary.
//!
//! Parses configuration from flags and environment, initializes tracing,
//! wires the in-memory store through the catalog service into the network
//! module, and serves until SIGINT or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use motorpool_server::network::{NetworkConfig, NetworkModule};
use motorpool_server::{FleetService, MemoryStore};

#[derive(Debug, Parser)]
#[command(name = "motorpool-server", about = "In-memory vehicle catalog API")]
struct Args {
    /// Bind address.
    #[arg(long, env = "MOTORPOOL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on. 0 means OS-assigned.
    #[arg(long, env = "MOTORPOOL_PORT", default_value_t = 8080)]
    port: u16,

    /// Comma-separated list of allowed CORS origins.
    #[arg(long, env = "MOTORPOOL_CORS_ORIGINS", default_value = "*", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "MOTORPOOL_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Emit logs as JSON instead of human-readable lines.
    #[arg(long, env = "MOTORPOOL_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = NetworkConfig {
        host: args.host,
        port: args.port,
        cors_origins: args.cors_origins,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        ..NetworkConfig::default()
    };

    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(FleetService::new(store));

    let mut module = NetworkModule::new(config, service);
    let port = module.start().await?;
    info!(port, "Motorpool server starting");

    module.serve(shutdown_signal()).await
}
