//! miniPCB API relay.
//!
//! ```text
//!   browser ──▶ /api/health          ──▶ {"ok":true}
//!           ──▶ /api/models          ──▶ GET  {upstream}/v1/models
//!           ──▶ /api/{review,suggest,chat,create}
//!                                    ──▶ POST {upstream}/v1/responses
//!           ──▶ /api/part-request    ──▶ POST {mail}/emails
//! ```
//!
//! Configuration comes from the environment (`OPENAI_API_KEY`, `PROXY_KEY`,
//! `RESEND_API_KEY`, `REQUEST_TO_EMAIL`, `REQUEST_FROM_EMAIL`, `PORT`) with an
//! optional TOML file underneath.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use minipcb_relay::config::load_config;
use minipcb_relay::lifecycle::{signals, Shutdown};
use minipcb_relay::observability::{logging, metrics};
use minipcb_relay::HttpServer;

#[derive(Parser)]
#[command(name = "minipcb-relay")]
#[command(about = "API relay for the miniPCB catalog", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT and the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref(), |name| std::env::var(name).ok())?;
    if let Some(port) = cli.port {
        config.listener.set_port(port);
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("minipcb-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        proxy_key = config.auth.proxy_key.is_some(),
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    signals::wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
