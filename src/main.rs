//! Claude relay
//!
//! Forwards JSON requests from a trusted frontend to the Anthropic Messages
//! API with a server-held API key.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                     RELAY                        │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ──────────────────┼─▶│  origin  │──▶│ handlers │──▶│   upstream   │──┼──▶ Anthropic API
//!                     │  │   gate   │   │          │   │ (key inject) │  │
//!   Client Response   │  └──────────┘   └──────────┘   └──────┬───────┘  │
//!   ◀─────────────────┼──────────── response envelopes ◀──────┘          │
//!                     │                                                  │
//!                     │   config (file + env)   logging   lifecycle      │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use claude_relay::config::load_config;
use claude_relay::lifecycle::signals::spawn_signal_listener;
use claude_relay::observability::logging;
use claude_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "claude-relay", version)]
#[command(about = "Relay browser requests to the Anthropic Messages API", long_about = None)]
struct Args {
    /// Optional TOML config file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Print the effective configuration (secret excluded) and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.logging.filter);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "claude-relay starting");

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
