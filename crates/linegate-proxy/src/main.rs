// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! linegate translation proxy CLI.
//!
//! # Usage
//!
//! ```bash
//! # Listen on 8086, forward to the real server on 8886
//! linegate-proxy
//!
//! # Custom addresses, log every translated request
//! linegate-proxy --port 9086 --server influx.internal:8086 --verbose
//! ```

use clap::Parser;
use linegate_proxy::{routes, AppState, ProxyConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Legacy write-format translation proxy
#[derive(Parser, Debug)]
#[command(name = "linegate-proxy")]
#[command(about = "Translates legacy JSON batch writes into line-protocol writes")]
#[command(version)]
struct Args {
    /// HTTP listen port
    #[arg(short, long, default_value = "8086")]
    port: u16,

    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Hostname:Port of the real downstream server
    #[arg(short, long, default_value = "localhost:8886")]
    server: String,

    /// Show every translated request
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ProxyConfig {
        server: args.server,
        verbose: args.verbose,
    };
    let state = Arc::new(AppState::new(&config)?);
    let app = routes::app(state);

    let addr = format!("{}:{}", args.bind, args.port);
    info!("linegate proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("Listening on http://{}", addr);
    info!("Downstream server: {}", config.server);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
