//! CORS relay
//!
//! Accepts a request whose path embeds a target URL, re-issues it against
//! that URL and relays the answer with permissive cross-origin headers.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                   CORS RELAY                      │
//!   GET /https://x/y   │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ───────────────────┼─▶│ listener │──▶│   cors   │──▶│    relay     │──┼──▶ https://x/y
//!                      │  └──────────┘   │ trace/id │   │ extract/send │  │
//!                      │                 │ metrics  │   └──────┬───────┘  │
//!   ◀──────────────────┼─────────────────┴──────────┘◀─────────┘          │
//!   status, headers,   │                                /debug/ ─▶ diagnostics
//!   streamed body      └──────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use cors_relay::config::{self, RelayConfig};
use cors_relay::http::{HttpServer, ReqwestUpstream};
use cors_relay::lifecycle::{signals, Shutdown};
use cors_relay::net;
use cors_relay::observability::{init_logging, metrics};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match config::loader::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cors-relay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging);

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        port = config.listener.port,
        pretty = config.logging.pretty,
        diagnostics = config.diagnostics.enabled,
        "starting server"
    );

    let metrics_handle = match metrics::init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Metrics recorder unavailable");
            None
        }
    };

    let upstream = ReqwestUpstream::new(&config.upstream)?;
    let listener = net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(&config, upstream, metrics_handle);
    server.run(listener, server_shutdown).await?;

    Ok(())
}
