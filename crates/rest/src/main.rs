// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tmuxd-restd: the REST server binary.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tmuxd_adapters::TmuxAdapter;
use tmuxd_api::ApiHandle;
use tmuxd_manager::{Config, Manager};
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Best-effort periodic reconciliation, disabled with `--reconcile-interval
/// 0`. Read-path reconciliation is always correct on its own; this only
/// trims the latency window between a pane dying and the next read.
const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 5;

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn reconcile_interval() -> Option<Duration> {
    let secs = std::env::args()
        .collect::<Vec<_>>()
        .windows(2)
        .find(|w| w[0] == "--reconcile-interval")
        .and_then(|w| w[1].parse::<u64>().ok())
        .unwrap_or(DEFAULT_RECONCILE_INTERVAL_SECS);
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = Config::from_env();
    let mux = TmuxAdapter::new();
    let manager = Arc::new(Manager::new(config, mux.clone())?);
    let handle = Arc::new(ApiHandle::new(manager.clone(), mux));

    let app = tmuxd_rest::router(handle)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    if let Some(interval) = reconcile_interval() {
        let manager = manager.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if let Err(e) = manager.list().await {
                    warn!(error = %e, "periodic reconciliation sweep failed");
                }
            }
        });
    }

    let addr: SocketAddr = std::env::var("TMUXD_REST_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:7337".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("tmuxd-restd listening on http://{addr}");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let serve = axum::serve(listener, app);
    tokio::select! {
        result = serve => {
            if let Err(e) = result {
                error!(error = %e, "server exited with error");
            }
        }
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    Ok(())
}
