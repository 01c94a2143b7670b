// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tmuxd-mcpd: the MCP server binary, serving tools over streamable HTTP.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::net::SocketAddr;
use std::sync::Arc;

use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use tmuxd_adapters::TmuxAdapter;
use tmuxd_api::ApiHandle;
use tmuxd_manager::{Config, Manager};
use tmuxd_mcp::TmuxdServer;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = Config::from_env();
    let mux = TmuxAdapter::new();
    let manager = Arc::new(Manager::new(config, mux.clone())?);
    let handle = Arc::new(ApiHandle::new(manager, mux));

    let service = StreamableHttpService::new(
        move || Ok(TmuxdServer::new(handle.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);

    let addr: SocketAddr = std::env::var("TMUXD_MCP_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:7338".to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("tmuxd-mcpd listening on http://{addr}/mcp");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let serve = axum::serve(listener, router);
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
