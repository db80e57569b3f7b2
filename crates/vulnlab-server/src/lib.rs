// SPDX-License-Identifier: Apache-2.0

//! Demo HTTP host for the vulnlab fixtures.
//!
//! Mounts every routed fixture from [`vulnlab_core::catalog`] on an axum
//! router so scanners and humans can exercise them over HTTP. Bind it to
//! loopback or a disposable lab network only.

use axum::extract::FromRef;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use vulnlab_core::catalog::{Fixture, all_fixtures};
use vulnlab_core::{ForwardingState, UserDb, cookies, files, forwarding, listing, redirect, reflected, sql};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    /// Outbound client and sink for the forgery fixtures.
    pub forwarding: ForwardingState,
    /// In-memory user table for the injection fixtures.
    pub users: UserDb,
}

impl AppState {
    /// Builds production state: a plain `reqwest::Client` and a freshly seeded user table.
    pub async fn new() -> anyhow::Result<Self> {
        Ok(Self {
            forwarding: ForwardingState::default(),
            users: UserDb::open_in_memory().await?,
        })
    }
}

impl FromRef<AppState> for ForwardingState {
    fn from_ref(state: &AppState) -> Self {
        state.forwarding.clone()
    }
}

impl FromRef<AppState> for UserDb {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the host is serving.
    pub status: String,
    /// Number of fixtures in the catalog.
    pub fixtures: usize,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        fixtures: all_fixtures().len(),
    })
}

async fn index() -> Json<&'static [Fixture]> {
    Json(all_fixtures())
}

fn vulnerabilities() -> Router<AppState> {
    Router::new()
        .route("/full_ssrf", get(forwarding::full_ssrf))
        .route("/partial_ssrf", get(forwarding::partial_ssrf))
        .route("/safe_partial_ssrf", get(forwarding::safe_partial_ssrf))
        .route("/safe_ssrf", get(forwarding::safe_ssrf))
        .route("/unsafe_xss", get(reflected::unsafe_xss))
        .route("/safe_xss", get(reflected::safe_xss))
        .route("/unsafe_sqli", get(sql::unsafe_sqli))
        .route("/safe_sqli", get(sql::safe_sqli))
        .route("/set_cookie", get(cookies::set_cookie))
        .route("/set_cookie_header", get(cookies::set_cookie_header))
        .route("/unsafe_file_access", get(files::unsafe_file_access))
        .route("/path_traversal", get(files::path_traversal))
        .route("/safe_file_access", get(files::safe_file_access))
        .route("/open_redirect", get(redirect::open_redirect))
}

/// Builds the router with every routed fixture mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/files/list", get(listing::list_files))
        .route("/forward", get(forwarding::handler).post(forwarding::handler))
        .nest("/vulnerabilities", vulnerabilities())
        .with_state(state)
}

/// Run the demo host over HTTP.
///
/// Starts an HTTP server on the specified host and port.
/// Gracefully shuts down on Ctrl+C.
pub async fn run_http(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    tracing::info!("Starting vulnlab demo host on {}:{}", host, port);

    // Handle both IPv4 and IPv6 addresses
    let addr: SocketAddr = if host.contains(':') {
        // IPv6 address - needs brackets
        format!("[{host}]:{port}")
    } else {
        // IPv4 address or hostname
        format!("{host}:{port}")
    }
    .parse()?;

    if !addr.ip().is_loopback() {
        tracing::warn!(%addr, "serving deliberately vulnerable handlers on a non-loopback address");
    }

    let listener = TcpListener::bind(addr).await?;

    tracing::info!(fixtures = all_fixtures().len(), "HTTP server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}
