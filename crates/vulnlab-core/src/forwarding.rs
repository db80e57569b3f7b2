// SPDX-License-Identifier: Apache-2.0

//! Server-side request forgery through URL concatenation (CWE-918).
//!
//! WARNING: intentionally vulnerable. The `target` form field is pasted into
//! the host portion of an outbound URL without validation, allow-listing, or
//! canonicalization. `target=169.254.169.254` reaches
//! `https://169.254.169.254.example.com/data/`, and `target=internal:8080/#`
//! drops the suffix entirely. The outbound client has no timeout.
//!
//! [`region_url`] is the safe pattern: the server picks the host and the
//! user only selects between fixed values. [`safe_partial_target_url`] is
//! the safe counterpart of the path variant: only alphanumeric ids are
//! fetched.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::params::{LenientQuery, form_value};

/// `target` parameter of the host-variant handlers. A missing field reads as empty.
#[derive(Debug, Default, Deserialize)]
pub struct TargetForm {
    /// Attacker-controlled host fragment.
    #[serde(default)]
    pub target: String,
}

/// Query string for the partial forgery handler.
#[derive(Debug, Default, Deserialize)]
pub struct UserIdQuery {
    /// Attacker-controlled path segment.
    #[serde(default)]
    pub user_id: String,
}

/// JSON body returned by the demo-host forgery routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchedData {
    /// Upstream body text (empty when the fetch failed).
    pub data: String,
}

/// Outbound URL for a target fragment: `https://{target}.example.com/data/`.
#[must_use]
pub fn target_url(target: &str) -> String {
    format!("https://{target}.example.com/data/")
}

/// Outbound URL with a user-controlled path component.
#[must_use]
pub fn partial_target_url(user_id: &str) -> String {
    format!("https://api.example.com/user_info/{user_id}")
}

/// Path-variant URL, only for ids made of letters and digits.
///
/// Anything else (including the empty id) yields `None` and must not be
/// fetched.
#[must_use]
pub fn safe_partial_target_url(user_id: &str) -> Option<String> {
    let alphanumeric = !user_id.is_empty() && user_id.chars().all(char::is_alphanumeric);
    alphanumeric.then(|| partial_target_url(user_id))
}

/// Maps the request value onto a server-owned subdomain.
#[must_use]
pub fn region_subdomain(target: &str) -> &'static str {
    if target == "EU" { "europe" } else { "world" }
}

/// Outbound URL whose host is chosen by the server.
#[must_use]
pub fn region_url(target: &str) -> String {
    format!("https://{}.example.com/data/", region_subdomain(target))
}

/// Issues outbound GET requests.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Sends a GET to `url`.
    async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error>;
}

#[async_trait]
impl Upstream for reqwest::Client {
    async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        reqwest::Client::get(self, url).send().await
    }
}

/// Downstream consumer of the forwarded response.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    /// Receives the upstream response, or `None` if the transport failed.
    async fn consume(&self, response: Option<reqwest::Response>);
}

/// Sink that drops the response after noting its status.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

#[async_trait]
impl ResponseSink for DiscardSink {
    async fn consume(&self, response: Option<reqwest::Response>) {
        if let Some(response) = response {
            tracing::debug!(status = %response.status(), url = %response.url(), "discarding forwarded response");
        }
    }
}

/// Shared state for the forwarding handlers.
#[derive(Clone)]
pub struct ForwardingState {
    upstream: Arc<dyn Upstream>,
    sink: Arc<dyn ResponseSink>,
}

impl ForwardingState {
    /// Creates state from an upstream client and a response sink.
    pub fn new(upstream: Arc<dyn Upstream>, sink: Arc<dyn ResponseSink>) -> Self {
        Self { upstream, sink }
    }
}

impl Default for ForwardingState {
    /// A plain `reqwest::Client` (no timeout, default redirects) and a [`DiscardSink`].
    fn default() -> Self {
        Self::new(Arc::new(reqwest::Client::new()), Arc::new(DiscardSink))
    }
}

/// Fetches the URL built from `target` and hands the result to `sink`.
///
/// Transport failures are not handled; the sink still runs, with `None`.
pub async fn forward(upstream: &dyn Upstream, sink: &dyn ResponseSink, target: &str) {
    let response = match upstream.get(&target_url(target)).await {
        Ok(response) => Some(response),
        Err(_err) => {
            // error handling
            None
        }
    };

    sink.consume(response).await;
}

/// `GET|POST /forward`: reads `target` from the form body or the query string.
///
/// The first `target` wins, body before query. The request is never rejected.
pub async fn handler(
    State(state): State<ForwardingState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> StatusCode {
    let target = form_value(&method, &headers, &body, query.as_deref(), "target");
    forward(state.upstream.as_ref(), state.sink.as_ref(), &target).await;
    StatusCode::OK
}

async fn fetch_text(upstream: &dyn Upstream, url: &str) -> String {
    match upstream.get(url).await {
        Ok(response) => response.text().await.unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// `GET /vulnerabilities/full_ssrf`: the user controls the host.
pub async fn full_ssrf(
    State(state): State<ForwardingState>,
    LenientQuery(query): LenientQuery<TargetForm>,
) -> Json<FetchedData> {
    let data = fetch_text(state.upstream.as_ref(), &target_url(&query.target)).await;
    Json(FetchedData { data })
}

/// `GET /vulnerabilities/partial_ssrf`: the user controls the path.
pub async fn partial_ssrf(
    State(state): State<ForwardingState>,
    LenientQuery(query): LenientQuery<UserIdQuery>,
) -> Json<FetchedData> {
    let data = fetch_text(state.upstream.as_ref(), &partial_target_url(&query.user_id)).await;
    Json(FetchedData { data })
}

/// `GET /vulnerabilities/safe_partial_ssrf`: non-alphanumeric ids are not fetched.
pub async fn safe_partial_ssrf(
    State(state): State<ForwardingState>,
    LenientQuery(query): LenientQuery<UserIdQuery>,
) -> Json<FetchedData> {
    let data = match safe_partial_target_url(&query.user_id) {
        Some(url) => fetch_text(state.upstream.as_ref(), &url).await,
        None => String::new(),
    };
    Json(FetchedData { data })
}

/// `GET /vulnerabilities/safe_ssrf`: the server picks the host.
pub async fn safe_ssrf(
    State(state): State<ForwardingState>,
    LenientQuery(query): LenientQuery<TargetForm>,
) -> Json<FetchedData> {
    let data = fetch_text(state.upstream.as_ref(), &region_url(&query.target)).await;
    Json(FetchedData { data })
}
