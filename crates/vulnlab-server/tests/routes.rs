// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the demo host router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use tower::ServiceExt;
use vulnlab_core::catalog::routed;
use vulnlab_core::{DiscardSink, ForwardingState, Upstream, UserDb};
use vulnlab_server::{AppState, HealthResponse, router};

/// Upstream that never leaves the process: every request fails in transport.
struct OfflineUpstream;

#[async_trait]
impl Upstream for OfflineUpstream {
    async fn get(&self, _url: &str) -> Result<reqwest::Response, reqwest::Error> {
        reqwest::Client::new().get("http://[::1").send().await
    }
}

async fn app() -> Router {
    let state = AppState {
        forwarding: ForwardingState::new(Arc::new(OfflineUpstream), Arc::new(DiscardSink)),
        users: UserDb::open_in_memory().await.unwrap(),
    };
    router(state)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(uri: &str) -> axum::response::Response {
    app()
        .await
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn every_catalog_route_is_mounted() {
    for fixture in routed() {
        let route = fixture.route.unwrap();
        for method in fixture.methods {
            let request = Request::builder()
                .method(Method::from_bytes(method.as_bytes()).unwrap())
                .uri(route)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::empty())
                .unwrap();
            let response = app().await.oneshot(request).await.unwrap();
            assert_ne!(
                response.status(),
                StatusCode::NOT_FOUND,
                "{method} {route} ({}) is not mounted",
                fixture.id
            );
            assert_ne!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{method} {route} ({}) rejects its method",
                fixture.id
            );
        }
    }
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.fixtures, vulnlab_core::all_fixtures().len());
}

#[tokio::test]
async fn index_lists_fixtures() {
    let response = get("/").await;
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"directory_listing"));
    assert!(ids.contains(&"hardcoded_db_credentials"));
    assert!(ids.contains(&"forward"));
}

#[tokio::test]
async fn directory_listing_is_served_as_html() {
    let response = get("/files/list").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "{content_type}");
}

#[tokio::test]
async fn forward_survives_transport_failure() {
    let response = get("/forward?target=169.254.169.254").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn forward_accepts_bodyless_post_and_repeated_targets() {
    let request = Request::post("/forward?target=a&target=b")
        .body(Body::empty())
        .unwrap();
    let response = app().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn repeated_query_keys_are_not_rejected() {
    let response = get("/vulnerabilities/unsafe_xss?name=a&name=%3Cb%3E").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<h1>Your name is <b></h1>");
}

#[tokio::test]
async fn safe_partial_ssrf_skips_traversal_ids() {
    let response = get("/vulnerabilities/safe_partial_ssrf?user_id=..%2Fadmin").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"data":""}"#);
}

#[tokio::test]
async fn full_ssrf_returns_empty_data_on_failure() {
    let response = get("/vulnerabilities/full_ssrf?target=internal").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"data":""}"#);
}

#[tokio::test]
async fn unsafe_xss_reflects_payload() {
    let response = get("/vulnerabilities/unsafe_xss?name=%3Cscript%3Ealert(1)%3C%2Fscript%3E").await;
    assert_eq!(
        body_string(response).await,
        "<h1>Your name is <script>alert(1)</script></h1>"
    );
}

#[tokio::test]
async fn safe_xss_escapes_payload() {
    let response = get("/vulnerabilities/safe_xss?name=%3Cscript%3E").await;
    assert!(!body_string(response).await.contains("<script>"));
}

#[tokio::test]
async fn unsafe_sqli_dumps_users_with_tautology() {
    let response = get("/vulnerabilities/unsafe_sqli?username=%27%20OR%20%271%27%3D%271").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["user"][0]["password"], "password");
}

#[tokio::test]
async fn unsafe_sqli_leaks_sql_errors() {
    let response = get("/vulnerabilities/unsafe_sqli?username=%27").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("SQL Error"));
}

#[tokio::test]
async fn safe_sqli_binds_parameter() {
    let response = get("/vulnerabilities/safe_sqli?username=%27%20OR%20%271%27%3D%271").await;
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["user"], serde_json::json!([]));
}

#[tokio::test]
async fn safe_file_access_denies_traversal() {
    let response = get("/vulnerabilities/safe_file_access?p=..%2F..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"error":"Access Denied"}"#);
}

#[tokio::test]
async fn open_redirect_echoes_location() {
    let response = get("/vulnerabilities/open_redirect?url=https%3A%2F%2Fevil.example").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://evil.example");
}

#[tokio::test]
async fn raw_cookie_header_echoes_name() {
    let response = get("/vulnerabilities/set_cookie_header?name=admin").await;
    assert_eq!(response.headers()[header::SET_COOKIE], "admin=admin;");
}
