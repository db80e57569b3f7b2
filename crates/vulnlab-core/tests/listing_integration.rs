// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the directory listing handler.
//!
//! The handler always lists the process working directory, so these tests
//! change it and must run serially.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::routing::get;
use http::{Request, StatusCode, header};
use serial_test::serial;
use tower::ServiceExt;
use vulnlab_core::listing::list_files;

/// Restores the working directory when dropped.
struct CwdGuard(std::path::PathBuf);

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

async fn fetch_listing() -> (StatusCode, String, String) {
    let app = Router::new().route("/files/list", get(list_files));
    let response = app
        .oneshot(Request::get("/files/list").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
#[serial]
async fn test_handler_reflects_hostile_filename() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"").unwrap();
    std::fs::write(dir.path().join("<script>x</script>"), b"").unwrap();
    let _guard = CwdGuard::enter(dir.path());

    let (status, content_type, body) = fetch_listing().await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body, "<script>x</script>\na.txt\n");
}

#[tokio::test]
#[serial]
async fn test_handler_on_vanished_directory_is_empty_ok() {
    let dir = tempfile::tempdir().unwrap();
    let doomed = dir.path().join("doomed");
    std::fs::create_dir(&doomed).unwrap();
    let _guard = CwdGuard::enter(&doomed);
    std::fs::remove_dir(&doomed).unwrap();

    let (status, _, body) = fetch_listing().await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}
