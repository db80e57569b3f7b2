// SPDX-License-Identifier: Apache-2.0

//! Path injection and traversal (CWE-22, CWE-73).
//!
//! WARNING: [`read_unsafe`] and [`read_joined`] are intentionally vulnerable.
//! Joining onto a base directory does not confine anything: `..` walks out
//! of it and an absolute path replaces it. [`read_confined`] normalizes the
//! joined path and checks the prefix before touching the filesystem.

use std::path::{Component, Path, PathBuf};

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::params::LenientQuery;

/// Base directory the image handlers serve from.
pub const IMAGES_BASE: &str = "/server/static/images";

/// Errors from [`read_confined`].
#[derive(Error, Debug)]
pub enum FileAccessError {
    /// The normalized path left the base directory.
    #[error("access denied: {0} is outside the base directory")]
    Denied(PathBuf),

    /// The read itself failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads whatever path the caller names.
pub fn read_unsafe(p: &str) -> std::io::Result<Vec<u8>> {
    std::fs::read(p)
}

/// Reads `p` joined onto `base`, with no check on the result.
pub fn read_joined(base: &Path, p: &str) -> std::io::Result<Vec<u8>> {
    std::fs::read(base.join(p))
}

/// Resolves `.` and `..` without touching the filesystem.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Reads `p` under `base`, refusing anything that normalizes outside it.
pub fn read_confined(base: &Path, p: &str) -> Result<Vec<u8>, FileAccessError> {
    let base = normalize(base);
    let full = normalize(&base.join(p));
    if !full.starts_with(&base) {
        return Err(FileAccessError::Denied(full));
    }
    Ok(std::fs::read(full)?)
}

/// Query string for the file handlers.
#[derive(Debug, Default, Deserialize)]
pub struct PathQuery {
    /// User-supplied path.
    #[serde(default)]
    pub p: String,
}

fn bytes_or_500(result: std::io::Result<Vec<u8>>) -> Response {
    match result {
        Ok(bytes) => bytes.into_response(),
        Err(err) => {
            tracing::debug!(error = %err, "file read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /vulnerabilities/unsafe_file_access`
pub async fn unsafe_file_access(LenientQuery(query): LenientQuery<PathQuery>) -> Response {
    bytes_or_500(read_unsafe(&query.p))
}

/// `GET /vulnerabilities/path_traversal`
pub async fn path_traversal(LenientQuery(query): LenientQuery<PathQuery>) -> Response {
    bytes_or_500(read_joined(Path::new(IMAGES_BASE), &query.p))
}

/// `GET /vulnerabilities/safe_file_access`
pub async fn safe_file_access(LenientQuery(query): LenientQuery<PathQuery>) -> Response {
    match read_confined(Path::new(IMAGES_BASE), &query.p) {
        Ok(bytes) => bytes.into_response(),
        Err(FileAccessError::Denied(path)) => {
            tracing::info!(path = %path.display(), "denied path outside base");
            Json(json!({ "error": "Access Denied" })).into_response()
        }
        Err(FileAccessError::Io(err)) => bytes_or_500(Err(err)),
    }
}
