// SPDX-License-Identifier: Apache-2.0

//! Open redirect (CWE-601).
//!
//! WARNING: intentionally vulnerable. The `url` parameter becomes the
//! `Location` header of a 302 with no check on scheme or host.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use serde::Deserialize;

use crate::params::LenientQuery;

/// Query string for [`open_redirect`].
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    /// Redirect destination.
    #[serde(default)]
    pub url: String,
}

/// `GET /vulnerabilities/open_redirect`
///
/// A value the header encoder rejects yields a 302 with no `Location`.
pub async fn open_redirect(LenientQuery(query): LenientQuery<RedirectQuery>) -> (StatusCode, HeaderMap) {
    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&query.url) {
        headers.insert(header::LOCATION, location);
    }
    (StatusCode::FOUND, headers)
}
