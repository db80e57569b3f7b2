// SPDX-License-Identifier: Apache-2.0

//! Cookie injection (CWE-20, CWE-113).
//!
//! WARNING: intentionally vulnerable. Both handlers let the caller pick the
//! cookie name and value; [`set_cookie_header`] also writes the raw header.

use axum::Json;
use axum::http::{HeaderMap, HeaderValue, header};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::params::LenientQuery;

/// Query string for the cookie handlers.
#[derive(Debug, Default, Deserialize)]
pub struct CookieQuery {
    /// Used as both cookie name and value.
    #[serde(default)]
    pub name: String,
}

/// Cookie pair built from user input, e.g. `name=name`.
#[must_use]
pub fn cookie_pair(name: &str) -> String {
    format!("{name}={name}")
}

/// Raw `Set-Cookie` header value built from user input.
#[must_use]
pub fn raw_cookie_header(name: &str) -> String {
    format!("{name}={name};")
}

// Bytes the header encoder rejects (CR, LF, other controls) drop the header
// instead of failing the request.
fn insert_set_cookie(headers: &mut HeaderMap, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(header::SET_COOKIE, value);
    }
}

/// `GET /vulnerabilities/set_cookie`
pub async fn set_cookie(LenientQuery(query): LenientQuery<CookieQuery>) -> (HeaderMap, Json<Value>) {
    let mut headers = HeaderMap::new();
    insert_set_cookie(&mut headers, &format!("{}; Path=/", cookie_pair(&query.name)));
    (headers, Json(json!({ "message": "Cookie set" })))
}

/// `GET /vulnerabilities/set_cookie_header`
pub async fn set_cookie_header(LenientQuery(query): LenientQuery<CookieQuery>) -> (HeaderMap, Json<Value>) {
    let mut headers = HeaderMap::new();
    insert_set_cookie(&mut headers, &raw_cookie_header(&query.name));
    (headers, Json(json!({ "message": "Raw cookie header set" })))
}
