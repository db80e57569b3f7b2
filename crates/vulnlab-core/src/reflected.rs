// SPDX-License-Identifier: Apache-2.0

//! Reflected XSS (CWE-79).
//!
//! WARNING: [`unsafe_greeting`] is intentionally vulnerable.

use axum::response::Html;
use serde::Deserialize;

use crate::params::LenientQuery;

/// Query string for the greeting handlers.
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    /// Name to greet; defaults to empty.
    #[serde(default)]
    pub name: String,
}

/// Embeds `name` into markup as-is.
#[must_use]
pub fn unsafe_greeting(name: &str) -> String {
    format!("<h1>Your name is {name}</h1>")
}

/// Embeds `name` into markup after HTML-escaping it.
#[must_use]
pub fn safe_greeting(name: &str) -> String {
    format!("<h1>Your name is {}</h1>", html_escape::encode_safe(name))
}

/// `GET /vulnerabilities/unsafe_xss`
pub async fn unsafe_xss(LenientQuery(query): LenientQuery<NameQuery>) -> Html<String> {
    Html(unsafe_greeting(&query.name))
}

/// `GET /vulnerabilities/safe_xss`
pub async fn safe_xss(LenientQuery(query): LenientQuery<NameQuery>) -> Html<String> {
    Html(safe_greeting(&query.name))
}
