// SPDX-License-Identifier: Apache-2.0

//! Request parameter extraction that never rejects repeated keys.
//!
//! axum's `Query` and `Form` fail with 400 on `?name=a&name=b` and with 415
//! on a POST without a form body. The fixtures read parameters the way the
//! frameworks they imitate do, so they parse the raw pairs themselves.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::form_urlencoded;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Query string extractor where the last occurrence of a repeated key wins.
///
/// Every field of `T` is read as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for LenientQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        from_query(query).map(LenientQuery).map_err(|err| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to deserialize query string: {err}"),
            )
        })
    }
}

/// Deserializes `T` from a raw query string, last value winning.
pub fn from_query<T: DeserializeOwned>(query: &str) -> Result<T, serde_json::Error> {
    let fields: Map<String, Value> = form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();
    serde_json::from_value(Value::Object(fields))
}

/// Whether a request carries a urlencoded body worth parsing.
fn has_form_body(method: &Method, headers: &HeaderMap) -> bool {
    if !matches!(*method, Method::POST | Method::PUT | Method::PATCH) {
        return false;
    }
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// First value of `key` across the form body and the query string.
///
/// Body pairs come before query pairs. The body is only read for
/// `POST`/`PUT`/`PATCH` with a urlencoded content type. A missing key is the
/// empty string.
#[must_use]
pub fn form_value(
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
    query: Option<&str>,
    key: &str,
) -> String {
    let body = if has_form_body(method, headers) { body } else { &[] };
    form_urlencoded::parse(body)
        .chain(form_urlencoded::parse(query.unwrap_or_default().as_bytes()))
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
