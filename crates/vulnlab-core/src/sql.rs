// SPDX-License-Identifier: Apache-2.0

//! SQL injection (CWE-89) against an in-memory SQLite user table.
//!
//! WARNING: [`UserDb::find_user_unsafe`] is intentionally vulnerable, and its
//! handler echoes raw database errors back to the client.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::params::LenientQuery;
use crate::{Result, VulnlabError};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    /// Primary key.
    pub username: String,
    /// Unique email.
    pub email: String,
    /// Stored in plaintext.
    pub password: String,
}

/// Handle to the demo user database.
#[derive(Clone, Debug)]
pub struct UserDb {
    pool: Pool<Sqlite>,
}

impl UserDb {
    /// Opens a fresh in-memory database and seeds it.
    ///
    /// A single connection keeps every query on the same in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let db = UserDb { pool };
        db.seed().await?;
        Ok(db)
    }

    /// Creates the `users` table and inserts the test user if missing.
    pub async fn seed(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                email TEXT UNIQUE,
                password TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "INSERT OR IGNORE INTO users (username, email, password)
             VALUES ('testuser', 'test@example.com', 'password')",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a user with bound parameters.
    pub async fn insert_user(&self, user: &UserRow) -> Result<()> {
        sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Looks up users by formatting `username` straight into the SQL text.
    pub async fn find_user_unsafe(&self, username: &str) -> Result<Vec<UserRow>> {
        let query = format!(
            "SELECT username, email, password FROM users WHERE username = '{username}'"
        );
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Looks up users with `username` bound as a parameter.
    pub async fn find_user(&self, username: &str) -> Result<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT username, email, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Query string for the lookup handlers.
#[derive(Debug, Default, Deserialize)]
pub struct UsernameQuery {
    /// Username to look up.
    #[serde(default)]
    pub username: String,
}

/// `GET /vulnerabilities/unsafe_sqli`
///
/// SQL errors are returned verbatim with status 500.
pub async fn unsafe_sqli(
    State(db): State<UserDb>,
    LenientQuery(query): LenientQuery<UsernameQuery>,
) -> Response {
    match db.find_user_unsafe(&query.username).await {
        Ok(users) => Json(json!({ "user": users })).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("SQL Error: {}", driver_message(&err)) })),
        )
            .into_response(),
    }
}

/// The database driver's own message, without sqlx's wrapping.
fn driver_message(err: &VulnlabError) -> String {
    match err {
        VulnlabError::Database(sqlx::Error::Database(db_err)) => db_err.message().to_string(),
        VulnlabError::Database(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

/// `GET /vulnerabilities/safe_sqli`
pub async fn safe_sqli(
    State(db): State<UserDb>,
    LenientQuery(query): LenientQuery<UsernameQuery>,
) -> Response {
    match db.find_user(&query.username).await {
        Ok(users) => Json(json!({ "user": users })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "user lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
