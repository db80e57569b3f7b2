// SPDX-License-Identifier: Apache-2.0

//! Hardcoded database credentials (CWE-798).
//!
//! WARNING: intentionally vulnerable. [`DB_USER`] and [`DB_PASSWORD`] are
//! compiled into the binary, visible to anyone with the source or the
//! artifact, and identical in every deployment.
//!
//! [`EnvCredentials`] is the matching safe pattern: secrets come from the
//! environment and stay wrapped in [`SecretString`] until used.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgConnectOptions;

/// Database user embedded in source.
pub const DB_USER: &str = "dbuser";

/// Database password embedded in source.
pub const DB_PASSWORD: &str = "s3cretp4ssword";

const DB_HOST: &str = "localhost";
const DB_NAME: &str = "pqgotest";

/// Builds the connection descriptor from the embedded credentials.
///
/// Takes no input, so the result never varies.
#[must_use]
pub fn connection_string() -> String {
    format!("postgres://{DB_USER}:{DB_PASSWORD}@{DB_HOST}/{DB_NAME}")
}

/// Opens a database handle from a connection descriptor.
pub trait Opener {
    /// Live handle returned on success.
    type Handle;
    /// Failure cause; callers of [`connect_with`] never see it.
    type Error;

    /// Opens a handle for `url`.
    fn open(&self, url: &str) -> Result<Self::Handle, Self::Error>;
}

/// Lazy Postgres pool opener backed by sqlx.
///
/// Only parses the descriptor; no connection is attempted until the pool is
/// first used. Outside a tokio runtime the open fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgOpener;

impl Opener for PgOpener {
    type Handle = PgPool;
    type Error = sqlx::Error;

    fn open(&self, url: &str) -> Result<PgPool, sqlx::Error> {
        // sqlx panics when the pool is created without a runtime.
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(sqlx::Error::Configuration(
                "no tokio runtime to host the pool".into(),
            ));
        }
        PgPool::connect_lazy(url)
    }
}

/// Opens a handle with the embedded credentials, or `None` if that fails.
///
/// The underlying error is discarded.
pub fn connect_with<O: Opener>(opener: &O) -> Option<O::Handle> {
    opener.open(&connection_string()).ok()
}

/// Opens a lazy Postgres pool with the embedded credentials.
///
/// Returns `None` when called outside a tokio runtime.
#[must_use]
pub fn connect() -> Option<PgPool> {
    connect_with(&PgOpener)
}

/// Database credentials resolved from the environment.
///
/// Reads `VULNLAB_DB_USER` and `VULNLAB_DB_PASSWORD`.
pub struct EnvCredentials {
    user: SecretString,
    password: SecretString,
}

impl EnvCredentials {
    /// Returns `None` unless both variables are set and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let user = non_empty_var("VULNLAB_DB_USER")?;
        let password = non_empty_var("VULNLAB_DB_PASSWORD")?;
        Some(Self {
            user: SecretString::from(user),
            password: SecretString::from(password),
        })
    }

    /// Connection options for the demo database, with these credentials.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(DB_HOST)
            .database(DB_NAME)
            .username(self.user.expose_secret())
            .password(self.password.expose_secret())
    }
}

impl std::fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredentials")
            .field("user", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Opens a lazy pool with credentials taken from the environment.
///
/// Returns `None` when the credentials are not configured or when called
/// outside a tokio runtime.
#[must_use]
pub fn connect_from_env() -> Option<PgPool> {
    let credentials = EnvCredentials::from_env()?;
    tokio::runtime::Handle::try_current().ok()?;
    Some(PgPool::connect_lazy_with(credentials.connect_options()))
}
