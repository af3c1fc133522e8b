//! Database connection provider
//!
//! Every store operation asks the provider for a fresh connection and closes
//! it when the statement is done. There is no pool.
//!
//! Connections go through `sqlx::Any`, so one binary talks to SQLite or MySQL
//! depending on the URL. Only drivers that accept `?` placeholders are
//! allowed.

use async_trait::async_trait;
use sqlx::any::install_default_drivers;
use sqlx::AnyConnection;
use sqlx::Connection;
use tracing::{debug, trace};

use crate::error::{EmpError, Result};

/// URL schemes whose drivers accept `?` bind placeholders.
pub const SUPPORTED_SCHEMES: &[&str] = &["sqlite", "mysql"];

/// Supplies one usable connection per request.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<AnyConnection>;
}

/// Opens a new connection from a database URL on every `acquire`.
#[derive(Debug, Clone)]
pub struct UrlProvider {
    url: String,
}

impl UrlProvider {
    /// Validate the URL scheme and register the sqlx drivers.
    ///
    /// No connection is attempted here; a bad host or path surfaces on the
    /// first `acquire`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let scheme = url_scheme(&url).ok_or_else(|| {
            EmpError::config(format!("database URL has no scheme: {}", redact_url(&url)))
        })?;

        if !SUPPORTED_SCHEMES.contains(&scheme) {
            return Err(EmpError::config(format!(
                "unsupported database scheme '{}' (expected one of: {})",
                scheme,
                SUPPORTED_SCHEMES.join(", ")
            )));
        }

        install_default_drivers();
        Ok(Self { url })
    }
}

#[async_trait]
impl ConnectionProvider for UrlProvider {
    async fn acquire(&self) -> Result<AnyConnection> {
        debug!(url = %redact_url(&self.url), "opening database connection");
        AnyConnection::connect(&self.url)
            .await
            .map_err(EmpError::connect)
    }
}

/// Close a connection, logging instead of failing if the driver complains.
///
/// A connection that is dropped without `close` is still released by its
/// `Drop` impl; this just makes the normal path orderly.
pub async fn release(conn: AnyConnection) {
    match conn.close().await {
        Ok(()) => trace!("database connection closed"),
        Err(err) => debug!(error = %err, "error while closing database connection"),
    }
}

fn url_scheme(url: &str) -> Option<&str> {
    let (scheme, _) = url.split_once(':')?;
    if scheme.is_empty() {
        None
    } else {
        Some(scheme)
    }
}

/// Mask the password component of a database URL for display.
///
/// `mysql://app:secret@db/hr` becomes `mysql://app:****@db/hr`. URLs
/// without credentials are returned unchanged.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    let authority_end = rest.find('/').unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let Some((userinfo, host)) = authority.rsplit_once('@') else {
        return url.to_string();
    };
    let Some((user, _password)) = userinfo.split_once(':') else {
        return url.to_string();
    };

    format!("{}://{}:****@{}{}", scheme, user, host, tail)
}
