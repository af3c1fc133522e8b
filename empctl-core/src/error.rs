//! Structured error types for empctl-core.
//!
//! Uses `thiserror` so callers can tell a connection failure apart from a
//! failed statement. The binary wraps these in `anyhow` at its boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for empctl-core operations
#[derive(Error, Debug)]
pub enum EmpError {
    /// Could not obtain a database connection
    #[error("failed to connect to database: {source}")]
    Connect {
        #[source]
        source: sqlx::Error,
    },

    /// A statement failed after the connection was established
    #[error("{operation} failed: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Configuration is missing or unusable
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// Config file could not be parsed
    #[error("invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for empctl-core operations
pub type Result<T> = std::result::Result<T, EmpError>;

impl EmpError {
    /// Create a connection error
    pub fn connect(source: sqlx::Error) -> Self {
        Self::Connect { source }
    }

    /// Create a query error tagged with the operation that issued it
    pub fn query(operation: &'static str, source: sqlx::Error) -> Self {
        Self::Query { operation, source }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmpError::config("no database URL configured");
        assert_eq!(
            err.to_string(),
            "configuration error: no database URL configured"
        );

        let err = EmpError::query("update employee", sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("update employee failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let emp_err: EmpError = io_err.into();

        assert!(matches!(emp_err, EmpError::Io { .. }));
    }

    #[test]
    fn test_connect_error_keeps_source() {
        use std::error::Error as _;

        let err = EmpError::connect(sqlx::Error::PoolTimedOut);
        assert!(err.source().is_some());
    }
}
