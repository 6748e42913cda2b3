//! Error Types
//!
//! Failures reported while opening a pooled connection.

use thiserror::Error;

/// Errors returned by the connection factory.
///
/// Both variants carry the driver error unchanged; its message is shown
/// verbatim.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The driver could not open or validate the connection
    #[error(transparent)]
    Open(sqlx::Error),

    /// The opened object could not yield its pool
    #[error(transparent)]
    PoolHandle(sqlx::Error),
}

/// A descriptor the MySQL adapter could not understand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DsnParseError {
    #[error("invalid DSN: missing the slash separating the database name")]
    MissingDatabase,

    #[error("invalid DSN: network address not terminated (missing closing brace)")]
    UnterminatedAddress,

    #[error("invalid DSN: unknown network type {0}")]
    UnknownNetwork(String),

    #[error("invalid DSN: invalid port in address {0}")]
    InvalidPort(String),

    #[error("invalid DSN: invalid URL encoding in parameter {0}")]
    InvalidEncoding(String),
}

impl From<DsnParseError> for sqlx::Error {
    fn from(err: DsnParseError) -> Self {
        sqlx::Error::Configuration(Box::new(err))
    }
}
