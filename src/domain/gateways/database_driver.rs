//! Database Driver Gateway
//!
//! Contract the connection factory needs from a database driver.

use async_trait::async_trait;

use crate::domain::models::connection_config::{PoolLimits, QueryLogging};
use crate::domain::models::dialect::DialectOptions;
use crate::domain::models::dsn::Dsn;

/// Everything the driver needs to open a pooled connection
#[derive(Debug, Clone)]
pub struct OpenRequest<'a> {
    pub dsn: &'a Dsn,
    pub dialect: DialectOptions,
    pub logging: QueryLogging,
    pub limits: PoolLimits,
}

/// Read-only view of a connection pool's bounds
pub trait ConnectionPool {
    /// Maximum number of idle connections kept by the pool
    fn max_idle_conns(&self) -> u32;

    /// Maximum number of open connections
    fn max_open_conns(&self) -> u32;
}

/// An opened database object that wraps a connection pool
pub trait PooledHandle: Send + Sync {
    type Pool: ConnectionPool;

    /// Get the underlying pool
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is no longer usable, e.g. already closed.
    fn pool(&self) -> Result<&Self::Pool, sqlx::Error>;
}

/// Driver that opens pooled connections.
///
/// Pool bounds are part of the open request: the pool is sized when it is
/// built.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    type Handle: PooledHandle;

    /// Open a pooled connection
    async fn open(&self, request: OpenRequest<'_>) -> Result<Self::Handle, sqlx::Error>;
}
