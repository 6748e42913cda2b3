//! Open Connection Use Case
//!
//! Opens a pooled database connection from a [`ConnectionConfig`].

use std::sync::Arc;

use crate::domain::gateways::{ConnectionPool, DatabaseDriver, OpenRequest, PooledHandle};
use crate::domain::models::connection_config::ConnectionConfig;
use crate::domain::models::dialect::DialectOptions;
use crate::shared::errors::ConnectError;

/// Use case for opening a pooled connection
pub struct OpenConnectionUseCase<D> {
    driver: Arc<D>,
}

impl<D: DatabaseDriver> OpenConnectionUseCase<D> {
    /// Create a new OpenConnectionUseCase
    #[must_use]
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Execute the use case
    ///
    /// Unset pool bounds fall back to 10 idle and 20 open connections.
    /// Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError::Open` if the driver fails to open the connection.
    /// Returns `ConnectError::PoolHandle` if the opened handle has no usable pool.
    pub async fn execute(&self, config: &ConnectionConfig) -> Result<D::Handle, ConnectError> {
        let limits = config.pool().limits();

        tracing::info!(
            host = %config.host(),
            database = %config.database(),
            query_logging = config.logging().is_enabled(),
            "Opening database connection"
        );

        let request = OpenRequest {
            dsn: config.dsn(),
            dialect: DialectOptions::default(),
            logging: config.logging(),
            limits,
        };

        let handle = self.driver.open(request).await.map_err(|err| {
            tracing::warn!(host = %config.host(), error = %err, "Failed to open database connection");
            ConnectError::Open(err)
        })?;

        let pool = handle.pool().map_err(|err| {
            tracing::warn!(host = %config.host(), error = %err, "Failed to get connection pool");
            ConnectError::PoolHandle(err)
        })?;

        tracing::info!(
            host = %config.host(),
            max_idle_conns = pool.max_idle_conns(),
            max_open_conns = pool.max_open_conns(),
            "Database connection opened"
        );

        Ok(handle)
    }
}
