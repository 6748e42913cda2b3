//! Database Connection Management
//!
//! The pooled MySQL handle returned by the connection factory.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::domain::gateways::{ConnectionPool, PooledHandle};
use crate::domain::models::connection_config::PoolLimits;
use crate::domain::models::dialect::DialectOptions;

/// Bound used when the open-connection limit is zero (unlimited)
pub const UNLIMITED_CONNECTIONS: u32 = u32::MAX;

/// Build pool options for the given bounds.
///
/// A zero open limit means unlimited. sqlx has no cap on idle
/// connections, so the idle limit is carried by [`DatabasePool`] and the
/// pool opens connections only on demand.
#[must_use]
pub fn pool_options(limits: PoolLimits) -> MySqlPoolOptions {
    let max_open = if limits.max_open == 0 {
        UNLIMITED_CONNECTIONS
    } else {
        limits.max_open
    };

    MySqlPoolOptions::new().max_connections(max_open)
}

/// A sqlx pool together with the bounds it was opened with
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    limits: PoolLimits,
}

impl DatabasePool {
    #[must_use]
    pub fn new(pool: MySqlPool, limits: PoolLimits) -> Self {
        Self { pool, limits }
    }

    /// Get the sqlx pool for running queries
    #[must_use]
    pub fn sqlx_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl ConnectionPool for DatabasePool {
    fn max_idle_conns(&self) -> u32 {
        self.limits.max_idle
    }

    fn max_open_conns(&self) -> u32 {
        self.pool.options().get_max_connections()
    }
}

/// An open, pool-configured MySQL database
#[derive(Debug, Clone)]
pub struct Database {
    pool: DatabasePool,
    dialect: DialectOptions,
    server_version: Option<String>,
}

impl Database {
    /// Wrap an opened pool
    #[must_use]
    pub fn new(pool: DatabasePool, dialect: DialectOptions, server_version: Option<String>) -> Self {
        Self {
            pool,
            dialect,
            server_version,
        }
    }

    /// Dialect flags the connection was opened with, for building DDL
    #[must_use]
    pub fn dialect(&self) -> DialectOptions {
        self.dialect
    }

    /// Server version reported at open, unless the version check was skipped
    #[must_use]
    pub fn server_version(&self) -> Option<&str> {
        self.server_version.as_deref()
    }

    /// Close every connection in the pool
    pub async fn close(&self) {
        self.pool.sqlx_pool().close().await;
    }
}

impl PooledHandle for Database {
    type Pool = DatabasePool;

    fn pool(&self) -> Result<&DatabasePool, sqlx::Error> {
        if self.pool.sqlx_pool().is_closed() {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionConfig;
    use crate::infrastructure::driven_adapters::mysql::dsn::connect_options;

    fn lazy_pool(limits: PoolLimits) -> DatabasePool {
        let config = ConnectionConfig::builder("127.0.0.1:1")
            .database("app")
            .user("root")
            .build();
        let options = connect_options(config.dsn()).unwrap();

        DatabasePool::new(pool_options(limits).connect_lazy_with(options), limits)
    }

    #[test]
    fn should_not_keep_warm_connections_for_idle_limit() {
        let options = pool_options(PoolLimits {
            max_idle: 10,
            max_open: 20,
        });

        assert_eq!(options.get_min_connections(), 0);
        assert_eq!(options.get_max_connections(), 20);
    }

    #[test]
    fn should_treat_zero_open_limit_as_unlimited() {
        let options = pool_options(PoolLimits {
            max_idle: 0,
            max_open: 0,
        });

        assert_eq!(options.get_min_connections(), 0);
        assert_eq!(options.get_max_connections(), UNLIMITED_CONNECTIONS);
    }

    #[tokio::test]
    async fn should_report_configured_idle_limit_without_opening_connections() {
        let pool = lazy_pool(PoolLimits {
            max_idle: 10,
            max_open: 20,
        });

        assert_eq!(pool.max_idle_conns(), 10);
        assert_eq!(pool.max_open_conns(), 20);
        assert_eq!(pool.sqlx_pool().size(), 0);
    }

    #[tokio::test]
    async fn should_fail_pool_extraction_after_close() {
        let pool = lazy_pool(PoolLimits {
            max_idle: 0,
            max_open: 1,
        });
        let database = Database::new(pool, DialectOptions::default(), None);

        assert_eq!(database.pool().unwrap().max_open_conns(), 1);

        database.close().await;

        assert!(matches!(database.pool(), Err(sqlx::Error::PoolClosed)));
    }
}
