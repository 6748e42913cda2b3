//! MySQL Driver
//!
//! Implements the DatabaseDriver trait using SQLx for MySQL.

use async_trait::async_trait;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;
use tracing::log::LevelFilter;
use tracing::Level;

use crate::domain::gateways::{DatabaseDriver, OpenRequest};
use crate::domain::models::connection_config::QueryLogging;
use crate::infrastructure::driven_adapters::database::{pool_options, Database, DatabasePool};

use super::dsn::connect_options;

/// SQLx-backed MySQL driver
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDriver;

impl MySqlDriver {
    /// Create a new MySqlDriver
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Apply the query-logging mode to connect options.
///
/// With logging on, every statement is logged at the configured level and
/// statements slower than the threshold are logged again at warn.
#[must_use]
pub fn with_query_logging(options: MySqlConnectOptions, logging: QueryLogging) -> MySqlConnectOptions {
    match logging {
        QueryLogging::Disabled => options.disable_statement_logging(),
        QueryLogging::Enabled(logger) => options
            .log_statements(level_filter(logger.level))
            .log_slow_statements(LevelFilter::Warn, logger.slow_threshold),
    }
}

fn level_filter(level: Level) -> LevelFilter {
    match level {
        Level::ERROR => LevelFilter::Error,
        Level::WARN => LevelFilter::Warn,
        Level::INFO => LevelFilter::Info,
        Level::DEBUG => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[async_trait]
impl DatabaseDriver for MySqlDriver {
    type Handle = Database;

    async fn open(&self, request: OpenRequest<'_>) -> Result<Database, sqlx::Error> {
        let options = with_query_logging(connect_options(request.dsn)?, request.logging);

        let pool = pool_options(request.limits).connect_with(options).await?;

        if request.dialect.skip_initialize_with_version {
            return Ok(Database::new(DatabasePool::new(pool, request.limits), request.dialect, None));
        }

        let version = match sqlx::query_scalar::<_, String>("SELECT VERSION()").fetch_one(&pool).await {
            Ok(version) => version,
            Err(err) => {
                pool.close().await;
                return Err(err);
            }
        };
        tracing::debug!(server_version = %version, "Read MySQL server version");

        Ok(Database::new(
            DatabasePool::new(pool, request.limits),
            request.dialect,
            Some(version),
        ))
    }
}
