//! Tailormade DB - Main Entry Point
//!
//! Opens the configured database and reports the server it reached.

use std::sync::Arc;

use tailormade_db::application::use_cases::connections::OpenConnectionUseCase;
use tailormade_db::domain::PooledHandle;
use tailormade_db::infrastructure::driven_adapters::config::AppConfig;
use tailormade_db::infrastructure::driven_adapters::MySqlDriver;
use tailormade_db::shared::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;
    let connection_config = config.database.to_connection_config();

    // Initialize tracing
    init_tracing(&config.logging.filter, config.logging.json, config.logging.ansi)?;
    tracing::info!("Configuration loaded successfully");

    // Open the pooled connection
    let use_case = OpenConnectionUseCase::new(Arc::new(MySqlDriver::new()));
    let database = use_case.execute(&connection_config).await?;

    let pool = database.pool()?;
    sqlx::query("SELECT 1").execute(pool.sqlx_pool()).await?;
    tracing::info!(
        server_version = database.server_version().unwrap_or("unknown"),
        pool_size = pool.sqlx_pool().size(),
        "Database reachable"
    );

    database.close().await;
    Ok(())
}
