//! Domain Layer
//!
//! Contains the connection model and the driver gateway trait (port).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::database_driver::{ConnectionPool, DatabaseDriver, OpenRequest, PooledHandle};
pub use models::connection_config::{
    ConnectionConfig, ConnectionConfigBuilder, Password, PoolConfig, PoolLimits, QueryLoggerConfig,
    QueryLogging,
};
pub use models::dialect::DialectOptions;
pub use models::dsn::{Dsn, DsnFormat};
