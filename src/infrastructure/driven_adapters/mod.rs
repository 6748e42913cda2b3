//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - MySQL driver
//! - Configuration

pub mod config;
pub mod database;
pub mod mysql;

pub use config::AppConfig;
pub use database::{Database, DatabasePool};
pub use mysql::MySqlDriver;
