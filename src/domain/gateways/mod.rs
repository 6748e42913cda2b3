//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod database_driver;

pub use database_driver::{ConnectionPool, DatabaseDriver, OpenRequest, PooledHandle};
