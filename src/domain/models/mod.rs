//! Domain Models
//!
//! Connection configuration, descriptor rendering and dialect flags.

pub mod connection_config;
pub mod dialect;
pub mod dsn;
