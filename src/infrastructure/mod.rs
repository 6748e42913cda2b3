//! Infrastructure Layer
//!
//! Contains all external concerns: configuration loading and the MySQL
//! driver adapter.

pub mod driven_adapters;
