//! MySQL Driver Adapter
//!
//! Opens pooled MySQL connections with SQLx.

pub mod driver;
pub mod dsn;

pub use driver::MySqlDriver;
