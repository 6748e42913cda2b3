//! Connection Use Cases
//!
//! Opening pooled database connections.

mod open_connection;

pub use open_connection::OpenConnectionUseCase;
