//! Tailormade DB
//!
//! Opens pooled MySQL connections from a small configuration record,
//! with optional slow-query logging.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
