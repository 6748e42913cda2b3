//! Application Layer
//!
//! Contains use cases that orchestrate the connection workflow.
//! Use cases depend on domain gateways (abstractions), not concrete implementations.

pub mod use_cases;
