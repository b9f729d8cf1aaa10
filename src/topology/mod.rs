//! Service topology module.
//!
//! This module contains the service graph types and the seeded generator
//! that builds random dependency DAGs.

pub mod generator;
pub mod types;

// Re-export key types and functions for easier access
pub use generator::{generate, GeneratorParams};
pub use types::{Service, ServiceGraph};
