//! Application layer: services and use cases
//!
//! This layer applies `Settings` on top of the pure domain operations.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
