//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod summation;

pub use summation::SummationService;
