//! Domain layer: the nested container and the pure operations over it
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod display;
pub mod error;
pub mod flatten;
pub mod nested;
pub mod sum;

pub use display::TreeDisplay;
pub use error::{DomainError, DomainResult};
pub use flatten::{flatten, IntoLeaves, Leaves};
pub use nested::NestedValue;
pub use sum::{checked_sum, checked_sum_all, checked_total, sum, sum_all};
