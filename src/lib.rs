//! nestsum: recursive nested containers, flattened and summed
//!
//! Architecture:
//! - `domain`: the `NestedValue` tree and pure flatten/sum operations
//! - `application`: `SummationService`, which applies `Settings`
//! - `config`: layered settings loading
//! - `util`: test support

pub mod application;
pub mod config;
pub mod domain;
pub mod util;

pub use application::services::SummationService;
pub use application::{ApplicationError, ApplicationResult};
pub use config::{Settings, Traversal};
pub use domain::{
    checked_sum, checked_sum_all, checked_total, flatten, sum, sum_all, DomainError, DomainResult,
    NestedValue, TreeDisplay,
};
