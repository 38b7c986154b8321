//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent failures of the summation itself.
/// Construction and traversal of a finite tree cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Checked addition overflowed while adding the leaf at `position`
    /// (0-based, in flatten order).
    #[error("arithmetic overflow at leaf {position}")]
    Overflow { position: usize },

    #[error("nesting depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
