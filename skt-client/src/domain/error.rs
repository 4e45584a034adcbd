//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from transport and decoding errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Trip has no legs
    #[error("trip must have at least one leg")]
    EmptyTrip,
}
