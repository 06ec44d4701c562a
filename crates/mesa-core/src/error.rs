//! # Error Types
//!
//! Domain-specific error types for mesa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mesa-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  mesa-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order status change that the lifecycle does not allow.
    ///
    /// ## When This Occurs
    /// - Reopening an order that has already Ended
    /// - Ending an order twice
    ///
    /// ```text
    /// Active ──► Ended      ✓
    /// Ended  ──► Active     ✗ InvalidOrderTransition
    /// Ended  ──► Ended      ✗ InvalidOrderTransition
    /// ```
    #[error("Order cannot move from {from} to {to}")]
    InvalidOrderTransition { from: OrderStatus, to: OrderStatus },

    /// The items or price of an Ended order were about to change.
    #[error("Order {order_id} has ended and can no longer be changed")]
    OrderEnded { order_id: i64 },

    /// A monetary total does not fit in 64-bit cents.
    #[error("{field} overflows the largest representable amount")]
    AmountOverflow { field: String },

    /// Hashing a credential failed (bad parameters or RNG failure).
    #[error("Failed to hash credential: {0}")]
    CredentialHash(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a row reaches the database, so the caller sees which field
/// was wrong instead of a raw constraint message.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
