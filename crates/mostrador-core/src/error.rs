//! # Error Types
//!
//! Domain-specific error types for mostrador-core.
//!
//! ## Error Hierarchy
//! ```text
//! mostrador-core (this file)
//! ├── CoreError        - business rule violations
//! └── ValidationError  - input validation failures
//!
//! mostrador-db (separate crate)
//! └── StoreError       - caller-facing taxonomy, wraps the above
//!
//! Flow: ValidationError → CoreError → StoreError → HTTP layer
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Context in every message (sku, available, requested)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the pure domain layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough stock to cover a requested quantity.
    ///
    /// Carries the product's sku plus both sides of the comparison so the
    /// caller can render "Only 3 left" style messages.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Input validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any side effect; always safe to report verbatim.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. malformed UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The product exists but is deactivated and cannot be sold.
    #[error("Product {sku} is not active")]
    InactiveProduct { sku: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            sku: "CAFE-500".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for CAFE-500: available 3, requested 5"
        );
    }

    #[test]
    fn validation_converts_to_core_error() {
        let err = ValidationError::Required {
            field: "client_id".to_string(),
        };
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Validation(_)));
    }
}
