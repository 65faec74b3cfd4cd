//! # Store Error Types
//!
//! The caller-facing error taxonomy of the sale core.
//!
//! ## Error Flow
//! ```text
//! SQLite error (sqlx::Error)
//!      │
//!      ▼
//! StoreError (this module)  ← classified: conflict? persistence? not found?
//!      │
//!      ▼
//! HTTP layer                ← stable kind + human-readable message
//! ```
//!
//! Every error kind crosses the boundary distinctly; nothing is downgraded
//! to a generic failure, and raw store text never leaks unclassified.

use thiserror::Error;

use mostrador_core::{CoreError, ValidationError};

/// Errors surfaced by the storage layer and the sale transaction.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed or missing input. Raised before any side effect, so it is
    /// always safe to report verbatim.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Not enough stock for a requested quantity. Carries which product and
    /// how much was actually available.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// A sequencing or concurrent-write race that could not be resolved
    /// within the operation. Retryable: nothing was committed.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store-level failure (connectivity, pool exhaustion, migration).
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether the caller may safely retry the whole operation unchanged.
    ///
    /// Only conflicts qualify: the transaction rolled back, so re-invoking
    /// is free of partial-state hazards. Every other kind needs different
    /// input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Classify sqlx errors into the caller-facing taxonomy.
///
/// SQLite reports constraint kinds only in the message text, so the mapping
/// sniffs it: UNIQUE violations and writer races become [`StoreError::Conflict`]
/// (retryable), everything else lands in [`StoreError::Persistence`].
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                if msg.contains("UNIQUE constraint failed") {
                    StoreError::Conflict(msg)
                } else if msg.contains("database is locked")
                    || msg.contains("database table is locked")
                {
                    // SQLITE_BUSY: another writer held the database past the
                    // busy timeout. The transaction rolled back; retryable.
                    StoreError::Conflict(msg)
                } else {
                    StoreError::Persistence(msg)
                }
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::Persistence("connection pool exhausted".to_string())
            }

            sqlx::Error::PoolClosed => StoreError::Persistence("pool is closed".to_string()),

            other => StoreError::Persistence(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Persistence(format!("migration failed: {err}"))
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                sku,
                available,
                requested,
            } => StoreError::InsufficientStock {
                sku,
                available,
                requested,
            },
            CoreError::Validation(v) => StoreError::Validation(v),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_conflict_is_retryable() {
        assert!(StoreError::Conflict("number race".into()).is_retryable());
        assert!(!StoreError::not_found("Client", "c1").is_retryable());
        assert!(!StoreError::Persistence("down".into()).is_retryable());
        assert!(!StoreError::InsufficientStock {
            sku: "CAFE-500".into(),
            available: 1,
            requested: 2,
        }
        .is_retryable());
    }

    #[test]
    fn not_found_message() {
        let err = StoreError::not_found("Invoice", "abc");
        assert_eq!(err.to_string(), "Invoice not found: abc");
    }
}
