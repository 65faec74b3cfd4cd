//! # Invoice Sequencer
//!
//! Mints invoice numbers: `F-` + 8-digit zero-padded counter, unique and
//! strictly increasing.
//!
//! ## Why a dedicated counter row
//! Deriving "the next number" from the latest invoice row is a classic
//! read-then-insert race, and parsing a number out of a previous row's
//! string breaks the moment a non-conforming value appears. Instead a
//! single `invoice_counter` row is incremented inside the caller's
//! transaction:
//!
//! - two concurrent sales cannot read the same value: SQLite serializes
//!   the writers, and the increment belongs to the committing transaction
//! - an aborted sale rolls the increment back, so numbering tolerates gaps
//!   but never repeats or goes backward
//! - the UNIQUE index on `invoices.number` remains as a backstop; a
//!   violation surfaces as a retryable `Conflict`

use sqlx::SqliteConnection;

use crate::error::{StoreError, StoreResult};

/// Constant prefix on every invoice number.
pub const INVOICE_PREFIX: &str = "F-";

/// Returns the next invoice number, consuming one counter value inside the
/// caller's transaction.
pub async fn next(conn: &mut SqliteConnection) -> StoreResult<String> {
    let value: Option<i64> = sqlx::query_scalar(
        "UPDATE invoice_counter SET last_value = last_value + 1 WHERE id = 1
         RETURNING last_value",
    )
    .fetch_optional(conn)
    .await?;

    let value = value.ok_or_else(|| {
        StoreError::Persistence("invoice counter row missing; migrations not applied?".to_string())
    })?;

    Ok(format_number(value))
}

/// Formats a counter value as an invoice number (`42` → `F-00000042`).
pub fn format_number(value: i64) -> String {
    format!("{}{:08}", INVOICE_PREFIX, value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn number_format() {
        assert_eq!(format_number(1), "F-00000001");
        assert_eq!(format_number(42), "F-00000042");
        assert_eq!(format_number(99_999_999), "F-99999999");
    }

    #[tokio::test]
    async fn first_number_and_monotonic_increase() {
        let db = testkit::test_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(next(&mut tx).await.unwrap(), "F-00000001");
        assert_eq!(next(&mut tx).await.unwrap(), "F-00000002");
        tx.commit().await.unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(next(&mut tx).await.unwrap(), "F-00000003");
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn aborted_transaction_leaves_a_gap_never_a_repeat() {
        let db = testkit::test_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(next(&mut tx).await.unwrap(), "F-00000001");
        tx.commit().await.unwrap();

        // This consumer aborts; its value is returned to the counter
        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(next(&mut tx).await.unwrap(), "F-00000002");
        tx.rollback().await.unwrap();

        // Next committer reuses the freed value; numbers still never
        // collide because the previous one was never committed
        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(next(&mut tx).await.unwrap(), "F-00000002");
        tx.commit().await.unwrap();
    }
}
