//! # Stock Ledger
//!
//! The single authority for reading and mutating product stock.
//!
//! ## Concurrency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sale A (qty 6)          Sale B (qty 6)      stock = 10     │
//! │       │                        │                            │
//! │       ▼                        │                            │
//! │  check_and_reserve: 10 ≥ 6 ✓   │                            │
//! │  apply_delta: stock 10 → 4     │                            │
//! │  COMMIT                        ▼                            │
//! │                          check_and_reserve: 4 < 6           │
//! │                          → InsufficientStock ✗              │
//! │                                                             │
//! │  SQLite serializes writers; the guarded UPDATE              │
//! │  (`AND stock >= ?`) is the backstop, and the schema's       │
//! │  CHECK (stock >= 0) is the backstop's backstop.             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions run on the caller's open connection, so when called
//! inside a transaction every read and write shares that transaction's
//! isolation scope and rolls back with it.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::product::fetch_product;
use mostrador_core::{MovementKind, Product, ValidationError};

/// Reads a product inside the caller's transaction and verifies it can
/// cover `quantity` units.
///
/// Errors: `NotFound` (missing), `Validation` (inactive),
/// `InsufficientStock` (stock < quantity). No writes are performed.
pub async fn check_and_reserve(
    conn: &mut SqliteConnection,
    product_id: &str,
    quantity: i64,
) -> StoreResult<Product> {
    let product = fetch_product(conn, product_id)
        .await?
        .ok_or_else(|| StoreError::not_found("Product", product_id))?;

    if !product.is_active {
        return Err(StoreError::Validation(ValidationError::InactiveProduct {
            sku: product.sku,
        }));
    }

    if product.stock < quantity {
        return Err(StoreError::InsufficientStock {
            sku: product.sku,
            available: product.stock,
            requested: quantity,
        });
    }

    Ok(product)
}

/// Applies a stock movement and returns the new stock value.
///
/// `quantity` is the magnitude (for Adjustment: the absolute new stock);
/// per-kind arithmetic is [`MovementKind::apply`]. Exits that would drive
/// stock negative fail with `InsufficientStock` and write nothing.
///
/// The UPDATE re-states the arithmetic in SQL with a `stock >= ?` guard on
/// Exit, so even an interleaving the snapshot read did not anticipate
/// cannot break the non-negative invariant.
pub async fn apply_delta(
    conn: &mut SqliteConnection,
    product_id: &str,
    kind: MovementKind,
    quantity: i64,
) -> StoreResult<i64> {
    let product = fetch_product(conn, product_id)
        .await?
        .ok_or_else(|| StoreError::not_found("Product", product_id))?;

    let Some(expected_stock) = kind.apply(product.stock, quantity) else {
        return Err(StoreError::InsufficientStock {
            sku: product.sku,
            available: product.stock,
            requested: quantity,
        });
    };

    let now = Utc::now();

    let sql = match kind {
        MovementKind::Exit => {
            "UPDATE products SET stock = stock - ?2, updated_at = ?3
             WHERE id = ?1 AND stock >= ?2
             RETURNING stock"
        }
        MovementKind::Entry | MovementKind::Return => {
            "UPDATE products SET stock = stock + ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING stock"
        }
        MovementKind::Adjustment => {
            "UPDATE products SET stock = ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING stock"
        }
    };

    let new_stock: Option<i64> = sqlx::query_scalar(sql)
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .fetch_optional(conn)
        .await?;

    let new_stock = new_stock.ok_or_else(|| {
        // The guard rejected an Exit the snapshot read approved: a
        // concurrent writer got between us and the row.
        StoreError::Conflict(format!("stock changed concurrently for {}", product.sku))
    })?;

    debug!(
        product_id = %product_id,
        kind = ?kind,
        quantity = quantity,
        new_stock = new_stock,
        "Stock delta applied"
    );

    debug_assert_eq!(new_stock, expected_stock);

    Ok(new_stock)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[tokio::test]
    async fn check_and_reserve_passes_with_enough_stock() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let mut tx = db.pool().begin().await.unwrap();
        let found = check_and_reserve(&mut tx, &product.id, 10).await.unwrap();
        assert_eq!(found.stock, 10);
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn check_and_reserve_reports_shortfall() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 3).await;

        let mut tx = db.pool().begin().await.unwrap();
        let err = check_and_reserve(&mut tx, &product.id, 5).await.unwrap_err();
        match err {
            StoreError::InsufficientStock {
                sku,
                available,
                requested,
            } => {
                assert_eq!(sku, "CAFE-500");
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_and_reserve_rejects_inactive_and_missing() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;
        db.products().soft_delete(&product.id).await.unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        assert!(matches!(
            check_and_reserve(&mut tx, &product.id, 1).await.unwrap_err(),
            StoreError::Validation(_)
        ));
        assert!(matches!(
            check_and_reserve(&mut tx, "missing", 1).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn exit_decrements_and_never_goes_negative() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let mut tx = db.pool().begin().await.unwrap();
        let new_stock = apply_delta(&mut tx, &product.id, MovementKind::Exit, 3)
            .await
            .unwrap();
        assert_eq!(new_stock, 7);

        let err = apply_delta(&mut tx, &product.id, MovementKind::Exit, 8)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { available: 7, .. }));
        tx.rollback().await.unwrap();

        // Rollback discarded the decrement
        let fresh = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 10);
    }

    #[tokio::test]
    async fn entry_return_add_and_adjustment_sets_absolute() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(
            apply_delta(&mut tx, &product.id, MovementKind::Entry, 5)
                .await
                .unwrap(),
            15
        );
        assert_eq!(
            apply_delta(&mut tx, &product.id, MovementKind::Return, 2)
                .await
                .unwrap(),
            17
        );
        // Adjustment interprets quantity as the new absolute stock
        assert_eq!(
            apply_delta(&mut tx, &product.id, MovementKind::Adjustment, 500)
                .await
                .unwrap(),
            500
        );
        tx.commit().await.unwrap();

        let fresh = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 500);
    }
}
