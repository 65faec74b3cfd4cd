//! # Inventory Movements
//!
//! The append-only audit trail of every stock-affecting event, plus the
//! service for manual (non-sale) movements.
//!
//! A movement is recorded with the *already-applied* resulting stock, so
//! the trail is always an accurate history, never a projection of a change
//! that might still be rejected. There is no update or delete here, or
//! anywhere else in this workspace, for movement rows.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::ledger;
use mostrador_core::validation::{validate_movement_quantity, validate_reason};
use mostrador_core::{InventoryMovement, MovementKind};

const MOVEMENT_COLUMNS: &str =
    "id, product_id, kind, quantity, reason, resulting_stock, user_id, occurred_at";

/// Appends one movement row inside the caller's transaction.
///
/// `signed_quantity` follows the ledger convention: negative for Exit,
/// positive for Entry/Return, and the absolute new stock for Adjustment.
/// `resulting_stock` must be the value the ledger just returned.
pub(crate) async fn record(
    conn: &mut SqliteConnection,
    product_id: &str,
    kind: MovementKind,
    signed_quantity: i64,
    reason: &str,
    resulting_stock: i64,
    user_id: &str,
) -> StoreResult<InventoryMovement> {
    let movement = InventoryMovement {
        id: Uuid::new_v4().to_string(),
        product_id: product_id.to_string(),
        kind,
        quantity: signed_quantity,
        reason: reason.to_string(),
        resulting_stock,
        user_id: user_id.to_string(),
        occurred_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO inventory_movements (
            id, product_id, kind, quantity, reason,
            resulting_stock, user_id, occurred_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(&movement.id)
    .bind(&movement.product_id)
    .bind(movement.kind)
    .bind(movement.quantity)
    .bind(&movement.reason)
    .bind(movement.resulting_stock)
    .bind(&movement.user_id)
    .bind(movement.occurred_at)
    .execute(conn)
    .await?;

    debug!(
        product_id = %movement.product_id,
        kind = ?movement.kind,
        quantity = movement.quantity,
        resulting_stock = movement.resulting_stock,
        "Movement recorded"
    );

    Ok(movement)
}

// =============================================================================
// Inventory Service
// =============================================================================

/// Service for manual stock movements: restocks (Entry), customer returns
/// (Return), corrections (Adjustment), and non-sale exits (breakage etc.).
///
/// Applies the same ledger-then-recorder discipline as the sale path, in a
/// single-product transaction.
#[derive(Debug, Clone)]
pub struct InventoryService {
    pool: SqlitePool,
}

impl InventoryService {
    /// Creates a new InventoryService.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryService { pool }
    }

    /// Records a manual movement and applies it to the product's stock,
    /// atomically.
    ///
    /// `quantity` is the magnitude; for Adjustment it is the absolute new
    /// stock (zero allowed). Fails with `NotFound` for a missing product
    /// and `InsufficientStock` for an Exit that would go negative; in both
    /// cases nothing is written.
    pub async fn record_manual_movement(
        &self,
        product_id: &str,
        kind: MovementKind,
        quantity: i64,
        reason: &str,
        actor_id: &str,
    ) -> StoreResult<InventoryMovement> {
        validate_movement_quantity(kind, quantity).map_err(StoreError::Validation)?;
        validate_reason(reason).map_err(StoreError::Validation)?;

        let mut tx = self.pool.begin().await?;

        let resulting_stock = ledger::apply_delta(&mut tx, product_id, kind, quantity).await?;

        let movement = record(
            &mut tx,
            product_id,
            kind,
            kind.signed_quantity(quantity),
            reason,
            resulting_stock,
            actor_id,
        )
        .await?;

        tx.commit().await?;

        info!(
            product_id = %product_id,
            kind = ?kind,
            quantity = quantity,
            resulting_stock = resulting_stock,
            "Manual movement committed"
        );

        Ok(movement)
    }

    /// Movement history for one product, newest first.
    pub async fn history(&self, product_id: &str) -> StoreResult<Vec<InventoryMovement>> {
        let movements = sqlx::query_as::<_, InventoryMovement>(&format!(
            "SELECT {MOVEMENT_COLUMNS} FROM inventory_movements
             WHERE product_id = ?1 ORDER BY occurred_at DESC, rowid DESC"
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[tokio::test]
    async fn entry_restocks_and_records() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let movement = db
            .inventory()
            .record_manual_movement(&product.id, MovementKind::Entry, 5, "Restock", "user-1")
            .await
            .unwrap();

        assert_eq!(movement.quantity, 5);
        assert_eq!(movement.resulting_stock, 15);

        let fresh = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 15);
    }

    #[tokio::test]
    async fn adjustment_sets_stock_to_exactly_the_given_quantity() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let movement = db
            .inventory()
            .record_manual_movement(
                &product.id,
                MovementKind::Adjustment,
                500,
                "Annual stocktake",
                "user-1",
            )
            .await
            .unwrap();

        // Absolute, not relative: 10 → 500, not 510
        assert_eq!(movement.resulting_stock, 500);
        assert_eq!(movement.quantity, 500);

        let fresh = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 500);
    }

    #[tokio::test]
    async fn exit_records_negative_quantity() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let movement = db
            .inventory()
            .record_manual_movement(&product.id, MovementKind::Exit, 4, "Breakage", "user-1")
            .await
            .unwrap();

        assert_eq!(movement.quantity, -4);
        assert_eq!(movement.resulting_stock, 6);
    }

    #[tokio::test]
    async fn failed_exit_writes_nothing() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 3).await;

        let err = db
            .inventory()
            .record_manual_movement(&product.id, MovementKind::Exit, 5, "Breakage", "user-1")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { .. }));

        let fresh = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 3);
        assert!(db.inventory().history(&product.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_bad_input_before_any_side_effect() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 3).await;

        let inventory = db.inventory();
        assert!(matches!(
            inventory
                .record_manual_movement(&product.id, MovementKind::Entry, 0, "x", "user-1")
                .await
                .unwrap_err(),
            StoreError::Validation(_)
        ));
        assert!(matches!(
            inventory
                .record_manual_movement(&product.id, MovementKind::Entry, 5, "  ", "user-1")
                .await
                .unwrap_err(),
            StoreError::Validation(_)
        ));
        assert!(matches!(
            inventory
                .record_manual_movement("missing", MovementKind::Entry, 5, "Restock", "user-1")
                .await
                .unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let db = testkit::test_db().await;
        let product = testkit::seed_product(&db, "CAFE-500", 10_000, 1900, 10).await;

        let inventory = db.inventory();
        inventory
            .record_manual_movement(&product.id, MovementKind::Entry, 5, "First", "user-1")
            .await
            .unwrap();
        inventory
            .record_manual_movement(&product.id, MovementKind::Exit, 2, "Second", "user-1")
            .await
            .unwrap();

        let history = inventory.history(&product.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].reason, "Second");
        assert_eq!(history[1].reason, "First");
    }
}
