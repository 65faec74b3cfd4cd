//! # Product Repository
//!
//! Catalog operations for products: insert, lookup, listing, soft delete.
//!
//! ## What is NOT here
//! Stock. There is intentionally no `update_stock` on this surface: every
//! stock mutation flows through the stock ledger inside a transaction so
//! each change lands with a matching inventory movement. A generic product
//! update that silently rewrote `stock` would desynchronize the audit
//! trail from the stored value.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use mostrador_core::Product;

const PRODUCT_COLUMNS: &str =
    "id, sku, name, unit_price_cents, tax_rate_bps, stock, is_active, created_at, updated_at";

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product. The initial stock value is accepted here
    /// because nothing has been sold yet; afterwards only the ledger may
    /// touch it.
    pub async fn insert(&self, product: &Product) -> StoreResult<()> {
        debug!(sku = %product.sku, "Inserting product");

        sqlx::query(
            "INSERT INTO products (
                id, sku, name, unit_price_cents, tax_rate_bps,
                stock, is_active, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.unit_price_cents)
        .bind(product.tax_rate_bps)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        fetch_product(&mut conn, id).await
    }

    /// Gets a product by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ?1"
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists active products, sorted by name.
    pub async fn list_active(&self, limit: u32) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 ORDER BY name LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates catalog fields (name, price, tax rate). Stock is untouched.
    pub async fn update_catalog(&self, product: &Product) -> StoreResult<()> {
        debug!(id = %product.id, "Updating product catalog fields");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET
                sku = ?2,
                name = ?3,
                unit_price_cents = ?4,
                tax_rate_bps = ?5,
                is_active = ?6,
                updated_at = ?7
             WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.unit_price_cents)
        .bind(product.tax_rate_bps)
        .bind(product.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Soft-deletes a product. Historical invoices keep referencing it.
    pub async fn soft_delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics and seeding).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Fetches a product on an open connection (usable inside a transaction).
pub(crate) async fn fetch_product(
    conn: &mut SqliteConnection,
    id: &str,
) -> StoreResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(product)
}
