//! Shared helpers for the crate's database tests: an in-memory database
//! plus seeded entities. The in-memory pool is pinned to one connection
//! (see [`crate::pool::DbConfig::in_memory`]), which also makes concurrent
//! test transactions serialize deterministically.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::pool::{Database, DbConfig};
use crate::repository::invoice::insert_invoice;
use mostrador_core::{Client, Invoice, PaymentMethod, Product};

/// Fresh migrated in-memory database.
pub(crate) async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Inserts and returns an active client.
pub(crate) async fn seed_client(db: &Database, name: &str) -> Client {
    let client = Client {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: None,
        is_active: true,
        created_at: Utc::now(),
    };
    db.clients().insert(&client).await.expect("seed client");
    client
}

/// Inserts and returns an active product.
pub(crate) async fn seed_product(
    db: &Database,
    sku: &str,
    unit_price_cents: i64,
    tax_rate_bps: u32,
    stock: i64,
) -> Product {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        unit_price_cents,
        tax_rate_bps,
        stock,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.expect("seed product");
    product
}

/// Inserts an invoice issued `days_ago` days in the past, bypassing the
/// sale transaction, for exercising date-window queries.
pub(crate) async fn insert_backdated_invoice(
    db: &Database,
    client_id: &str,
    number: &str,
    total_cents: i64,
    days_ago: i64,
    user_id: &str,
) -> Invoice {
    let invoice = Invoice {
        id: Uuid::new_v4().to_string(),
        number: number.to_string(),
        issued_at: Utc::now() - Duration::days(days_ago),
        payment_method: PaymentMethod::Cash,
        subtotal_cents: total_cents,
        tax_cents: 0,
        total_cents,
        client_id: client_id.to_string(),
        user_id: user_id.to_string(),
    };

    let mut conn = db.pool().acquire().await.expect("acquire");
    insert_invoice(&mut conn, &invoice)
        .await
        .expect("backdated invoice");
    invoice
}

/// Total number of invoice rows.
pub(crate) async fn count_invoices(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
        .fetch_one(db.pool())
        .await
        .expect("count invoices")
}
