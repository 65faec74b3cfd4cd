//! # Invoice Repository
//!
//! Row-level persistence for invoices and their line items.
//!
//! Invoices are created exactly once, inside the sale transaction, and are
//! immutable afterwards, so this module offers inserts and reads, nothing
//! else. The public query surface (summary, search, detail) lives in the
//! sales query service.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::StoreResult;
use mostrador_core::{Invoice, LineItem};

pub(crate) const INVOICE_COLUMNS: &str = "id, number, issued_at, payment_method, \
     subtotal_cents, tax_cents, total_cents, client_id, user_id";

const LINE_COLUMNS: &str = "id, invoice_id, product_id, quantity, unit_price_cents, \
     tax_rate_bps, subtotal_cents, tax_cents, line_total_cents";

/// Inserts an invoice row.
pub(crate) async fn insert_invoice(
    conn: &mut SqliteConnection,
    invoice: &Invoice,
) -> StoreResult<()> {
    debug!(id = %invoice.id, number = %invoice.number, "Inserting invoice");

    sqlx::query(
        "INSERT INTO invoices (
            id, number, issued_at, payment_method,
            subtotal_cents, tax_cents, total_cents,
            client_id, user_id
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&invoice.id)
    .bind(&invoice.number)
    .bind(invoice.issued_at)
    .bind(invoice.payment_method)
    .bind(invoice.subtotal_cents)
    .bind(invoice.tax_cents)
    .bind(invoice.total_cents)
    .bind(&invoice.client_id)
    .bind(&invoice.user_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Inserts one line item.
///
/// Product price and tax rate arrive already snapshotted on the line, so
/// later catalog edits never rewrite sale history.
pub(crate) async fn insert_line(conn: &mut SqliteConnection, line: &LineItem) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO invoice_lines (
            id, invoice_id, product_id, quantity,
            unit_price_cents, tax_rate_bps,
            subtotal_cents, tax_cents, line_total_cents
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&line.id)
    .bind(&line.invoice_id)
    .bind(&line.product_id)
    .bind(line.quantity)
    .bind(line.unit_price_cents)
    .bind(line.tax_rate_bps)
    .bind(line.subtotal_cents)
    .bind(line.tax_cents)
    .bind(line.line_total_cents)
    .execute(conn)
    .await?;

    Ok(())
}

/// Fetches an invoice by id.
pub(crate) async fn fetch_invoice(
    conn: &mut SqliteConnection,
    id: &str,
) -> StoreResult<Option<Invoice>> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(invoice)
}

/// Fetches all line items of an invoice, in insertion order.
pub(crate) async fn fetch_lines(
    conn: &mut SqliteConnection,
    invoice_id: &str,
) -> StoreResult<Vec<LineItem>> {
    let lines = sqlx::query_as::<_, LineItem>(&format!(
        "SELECT {LINE_COLUMNS} FROM invoice_lines WHERE invoice_id = ?1 ORDER BY rowid"
    ))
    .bind(invoice_id)
    .fetch_all(conn)
    .await?;

    Ok(lines)
}
