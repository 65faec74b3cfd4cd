//! # Sale Registration
//!
//! The atomic sale-registration transaction: the one place where an
//! invoice, its line items, the stock decrements, and the audit movements
//! come into existence together.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  register_sale(request, actor)                              │
//! │                                                             │
//! │  validate shape           ← no side effects yet             │
//! │  ┌─ BEGIN ─────────────────────────────────────────────┐    │
//! │  │  resolve client        → NotFound                   │    │
//! │  │  per line:                                          │    │
//! │  │    check_and_reserve   → NotFound / Inactive /      │    │
//! │  │                          InsufficientStock          │    │
//! │  │    price via engine                                 │    │
//! │  │  aggregate totals                                   │    │
//! │  │  per line: apply Exit delta (guarded)               │    │
//! │  │  mint invoice number   ← counter row, same txn      │    │
//! │  │  insert invoice + line items                        │    │
//! │  │  per line: record Exit movement (resulting stock)   │    │
//! │  └─ COMMIT ────────────────────────────────────────────┘    │
//! │                                                             │
//! │  Any error anywhere → the transaction drops → ROLLBACK.     │
//! │  Partial sales are never observable.                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rollback is RAII: `sqlx::Transaction` rolls back when dropped without
//! commit, which covers every `?` early-return and task cancellation.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::client::fetch_client;
use crate::repository::invoice::{insert_invoice, insert_line};
use crate::{ledger, movements, sequencer};
use mostrador_core::pricing::{aggregate, price_line, PricedLine};
use mostrador_core::validation::validate_sale_request;
use mostrador_core::{
    Invoice, InvoiceAggregate, LineItem, LineWithProduct, MovementKind, Product, SaleRequest,
    ValidationError,
};

/// Service owning the sale-registration transaction.
#[derive(Debug, Clone)]
pub struct SaleService {
    pool: SqlitePool,
}

/// One line after resolution and pricing, waiting to be persisted.
struct PreparedLine {
    product: Product,
    quantity: i64,
    priced: PricedLine,
}

impl SaleService {
    /// Creates a new SaleService.
    pub fn new(pool: SqlitePool) -> Self {
        SaleService { pool }
    }

    /// Registers a complete sale as one atomic unit of work.
    ///
    /// On success the returned aggregate carries the invoice, the client,
    /// and every line joined with its product (stock already decremented).
    /// On any failure the transaction rolls back and the error propagates
    /// unchanged: `Validation`, `NotFound`, `InsufficientStock`,
    /// `Conflict` (retryable), or `Persistence`.
    pub async fn register_sale(
        &self,
        request: &SaleRequest,
        actor_id: &str,
    ) -> StoreResult<InvoiceAggregate> {
        // Shape checks first: a malformed request must fail before any
        // side effect.
        validate_sale_request(request)?;
        if actor_id.trim().is_empty() {
            return Err(StoreError::Validation(ValidationError::Required {
                field: "actor_id".to_string(),
            }));
        }

        debug!(
            client_id = %request.client_id,
            lines = request.lines.len(),
            "Registering sale"
        );

        let mut tx = self.pool.begin().await?;

        // Resolve the client.
        let client = fetch_client(&mut tx, &request.client_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Client", &request.client_id))?;

        // Resolve and price every line. check_and_reserve reads inside the
        // transaction's isolation scope and rejects missing, inactive, and
        // under-stocked products before anything is written.
        let mut prepared = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let product = ledger::check_and_reserve(&mut tx, &line.product_id, line.quantity).await?;
            let priced = price_line(product.unit_price(), product.tax_rate(), line.quantity)
                .map_err(StoreError::Validation)?;
            prepared.push(PreparedLine {
                product,
                quantity: line.quantity,
                priced,
            });
        }

        let totals = aggregate(&prepared.iter().map(|p| p.priced).collect::<Vec<_>>());

        // Apply the Exit delta for every line. The guarded UPDATE keeps the
        // non-negative invariant even for requests that list the same
        // product twice: the second application sees the first one's write.
        let mut resulting_stocks = Vec::with_capacity(prepared.len());
        for p in &prepared {
            let new_stock =
                ledger::apply_delta(&mut tx, &p.product.id, MovementKind::Exit, p.quantity).await?;
            resulting_stocks.push(new_stock);
        }

        // Mint the number and persist the invoice with its lines.
        let number = sequencer::next(&mut tx).await?;
        let now = Utc::now();

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            number: number.clone(),
            issued_at: now,
            payment_method: request.payment_method,
            subtotal_cents: totals.subtotal.cents(),
            tax_cents: totals.tax.cents(),
            total_cents: totals.total.cents(),
            client_id: client.id.clone(),
            user_id: actor_id.to_string(),
        };
        insert_invoice(&mut tx, &invoice).await?;

        let mut line_items = Vec::with_capacity(prepared.len());
        for p in &prepared {
            let item = LineItem {
                id: Uuid::new_v4().to_string(),
                invoice_id: invoice.id.clone(),
                product_id: p.product.id.clone(),
                quantity: p.quantity,
                unit_price_cents: p.product.unit_price_cents,
                tax_rate_bps: p.product.tax_rate_bps,
                subtotal_cents: p.priced.subtotal.cents(),
                tax_cents: p.priced.tax.cents(),
                line_total_cents: p.priced.total.cents(),
            };
            insert_line(&mut tx, &item).await?;
            line_items.push(item);
        }

        // Record one Exit movement per line, carrying the already-applied
        // resulting stock.
        let reason = format!("Sale - Invoice {number}");
        for (p, &resulting_stock) in prepared.iter().zip(&resulting_stocks) {
            movements::record(
                &mut tx,
                &p.product.id,
                MovementKind::Exit,
                MovementKind::Exit.signed_quantity(p.quantity),
                &reason,
                resulting_stock,
                actor_id,
            )
            .await?;
        }

        tx.commit().await?;

        info!(
            number = %number,
            client_id = %client.id,
            total_cents = invoice.total_cents,
            lines = line_items.len(),
            "Sale committed"
        );

        let lines = line_items
            .into_iter()
            .zip(prepared)
            .zip(resulting_stocks)
            .map(|((line, p), new_stock)| {
                let mut product = p.product;
                product.stock = new_stock;
                LineWithProduct { line, product }
            })
            .collect();

        Ok(InvoiceAggregate {
            invoice,
            client,
            lines,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
