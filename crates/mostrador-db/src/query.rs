//! # Sales Queries
//!
//! Read-only aggregation over committed invoices: the same-day summary,
//! filtered search, and full invoice detail. Depends on the persisted
//! invoice shape, never on the write path: plain reads at the store's
//! default consistency, no transaction needed.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::invoice::{fetch_invoice, fetch_lines, INVOICE_COLUMNS};
use crate::repository::{client::fetch_client, product::fetch_product};
use mostrador_core::{Invoice, InvoiceAggregate, LineWithProduct};

/// Hard cap on search results, to bound response size.
const SEARCH_LIMIT: i64 = 100;

// =============================================================================
// Query DTOs
// =============================================================================

/// Aggregate sales figures for one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub count: usize,
    pub total_cents: i64,
    pub invoices: Vec<Invoice>,
}

/// Filters for invoice search. All optional; absent means "don't filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFilters {
    /// Inclusive start date (whole day).
    pub date_from: Option<NaiveDate>,
    /// Inclusive end date (whole day, through 23:59:59.999).
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring match on the invoice number.
    pub number_contains: Option<String>,
    pub client_id: Option<String>,
}

/// Search result with its own aggregate figures.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSearchResult {
    pub invoices: Vec<Invoice>,
    pub count: usize,
    pub total_cents: i64,
}

// =============================================================================
// Service
// =============================================================================

/// Read-only query service over committed sales.
#[derive(Debug, Clone)]
pub struct SalesQueryService {
    pool: SqlitePool,
}

impl SalesQueryService {
    /// Creates a new SalesQueryService.
    pub fn new(pool: SqlitePool) -> Self {
        SalesQueryService { pool }
    }

    /// Sales summary for the current calendar day (server-local), spanning
    /// `[todayStart, todayStart + 24h)`, optionally restricted to one actor.
    pub async fn same_day_summary(&self, actor_id: Option<&str>) -> StoreResult<DaySummary> {
        let today = Local::now().date_naive();
        let start = local_day_start(today);
        let end = local_day_start(today + Duration::days(1));

        debug!(date = %today, actor = ?actor_id, "Computing same-day summary");

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE issued_at >= "
        ));
        qb.push_bind(start);
        qb.push(" AND issued_at < ");
        qb.push_bind(end);
        if let Some(actor) = actor_id {
            qb.push(" AND user_id = ");
            qb.push_bind(actor.to_string());
        }
        qb.push(" ORDER BY issued_at DESC");

        let invoices: Vec<Invoice> = qb.build_query_as().fetch_all(&self.pool).await?;

        let total_cents = invoices.iter().map(|i| i.total_cents).sum();

        Ok(DaySummary {
            date: today,
            count: invoices.len(),
            total_cents,
            invoices,
        })
    }

    /// Searches invoices by date range, number substring, and client.
    ///
    /// Date bounds are inclusive of the full day on both ends. Results are
    /// newest first and capped at 100 rows.
    pub async fn search(&self, filters: &InvoiceFilters) -> StoreResult<InvoiceSearchResult> {
        debug!(?filters, "Searching invoices");

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE 1 = 1"
        ));

        if let Some(from) = filters.date_from {
            qb.push(" AND issued_at >= ");
            qb.push_bind(local_day_start(from));
        }
        if let Some(to) = filters.date_to {
            // Full end day: strictly before the following midnight
            qb.push(" AND issued_at < ");
            qb.push_bind(local_day_start(to + Duration::days(1)));
        }
        if let Some(term) = filters.number_contains.as_deref() {
            // SQLite LIKE is ASCII case-insensitive, which covers the F-
            // prefix and digits
            qb.push(" AND number LIKE '%' || ");
            qb.push_bind(term.to_string());
            qb.push(" || '%'");
        }
        if let Some(client_id) = filters.client_id.as_deref() {
            qb.push(" AND client_id = ");
            qb.push_bind(client_id.to_string());
        }

        qb.push(" ORDER BY issued_at DESC LIMIT ");
        qb.push_bind(SEARCH_LIMIT);

        let invoices: Vec<Invoice> = qb.build_query_as().fetch_all(&self.pool).await?;

        let total_cents = invoices.iter().map(|i| i.total_cents).sum();

        Ok(InvoiceSearchResult {
            count: invoices.len(),
            total_cents,
            invoices,
        })
    }

    /// Full detail of one invoice: client and every line with its product.
    pub async fn invoice_detail(&self, invoice_id: &str) -> StoreResult<InvoiceAggregate> {
        let mut conn = self.pool.acquire().await?;

        let invoice = fetch_invoice(&mut conn, invoice_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Invoice", invoice_id))?;

        let client = fetch_client(&mut conn, &invoice.client_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Client", &invoice.client_id))?;

        let line_items = fetch_lines(&mut conn, invoice_id).await?;

        let mut lines = Vec::with_capacity(line_items.len());
        for line in line_items {
            let product = fetch_product(&mut conn, &line.product_id)
                .await?
                .ok_or_else(|| StoreError::not_found("Product", &line.product_id))?;
            lines.push(LineWithProduct { line, product });
        }

        Ok(InvoiceAggregate {
            invoice,
            client,
            lines,
        })
    }
}

// =============================================================================
// Day Boundary Helpers
// =============================================================================

/// UTC instant of local midnight for the given date.
///
/// DST corner cases: an ambiguous local midnight takes the earlier
/// reading; a nonexistent one (spring-forward gap) falls back to reading
/// the naive midnight as UTC.
fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
