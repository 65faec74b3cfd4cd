//! # Domain Types
//!
//! Core domain types for the Mostrador sale-registration core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Domain Types                          │
//! │                                                             │
//! │  ┌────────────┐  ┌────────────┐  ┌─────────────────────┐   │
//! │  │  Product   │  │  Invoice   │  │ InventoryMovement   │   │
//! │  │  ────────  │  │  ────────  │  │ ─────────────────   │   │
//! │  │  id (UUID) │  │  id (UUID) │  │ id (UUID)           │   │
//! │  │  sku       │  │  number    │  │ kind                │   │
//! │  │  stock     │  │  totals    │  │ quantity (signed)   │   │
//! │  └────────────┘  └────────────┘  │ resulting_stock     │   │
//! │                                   └─────────────────────┘   │
//! │  ┌──────────────┐  ┌───────────────┐                       │
//! │  │PaymentMethod │  │ MovementKind  │                       │
//! │  │ Cash         │  │ Entry  Exit   │                       │
//! │  │ DebitCard ...│  │ Return Adjust │                       │
//! │  └──────────────┘  └───────────────┘                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity carries a UUID v4 `id` for database relations; the invoice
//! additionally carries its human-facing `number` (`F-00000042`).
//!
//! Monetary fields are stored as raw cents (`i64`) so the structs map
//! directly onto database rows; [`Money`] accessors wrap them for math.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, TaxRate};

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// Fixed set; the external request layer deserializes straight into this
/// enum so an unknown method is rejected before the core is invoked.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    Transfer,
    Other,
}

// =============================================================================
// Movement Kind
// =============================================================================

/// Kind of inventory movement, with per-variant stock semantics.
///
/// The asymmetry is a domain rule, not an accident:
///
/// | Kind       | Effect on stock            | Recorded quantity      |
/// |------------|----------------------------|------------------------|
/// | Entry      | `stock + qty`              | `+qty`                 |
/// | Return     | `stock + qty`              | `+qty`                 |
/// | Exit       | `stock - qty` (never < 0)  | `-qty`                 |
/// | Adjustment | `stock = qty` (absolute)   | `qty` (the new stock)  |
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Entry,
    Exit,
    Return,
    Adjustment,
}

impl MovementKind {
    /// Computes the stock that results from applying this movement.
    ///
    /// `quantity` is the caller-supplied magnitude (always non-negative;
    /// for Adjustment it is the absolute new stock). Returns `None` when an
    /// Exit would drive stock below zero; the caller turns that into an
    /// insufficient-stock error with product context attached.
    pub fn apply(&self, current_stock: i64, quantity: i64) -> Option<i64> {
        match self {
            MovementKind::Entry | MovementKind::Return => Some(current_stock + quantity),
            MovementKind::Exit => {
                let next = current_stock - quantity;
                if next < 0 {
                    None
                } else {
                    Some(next)
                }
            }
            MovementKind::Adjustment => Some(quantity),
        }
    }

    /// The signed quantity recorded on the movement row.
    ///
    /// Exits are recorded negative; Adjustment records the absolute new
    /// stock, matching the ledger's audit convention.
    pub fn signed_quantity(&self, quantity: i64) -> i64 {
        match self {
            MovementKind::Exit => -quantity,
            MovementKind::Entry | MovementKind::Return | MovementKind::Adjustment => quantity,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A registered client. The sale core only checks existence; the external
/// CRUD layer owns the rest of the profile.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// `stock` is shared mutable state: every mutation goes through the stock
/// ledger so the movement audit trail always matches the stored value.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    /// Business identifier, unique per catalog.
    pub sku: String,

    pub name: String,

    /// Unit price in cents.
    pub unit_price_cents: i64,

    /// Tax rate in basis points (1900 = 19%).
    pub tax_rate_bps: u32,

    /// Current stock level; never negative.
    pub stock: i64,

    /// Inactive products cannot be sold (soft delete).
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A committed sale. Created once by the sale transaction; immutable
/// thereafter.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,

    /// Unique, strictly increasing number: `F-` + 8-digit counter.
    pub number: String,

    pub issued_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub client_id: String,

    /// The already-authenticated actor who registered the sale.
    pub user_id: String,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product/quantity entry within an invoice.
///
/// Price and tax rate are snapshots taken at sale time, so later catalog
/// edits never rewrite history.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub invoice_id: String,
    pub product_id: String,
    pub quantity: i64,

    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,

    /// Tax rate in basis points at time of sale (frozen).
    pub tax_rate_bps: u32,

    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub line_total_cents: i64,
}

impl LineItem {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Inventory Movement
// =============================================================================

/// An immutable audit record of a stock-affecting event.
///
/// Append-only by construction: no update or delete operation exists
/// anywhere in this workspace.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: String,
    pub product_id: String,
    pub kind: MovementKind,

    /// Signed delta (negative for Exit); for Adjustment, the absolute new
    /// stock.
    pub quantity: i64,

    pub reason: String,

    /// Stock immediately after this movement was applied.
    pub resulting_stock: i64,

    pub user_id: String,
    pub occurred_at: DateTime<Utc>,
}

// =============================================================================
// Sale Request / Result
// =============================================================================

/// One requested line of a sale: which product, how many.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Input contract for registering a sale. The external layer authenticates
/// the actor and passes the id alongside this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub client_id: String,
    pub lines: Vec<SaleLine>,
    pub payment_method: PaymentMethod,
}

/// A line item joined with the product it references, for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineWithProduct {
    pub line: LineItem,
    pub product: Product,
}

/// The fully populated result of a committed sale: invoice, client, and
/// every line with its product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceAggregate {
    pub invoice: Invoice,
    pub client: Client,
    pub lines: Vec<LineWithProduct>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_and_return_add() {
        assert_eq!(MovementKind::Entry.apply(10, 5), Some(15));
        assert_eq!(MovementKind::Return.apply(0, 3), Some(3));
    }

    #[test]
    fn exit_subtracts_and_refuses_negative() {
        assert_eq!(MovementKind::Exit.apply(10, 3), Some(7));
        assert_eq!(MovementKind::Exit.apply(10, 10), Some(0));
        assert_eq!(MovementKind::Exit.apply(2, 3), None);
    }

    #[test]
    fn adjustment_is_absolute() {
        // 500 is the new stock, not a delta
        assert_eq!(MovementKind::Adjustment.apply(10, 500), Some(500));
        assert_eq!(MovementKind::Adjustment.apply(10, 0), Some(0));
    }

    #[test]
    fn signed_quantity_convention() {
        assert_eq!(MovementKind::Exit.signed_quantity(4), -4);
        assert_eq!(MovementKind::Entry.signed_quantity(4), 4);
        assert_eq!(MovementKind::Return.signed_quantity(4), 4);
        assert_eq!(MovementKind::Adjustment.signed_quantity(500), 500);
    }

    #[test]
    fn enums_serialize_snake_case() {
        // The HTTP layer round-trips these as JSON; the wire names are part
        // of the contract.
        assert_eq!(
            serde_json::to_string(&PaymentMethod::DebitCard).unwrap(),
            "\"debit_card\""
        );
        assert_eq!(
            serde_json::to_string(&MovementKind::Adjustment).unwrap(),
            "\"adjustment\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Transfer);
    }

    #[test]
    fn product_money_accessors() {
        let now = Utc::now();
        let p = Product {
            id: "p1".into(),
            sku: "CAFE-500".into(),
            name: "Café 500g".into(),
            unit_price_cents: 10_000,
            tax_rate_bps: 1900,
            stock: 10,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(p.unit_price().cents(), 10_000);
        assert_eq!(p.tax_rate().bps(), 1900);
    }
}
