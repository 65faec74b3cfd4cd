//! # mostrador-core: Pure Business Logic for Mostrador
//!
//! This crate contains the business rules of the point-of-sale core as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 HTTP layer (external)                       │
//! │        auth, routing, role checks, serialization            │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │              ★ mostrador-core (THIS CRATE) ★                │
//! │                                                             │
//! │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐    │
//! │   │  types  │  │  money  │  │ pricing │  │ validation │    │
//! │   └─────────┘  └─────────┘  └─────────┘  └────────────┘    │
//! │                                                             │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │                mostrador-db (Storage Layer)                 │
//! │     SQLite, stock ledger, invoice sequencer, sale txn       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, InventoryMovement, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Line pricing and invoice totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::{Money, TaxRate};
pub use pricing::{aggregate, price_line, PricedLine, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale.
///
/// Keeps transaction sizes reasonable; a register sale with hundreds of
/// distinct products is almost certainly malformed input.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity of a single product per line.
///
/// Guards against fat-finger quantities (1000 typed instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 9_999;
