//! # mostrador-db: Storage Layer and Sale Transaction Core
//!
//! SQLite persistence for Mostrador, plus the one subsystem with real
//! invariants: the atomic sale-registration transaction.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              HTTP layer (external collaborator)             │
//! │        owns auth, routing, role checks (not us)             │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │ register_sale / summaries / movements
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │                 mostrador-db (THIS CRATE)                   │
//! │                                                             │
//! │   ┌──────────┐  ┌───────────┐  ┌───────────┐  ┌─────────┐  │
//! │   │ Database │  │   sale    │  │  ledger   │  │sequencer│  │
//! │   │ (pool)   │  │ (the txn) │  │  (stock)  │  │(numbers)│  │
//! │   └──────────┘  └───────────┘  └───────────┘  └─────────┘  │
//! │   ┌──────────┐  ┌───────────┐  ┌──────────────────────┐    │
//! │   │repository│  │ movements │  │ query (read-only)    │    │
//! │   └──────────┘  └───────────┘  └──────────────────────┘    │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │               SQLite (WAL, foreign keys on)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, configuration, service accessors
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - The caller-facing [`error::StoreError`] taxonomy
//! - [`repository`] - Entity persistence (clients, products, invoices)
//! - [`ledger`] - Stock reads and guarded mutations
//! - [`sequencer`] - Invoice number minting
//! - [`movements`] - Audit trail + manual movement service
//! - [`sale`] - The sale-registration transaction
//! - [`query`] - Same-day summary, search, invoice detail
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mostrador_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pos.db")).await?;
//! let result = db.sales().register_sale(&request, &actor_id).await?;
//! println!("sold: {}", result.invoice.number);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod movements;
pub mod pool;
pub mod query;
pub mod repository;
pub mod sale;
pub mod sequencer;

#[cfg(test)]
pub(crate) mod testkit;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};

// Service re-exports for convenience
pub use movements::InventoryService;
pub use query::{DaySummary, InvoiceFilters, InvoiceSearchResult, SalesQueryService};
pub use repository::client::ClientRepository;
pub use repository::product::ProductRepository;
pub use sale::SaleService;
