//! # Repository Module
//!
//! Entity persistence for Mostrador.
//!
//! Two layers per entity:
//! - a pool-holding repository struct: the surface the external CRUD layer
//!   uses (`db.clients().get_by_id(...)`)
//! - crate-internal functions taking `&mut SqliteConnection`: the same
//!   queries, callable inside an open transaction by the sale coordinator
//!   and the inventory service
//!
//! Boundary contract: product **stock** is deliberately absent from the
//! repository surface. Every stock mutation goes through the stock ledger
//! inside a transaction, so the movement audit trail always matches the
//! stored value.

pub mod client;
pub mod invoice;
pub mod product;
