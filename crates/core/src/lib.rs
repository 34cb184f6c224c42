//! Stock Ledger Core - Domain entities, the ledger engine, and traits.
//!
//! This crate reconstructs the stock ledger of an inventory item from its
//! purchase, sale and return documents. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod items;
pub mod ledger;
pub mod movements;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
