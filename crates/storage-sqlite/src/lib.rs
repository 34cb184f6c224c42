//! SQLite storage implementation for the stock ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the traits defined in `stockledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The four document-backed movement sources and the item catalog
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (ledger engine)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

pub mod items;
pub mod movements;
pub mod purchases;
pub mod sales;

use std::sync::Arc;
use stockledger_core::movements::MovementSourceTrait;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from stockledger-core for convenience
pub use stockledger_core::errors::{DatabaseError, Error, Result};

/// One movement source per transaction family, all sharing `pool`.
pub fn movement_sources(pool: Arc<DbPool>) -> Vec<Arc<dyn MovementSourceTrait>> {
    vec![
        Arc::new(purchases::PurchaseRepository::new(pool.clone())),
        Arc::new(purchases::PurchaseReturnRepository::new(pool.clone())),
        Arc::new(sales::SaleRepository::new(pool.clone())),
        Arc::new(sales::SaleReturnRepository::new(pool)),
    ]
}
