//! SQLite movement sources for purchases and purchase returns.

mod repository;

pub use repository::{PurchaseRepository, PurchaseReturnRepository};
