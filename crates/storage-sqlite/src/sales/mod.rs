//! SQLite movement sources for sales and sale returns.

mod repository;

pub use repository::{SaleRepository, SaleReturnRepository};
