use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::{StockLedgerReport, StockLedgerRequest, StockOnHand};
use crate::errors::Result;

/// Trait defining the contract for stock ledger service operations.
#[async_trait]
pub trait StockLedgerServiceTrait: Send + Sync {
    /// Builds the stock ledger of one item over an inclusive date range.
    ///
    /// Fails as a whole when any transaction source fails; a partial ledger is
    /// never returned.
    async fn get_stock_ledger(&self, request: &StockLedgerRequest)
        -> Result<Arc<StockLedgerReport>>;

    /// Quantity on hand at the end of `as_of`.
    async fn get_stock_on_hand(&self, item_id: i64, as_of: NaiveDate) -> Result<StockOnHand>;

    /// Drops cached reports for one item, or all of them.
    fn invalidate_cache(&self, item_id: Option<i64>);
}
