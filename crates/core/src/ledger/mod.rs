//! Stock ledger module - merges transaction sources into a running-balance
//! ledger with period valuation.

mod balance_calculator;
mod ledger_cache;
mod ledger_merger;
mod ledger_model;
mod ledger_service;
mod ledger_summarizer;
mod ledger_traits;
mod opening_balance;

pub use balance_calculator::apply_running_balance;
pub use ledger_cache::LedgerCache;
pub use ledger_merger::{ledger_order, merge_movements};
pub use ledger_model::{
    LedgerQuery, LedgerRow, LedgerSummary, LedgerTransaction, StockLedgerReport,
    StockLedgerRequest, StockOnHand,
};
pub use ledger_service::StockLedgerService;
pub use ledger_summarizer::summarize_movements;
pub use ledger_traits::StockLedgerServiceTrait;
pub use opening_balance::resolve_opening_balance;

#[cfg(test)]
mod ledger_service_tests;
