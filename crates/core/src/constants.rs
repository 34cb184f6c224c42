/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default number of reports kept by the ledger cache
pub const DEFAULT_LEDGER_CACHE_CAPACITY: usize = 256;
