use dashmap::DashMap;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{LedgerQuery, StockLedgerReport};
use crate::constants::DEFAULT_LEDGER_CACHE_CAPACITY;

struct CachedReport {
    report: Arc<StockLedgerReport>,
    inserted: u64,
}

/// Memo of assembled reports keyed by `(item_id, date_from, date_to)`.
///
/// Reports are derived from persisted documents only, so an entry stays valid
/// until documents of that item change; writers call `invalidate_item`.
/// When full, the oldest entry is evicted.
pub struct LedgerCache {
    entries: DashMap<LedgerQuery, CachedReport>,
    capacity: usize,
    sequence: AtomicU64,
}

impl LedgerCache {
    pub fn new(capacity: usize) -> Self {
        LedgerCache {
            entries: DashMap::new(),
            capacity: capacity.max(1),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn get(&self, query: &LedgerQuery) -> Option<Arc<StockLedgerReport>> {
        self.entries.get(query).map(|entry| entry.report.clone())
    }

    pub fn insert(&self, query: LedgerQuery, report: Arc<StockLedgerReport>) {
        if !self.entries.contains_key(&query) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        let inserted = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(query, CachedReport { report, inserted });
    }

    /// Drops every cached report of `item_id`, whatever its range.
    pub fn invalidate_item(&self, item_id: i64) {
        self.entries.retain(|query, _| query.item_id != item_id);
        debug!("Invalidated cached stock ledgers for item {}", item_id);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().inserted)
            .map(|entry| *entry.key());
        if let Some(query) = oldest {
            self.entries.remove(&query);
        }
    }
}

impl Default for LedgerCache {
    fn default() -> Self {
        LedgerCache::new(DEFAULT_LEDGER_CACHE_CAPACITY)
    }
}
