use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join_all;
use log::{debug, error};
use std::sync::Arc;

use super::{
    apply_running_balance, merge_movements, resolve_opening_balance, summarize_movements,
    LedgerCache, LedgerQuery, StockLedgerReport, StockLedgerRequest, StockLedgerServiceTrait,
    StockOnHand,
};
use crate::errors::{Error, LedgerError, Result, ValidationError};
use crate::items::ItemRepositoryTrait;
use crate::movements::{Movement, MovementSourceTrait, MovementType, MovementWindow};

/// Builds stock ledgers from one movement source per transaction family.
pub struct StockLedgerService {
    item_repository: Arc<dyn ItemRepositoryTrait>,
    sources: Vec<Arc<dyn MovementSourceTrait>>,
    cache: Option<Arc<LedgerCache>>,
}

impl StockLedgerService {
    /// Creates the service. Exactly one source must be registered for every
    /// `MovementType`.
    pub fn new(
        item_repository: Arc<dyn ItemRepositoryTrait>,
        mut sources: Vec<Arc<dyn MovementSourceTrait>>,
    ) -> Result<Self> {
        for movement_type in MovementType::ALL {
            match sources
                .iter()
                .filter(|source| source.movement_type() == movement_type)
                .count()
            {
                0 => return Err(LedgerError::SourceMissing(movement_type).into()),
                1 => {}
                _ => return Err(LedgerError::DuplicateSource(movement_type).into()),
            }
        }
        sources.sort_by_key(|source| source.movement_type().ordinal());

        Ok(StockLedgerService {
            item_repository,
            sources,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: Arc<LedgerCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Queries every source concurrently. The first failure fails the whole fetch.
    async fn fetch_all(&self, item_id: i64, window: MovementWindow) -> Result<Vec<Vec<Movement>>> {
        try_join_all(
            self.sources
                .iter()
                .map(|source| Self::fetch_from(source.as_ref(), item_id, window)),
        )
        .await
    }

    async fn fetch_from(
        source: &dyn MovementSourceTrait,
        item_id: i64,
        window: MovementWindow,
    ) -> Result<Vec<Movement>> {
        let movement_type = source.movement_type();
        let movements = source
            .fetch_movements(item_id, window)
            .await
            .map_err(|e| {
                error!(
                    "Failed to fetch {} movements for item {}: {}",
                    movement_type, item_id, e
                );
                match e {
                    Error::Ledger(ledger_error) => Error::Ledger(ledger_error),
                    other => Error::Ledger(LedgerError::SourceUnavailable {
                        movement_type,
                        reason: other.to_string(),
                    }),
                }
            })?;

        for movement in &movements {
            movement.validate_for(movement_type)?;
        }
        debug!(
            "Fetched {} {} movements for item {}",
            movements.len(),
            movement_type,
            item_id
        );
        Ok(movements)
    }

    /// Net quantity of every movement strictly before `date`.
    async fn opening_balance_before(&self, item_id: i64, date: NaiveDate) -> Result<i64> {
        match MovementWindow::before(date) {
            Some(window) => {
                let history = self.fetch_all(item_id, window).await?;
                Ok(resolve_opening_balance(history.iter().flatten()))
            }
            None => Ok(0),
        }
    }

    async fn build_report(&self, query: &LedgerQuery) -> Result<StockLedgerReport> {
        let range = MovementWindow::between(query.date_from, query.date_to);
        let (opening_stock, in_range) = futures::try_join!(
            self.opening_balance_before(query.item_id, query.date_from),
            self.fetch_all(query.item_id, range),
        )?;

        let merged = merge_movements(in_range);
        let summary = summarize_movements(&merged)?;
        let rows = apply_running_balance(opening_stock, merged);
        debug!(
            "Stock ledger for item {} from {} to {}: opening {}, {} rows",
            query.item_id,
            query.date_from,
            query.date_to,
            opening_stock,
            rows.len()
        );

        Ok(StockLedgerReport::assemble(
            query,
            opening_stock,
            rows,
            summary,
        ))
    }
}

#[async_trait]
impl StockLedgerServiceTrait for StockLedgerService {
    async fn get_stock_ledger(
        &self,
        request: &StockLedgerRequest,
    ) -> Result<Arc<StockLedgerReport>> {
        let query = request.validate()?;
        self.item_repository.get_item(query.item_id).await?;

        if let Some(report) = self.cache.as_ref().and_then(|cache| cache.get(&query)) {
            debug!("Serving cached stock ledger for {:?}", query);
            return Ok(report);
        }

        let report = Arc::new(self.build_report(&query).await?);
        if let Some(cache) = &self.cache {
            cache.insert(query, report.clone());
        }
        Ok(report)
    }

    async fn get_stock_on_hand(&self, item_id: i64, as_of: NaiveDate) -> Result<StockOnHand> {
        if item_id <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "itemId must be a positive id, got {}",
                item_id
            ))
            .into());
        }
        self.item_repository.get_item(item_id).await?;

        let movements = self
            .fetch_all(item_id, MovementWindow::up_to(as_of))
            .await?;
        Ok(StockOnHand {
            item_id,
            as_of,
            quantity: resolve_opening_balance(movements.iter().flatten()),
        })
    }

    fn invalidate_cache(&self, item_id: Option<i64>) {
        if let Some(cache) = &self.cache {
            match item_id {
                Some(item_id) => cache.invalidate_item(item_id),
                None => cache.clear(),
            }
        }
    }
}
