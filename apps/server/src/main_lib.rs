use std::sync::Arc;

use crate::config::{Config, LogFormat};
use stockledger_core::{
    items::ItemRepositoryTrait,
    ledger::{LedgerCache, StockLedgerService, StockLedgerServiceTrait},
};
use stockledger_storage_sqlite::{db, items::ItemRepository, movement_sources};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub stock_ledger_service: Arc<dyn StockLedgerServiceTrait>,
    pub item_repository: Arc<dyn ItemRepositoryTrait>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let item_repository: Arc<dyn ItemRepositoryTrait> =
        Arc::new(ItemRepository::new(pool.clone()));
    let mut service = StockLedgerService::new(item_repository.clone(), movement_sources(pool))?;
    if let Some(capacity) = config.ledger_cache_capacity {
        tracing::info!("Stock ledger cache enabled (capacity {})", capacity);
        service = service.with_cache(Arc::new(LedgerCache::new(capacity)));
    }

    Ok(Arc::new(AppState {
        stock_ledger_service: Arc::new(service),
        item_repository,
    }))
}
