use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use stockledger_core::ledger::{StockLedgerReport, StockLedgerRequest};

async fn get_stock_ledger(
    State(state): State<Arc<AppState>>,
    query: Result<Query<StockLedgerRequest>, QueryRejection>,
) -> ApiResult<Json<StockLedgerReport>> {
    let Query(request) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let report = state
        .stock_ledger_service
        .get_stock_ledger(&request)
        .await?;
    Ok(Json(StockLedgerReport::clone(&report)))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheQuery {
    item_id: Option<i64>,
}

async fn invalidate_stock_ledger_cache(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CacheQuery>,
) -> StatusCode {
    state.stock_ledger_service.invalidate_cache(q.item_id);
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/stock-ledger", get(get_stock_ledger))
        .route(
            "/reports/stock-ledger/cache",
            delete(invalidate_stock_ledger_cache),
        )
}
