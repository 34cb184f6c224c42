use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use stockledger_core::{items::Item, ledger::StockOnHand};

async fn list_items(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Item>>> {
    let items = state.item_repository.list_items().await?;
    Ok(Json(items))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockQuery {
    as_of: Option<NaiveDate>,
}

/// Quantity on hand for one item; `asOf` defaults to today (UTC).
async fn get_item_stock(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
    query: Result<Query<StockQuery>, QueryRejection>,
) -> ApiResult<Json<StockOnHand>> {
    let Query(q) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let as_of = q.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let stock = state
        .stock_ledger_service
        .get_stock_on_hand(item_id, as_of)
        .await?;
    Ok(Json(stock))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/{id}/stock", get(get_item_stock))
}
