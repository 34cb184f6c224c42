use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stockledger_core::errors::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::ItemNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                e if e.is_source_failure() => {
                    tracing::error!("Stock ledger unavailable: {}", e);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Stock ledger unavailable".to_string(),
                    )
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockledger_core::errors::{LedgerError, ValidationError};
    use stockledger_core::movements::MovementType;

    fn status_of(error: CoreError) -> StatusCode {
        ApiError::from(error).into_response().status()
    }

    #[test]
    fn core_errors_map_to_status_codes() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            status_of(ValidationError::InvalidDateRange { from, to }.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(CoreError::ItemNotFound(7)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(
                LedgerError::SourceUnavailable {
                    movement_type: MovementType::Sale,
                    reason: "disk I/O error".to_string(),
                }
                .into()
            ),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(LedgerError::SourceMissing(MovementType::SaleReturn).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(LedgerError::ValuationOverflow("net value").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
