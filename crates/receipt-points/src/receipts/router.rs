use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::ReceiptId;
use super::repository::PointsRepository;
use super::service::{ReceiptPointsService, ReceiptServiceError};

const INVALID_RECEIPT: &str = "The receipt is invalid.";
const RECEIPT_NOT_FOUND: &str = "No receipt found for that ID.";

#[derive(Debug, Serialize)]
pub struct ProcessReceiptResponse {
    pub id: ReceiptId,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Router builder exposing the receipt submission and points lookup endpoints.
pub fn receipt_router<R>(service: Arc<ReceiptPointsService<R>>) -> Router
where
    R: PointsRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptPointsService<R>>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response
where
    R: PointsRepository + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "receipt body rejected");
            return invalid_receipt(rejection.body_text());
        }
    };

    match service.process(payload).await {
        Ok(record) => (
            StatusCode::OK,
            Json(ProcessReceiptResponse { id: record.id }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptPointsService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: PointsRepository + 'static,
{
    match service.points(&ReceiptId(id)).await {
        Ok(record) => (
            StatusCode::OK,
            Json(PointsResponse {
                points: record.points,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn invalid_receipt(detail: String) -> Response {
    let payload = json!({
        "error": INVALID_RECEIPT,
        "detail": detail,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn error_response(err: ReceiptServiceError) -> Response {
    match err {
        ReceiptServiceError::Validation(error) => invalid_receipt(error.to_string()),
        ReceiptServiceError::NotFound(_) => {
            let payload = json!({ "error": RECEIPT_NOT_FOUND });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ReceiptServiceError::Repository(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
