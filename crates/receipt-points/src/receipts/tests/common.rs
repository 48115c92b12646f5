use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::receipts::domain::{
    ItemSubmission, Receipt, ReceiptId, ReceiptSubmission, ScoreRecord,
};
use crate::receipts::repository::{InMemoryPointsRepository, PointsRepository, RepositoryError};
use crate::receipts::service::ReceiptPointsService;
use crate::receipts::validation::validate_submission;

pub(super) fn target_payload() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

pub(super) fn corner_market_payload() -> Value {
    let gatorade = json!({ "shortDescription": "Gatorade", "price": "2.25" });
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [gatorade.clone(), gatorade.clone(), gatorade.clone(), gatorade],
        "total": "9.00"
    })
}

/// Minimal receipt that earns nothing beyond what the overridden fields contribute.
pub(super) fn submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "-".to_string(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "09:00".to_string(),
        items: Vec::new(),
        total: "1.01".to_string(),
    }
}

pub(super) fn item(description: &str, price: &str) -> ItemSubmission {
    ItemSubmission {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

pub(super) fn receipt(submission: ReceiptSubmission) -> Receipt {
    validate_submission(submission).expect("fixture receipt is valid")
}

pub(super) fn build_service() -> (
    Arc<ReceiptPointsService<InMemoryPointsRepository>>,
    Arc<InMemoryPointsRepository>,
) {
    let repository = Arc::new(InMemoryPointsRepository::default());
    let service = Arc::new(ReceiptPointsService::new(repository.clone()));
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl PointsRepository for UnavailableRepository {
    fn insert(&self, _record: ScoreRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}
