use super::common::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::receipts::domain::ReceiptId;
use crate::receipts::repository::{PointsRepository, RepositoryError};
use crate::receipts::scoring::calculate_points;
use crate::receipts::service::{ReceiptPointsService, ReceiptServiceError};
use crate::receipts::validation::validate_payload;

#[tokio::test]
async fn process_then_lookup_returns_computed_points() {
    let (service, repository) = build_service();

    let record = service
        .process(target_payload())
        .await
        .expect("receipt processed");
    assert_eq!(record.points, 28);

    let fetched = service.points(&record.id).await.expect("record stored");
    assert_eq!(fetched, record);
    assert_eq!(repository.len().expect("len available"), 1);
}

#[tokio::test]
async fn submit_records_engine_points() {
    let (service, _) = build_service();
    let receipt = validate_payload(corner_market_payload()).expect("valid receipt");
    let expected = calculate_points(&receipt);

    let record = service.submit(receipt).await.expect("submission succeeds");
    let fetched = service.points(&record.id).await.expect("record stored");
    assert_eq!(fetched.points, expected);
}

#[tokio::test]
async fn identical_submissions_get_distinct_ids() {
    let (service, _) = build_service();

    let first = service.process(target_payload()).await.expect("first");
    let second = service.process(target_payload()).await.expect("second");
    assert_ne!(first.id, second.id);

    for record in [&first, &second] {
        let fetched = service.points(&record.id).await.expect("both retrievable");
        assert_eq!(fetched.points, 28);
    }
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (service, _) = build_service();
    service.process(target_payload()).await.expect("seeded");

    let err = service
        .points(&ReceiptId("foobar".to_string()))
        .await
        .expect_err("unknown id misses");
    assert!(matches!(err, ReceiptServiceError::NotFound(ref id) if id.as_str() == "foobar"));
}

#[tokio::test]
async fn malformed_payload_is_never_stored() {
    let (service, repository) = build_service();
    let mut payload = target_payload();
    payload["total"] = serde_json::json!("35.3");

    let err = service.process(payload).await.expect_err("rejected");
    assert!(matches!(err, ReceiptServiceError::Validation(_)));
    assert!(repository.is_empty().expect("len available"));
}

#[tokio::test]
async fn repository_failures_propagate() {
    let service = ReceiptPointsService::new(Arc::new(UnavailableRepository));

    let err = service
        .process(target_payload())
        .await
        .expect_err("insert fails");
    assert!(matches!(
        err,
        ReceiptServiceError::Repository(RepositoryError::Unavailable(_))
    ));

    let err = service
        .points(&ReceiptId::generate())
        .await
        .expect_err("fetch fails");
    assert!(matches!(err, ReceiptServiceError::Repository(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_are_all_recorded() {
    let (service, repository) = build_service();

    let tasks: Vec<_> = (0..64)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.process(corner_market_payload()).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let record = task.await.expect("task joined").expect("processed");
        ids.insert(record.id);
    }

    assert_eq!(ids.len(), 64);
    assert_eq!(repository.len().expect("len available"), 64);
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_is_awaited() {
    let (_, repository) = build_service();
    let service =
        ReceiptPointsService::new(repository).with_latency(Duration::from_millis(250));

    let started = tokio::time::Instant::now();
    let record = service.process(target_payload()).await.expect("processed");
    service.points(&record.id).await.expect("found");

    assert!(started.elapsed() >= Duration::from_millis(500));
}
