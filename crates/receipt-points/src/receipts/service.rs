use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::domain::{Receipt, ReceiptId, ScoreRecord};
use super::repository::{PointsRepository, RepositoryError};
use super::scoring::ScoringEngine;
use super::validation::{validate_payload, ValidationError};

/// Service composing the validator, scoring engine, and points repository.
pub struct ReceiptPointsService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
    latency: Duration,
}

impl<R> ReceiptPointsService<R>
where
    R: PointsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: ScoringEngine::new(),
            latency: Duration::ZERO,
        }
    }

    /// Delay awaited before each store operation to emulate a remote database.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validate a raw payload and submit it for scoring.
    pub async fn process(
        &self,
        payload: serde_json::Value,
    ) -> Result<ScoreRecord, ReceiptServiceError> {
        let receipt = validate_payload(payload).inspect_err(|err| {
            warn!(error = %err, "receipt rejected");
        })?;
        self.submit(receipt).await
    }

    /// Score a validated receipt and record the points under a fresh id.
    pub async fn submit(&self, receipt: Receipt) -> Result<ScoreRecord, ReceiptServiceError> {
        let breakdown = self.engine.score(&receipt);
        for component in &breakdown.components {
            debug!(rule = ?component.rule, points = component.points, notes = %component.notes);
        }

        let record = ScoreRecord {
            id: ReceiptId::generate(),
            points: breakdown.total,
        };

        self.simulate_latency().await;
        self.repository.insert(record.clone())?;

        info!(
            id = %record.id,
            points = record.points,
            retailer = receipt.retailer(),
            "receipt processed"
        );
        Ok(record)
    }

    /// Look up the points recorded for an id.
    pub async fn points(&self, id: &ReceiptId) -> Result<ScoreRecord, ReceiptServiceError> {
        self.simulate_latency().await;
        match self.repository.fetch(id)? {
            Some(record) => Ok(record),
            None => {
                debug!(%id, "no receipt recorded for id");
                Err(ReceiptServiceError::NotFound(id.clone()))
            }
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Error raised by the receipt points service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no receipt found for id {0}")]
    NotFound(ReceiptId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
