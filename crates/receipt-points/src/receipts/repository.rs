use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ReceiptId, ScoreRecord};

/// Storage abstraction for recorded points so the service can be exercised in isolation.
pub trait PointsRepository: Send + Sync {
    /// Record points for a new id. Existing ids are never overwritten.
    fn insert(&self, record: ScoreRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError>;
    fn len(&self) -> Result<usize, RepositoryError>;

    fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime store guarded by a single mutex.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPointsRepository {
    records: Arc<Mutex<HashMap<ReceiptId, ScoreRecord>>>,
}

impl InMemoryPointsRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ReceiptId, ScoreRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("points store mutex poisoned".to_string()))
    }
}

impl PointsRepository for InMemoryPointsRepository {
    fn insert(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}
