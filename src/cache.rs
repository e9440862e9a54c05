use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::currency::Tally;

const MAX_CALCULATOR_SESSIONS: u64 = 10_000;

/// Calculator tallies keyed by session id, evicted once idle.
#[derive(Clone)]
pub struct CalculatorSessions {
    cache: Cache<Uuid, Arc<Mutex<Tally>>>,
}

impl CalculatorSessions {
    pub fn new(time_to_idle: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(MAX_CALCULATOR_SESSIONS)
                .time_to_idle(time_to_idle)
                .build(),
        }
    }

    pub async fn create(&self) -> (Uuid, Tally) {
        let id = Uuid::new_v4();
        let tally = Tally::default();
        self.cache
            .insert(id, Arc::new(Mutex::new(tally.clone())))
            .await;
        (id, tally)
    }

    pub async fn get(&self, id: Uuid) -> Result<Tally, AppError> {
        let session = self.cache.get(&id).await.ok_or(AppError::SessionNotFound)?;
        let tally = session.lock().await;
        Ok(tally.clone())
    }

    /// Applies `f` to the session's tally and returns the updated tally.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Result<Tally, AppError>
    where
        F: FnOnce(&mut Tally) -> Result<(), AppError>,
    {
        let session = self.cache.get(&id).await.ok_or(AppError::SessionNotFound)?;
        let mut tally = session.lock().await;
        f(&mut tally)?;
        Ok(tally.clone())
    }
}
