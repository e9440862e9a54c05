use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{SignupStore, StoreError};
use crate::models::signup::SignupRecord;

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, SignupRecord>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl SignupStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError> {
        Ok(self.records.lock().await.get(email).cloned())
    }

    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.email) {
            return Err(StoreError::DuplicateKey(format!(
                "email {} already signed up",
                record.email
            )));
        }
        records.insert(record.email.clone(), record.clone());
        Ok(())
    }
}
