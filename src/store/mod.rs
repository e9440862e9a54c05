//! The remote `signups` collection.
//!
//! Every backend enforces uniqueness of the normalized email itself and
//! reports a violation as [`StoreError::DuplicateKey`], distinct from any
//! other failure. The signup flow relies on that to recover from two
//! visitors racing on the same address.

pub mod memory;
pub mod mongo;
pub mod supabase;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::StoreBackend;
use crate::models::signup::SignupRecord;

pub const SIGNUPS_COLLECTION: &str = "signups";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Backend(String),
}

#[async_trait]
pub trait SignupStore: Send + Sync {
    /// Zero or one record stored under an already normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError>;

    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError>;
}

pub async fn connect(backend: &StoreBackend) -> Result<Arc<dyn SignupStore>> {
    let store: Arc<dyn SignupStore> = match backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory signup store, records are lost on restart");
            Arc::new(memory::MemoryStore::default())
        }
        StoreBackend::MongoDb { uri, database } => {
            Arc::new(mongo::MongoStore::connect(uri, database).await?)
        }
        StoreBackend::Supabase { url, anon_key } => {
            Arc::new(supabase::SupabaseStore::new(url, anon_key)?)
        }
    };
    Ok(store)
}
