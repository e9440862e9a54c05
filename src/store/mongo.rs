use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::{
    Client, Collection, IndexModel,
    bson::doc,
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
};

use super::{SIGNUPS_COLLECTION, SignupStore, StoreError};
use crate::models::signup::SignupRecord;

const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoStore {
    collection: Collection<SignupRecord>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;
        let collection = client
            .database(database)
            .collection::<SignupRecord>(SIGNUPS_COLLECTION);

        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection
            .create_index(unique_email)
            .await
            .context("Failed to ensure unique email index on signups")?;

        tracing::info!("Connected to MongoDB database {database}");
        Ok(Self { collection })
    }
}

fn into_store_error(err: Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error_to_store_error(write_error.code, &write_error.message)
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

fn write_error_to_store_error(code: i32, message: &str) -> StoreError {
    if code == DUPLICATE_KEY_CODE {
        StoreError::DuplicateKey(message.to_string())
    } else {
        StoreError::Backend(format!("write error {code}: {message}"))
    }
}

#[async_trait]
impl SignupStore for MongoStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(into_store_error)
    }

    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        self.collection
            .insert_one(record)
            .await
            .map(|_| ())
            .map_err(into_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_code_is_a_duplicate() {
        let err = write_error_to_store_error(
            11000,
            "E11000 duplicate key error collection: rsvp.signups index: email_1",
        );
        assert!(matches!(err, StoreError::DuplicateKey(m) if m.starts_with("E11000")));
    }

    #[test]
    fn other_write_codes_are_backend_errors() {
        assert_eq!(
            write_error_to_store_error(121, "Document failed validation"),
            StoreError::Backend("write error 121: Document failed validation".to_string())
        );
    }
}
