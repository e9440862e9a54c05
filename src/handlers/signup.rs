use crate::models::signup::{SignupOutcome, SignupRecord, normalize_email};
use crate::store::{SignupStore, StoreError};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Looks the visitor up by normalized email and inserts them if absent.
///
/// A failed lookup is logged and treated as a miss; the store's uniqueness
/// constraint then decides, and a duplicate-key rejection is reported as
/// `AlreadyExists`. The store is written to at most once.
pub async fn submit(
    store: &dyn SignupStore,
    email: &str,
    first_name: &str,
    whatsapp_phone: &str,
) -> SignupOutcome {
    let email = normalize_email(email);

    if let Some(existing) = lookup(store, &email).await {
        tracing::info!("Returning visitor, no signup written");
        tracing::debug!("{email} already signed up");
        return SignupOutcome::AlreadyExists {
            first_name: existing.first_name,
        };
    }

    let record = SignupRecord {
        email,
        first_name: first_name.to_string(),
        whatsapp_phone: whatsapp_phone.to_string(),
    };

    match store.insert(&record).await {
        Ok(()) => {
            tracing::info!("New signup recorded");
            tracing::debug!("New signup for {}", record.email);
            SignupOutcome::Created {
                first_name: record.first_name,
            }
        }
        Err(StoreError::DuplicateKey(reason)) => {
            tracing::info!("Concurrent signup lost the race");
            tracing::debug!("Duplicate insert for {}: {reason}", record.email);
            let first_name = lookup(store, &record.email)
                .await
                .map(|existing| existing.first_name)
                .unwrap_or(record.first_name);
            SignupOutcome::AlreadyExists { first_name }
        }
        Err(StoreError::Backend(message)) => {
            tracing::error!("Signup error: {message}");
            let message = if message.trim().is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                message
            };
            SignupOutcome::Failed { message }
        }
    }
}

async fn lookup(store: &dyn SignupStore, email: &str) -> Option<SignupRecord> {
    match store.find_by_email(email).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Error checking existing signup: {e}");
            tracing::debug!("Lookup failed for {email}");
            None
        }
    }
}
