use std::time::Duration;

use crate::error::AppError;
use crate::models::lockbox::{LockboxInfo, UnlockResult, find_lockbox};

pub fn describe(id: &str) -> Result<LockboxInfo, AppError> {
    find_lockbox(id)
        .map(|lockbox| lockbox.info())
        .ok_or(AppError::LockboxNotFound)
}

/// Checks the words after the "decrypting" pause.
pub async fn unlock(id: &str, words: &[String], delay: Duration) -> Result<UnlockResult, AppError> {
    let lockbox = find_lockbox(id).ok_or(AppError::LockboxNotFound)?;

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let result = lockbox.check(words);
    tracing::info!("Unlock attempt on {} ({}): {:?}", lockbox.id, lockbox.name, result);
    Ok(result)
}
