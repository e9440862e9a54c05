use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A row of the `signups` collection. `email` is always stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRecord {
    pub email: String,
    pub first_name: String,
    pub whatsapp_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "whatsappPhone")]
    pub whatsapp_phone: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::MalformedPayload(
                "a valid email is required".to_string(),
            ));
        }
        if self.first_name.trim().is_empty() {
            return Err(AppError::MalformedPayload(
                "first name is required".to_string(),
            ));
        }
        if self.whatsapp_phone.trim().is_empty() {
            return Err(AppError::MalformedPayload(
                "whatsapp phone is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Created { first_name: String },
    /// Carries the first name that was stored with the existing record.
    AlreadyExists { first_name: String },
    Failed { message: String },
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
