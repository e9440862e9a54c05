use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Lockbox Not Found")]
    LockboxNotFound,

    #[error("Unknown currency: {0}")]
    CurrencyNotFound(String),

    #[error("Calculator session not found")]
    SessionNotFound,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) | AppError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            AppError::LockboxNotFound
            | AppError::CurrencyNotFound(_)
            | AppError::SessionNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
