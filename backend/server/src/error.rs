use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::Notice;

pub const DUPLICATE_IDENTITY: &str = "Email ID or Mobile Number is already registered.";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("email or mobile number already claimed")]
    DuplicateIdentity,

    #[error("TRN serial exhausted")]
    TrnExhausted,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadInput(String),

    #[error("Email ID or Mobile Number is already registered.")]
    Conflict,

    #[error("{0}")]
    Rejected(&'static str),

    #[error("Page not found")]
    NotFound,

    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        source: StoreError,
    },
}

impl AppError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        AppError::BadInput(message.into())
    }

    /// Wraps a storage failure, folding a lost identity race into a conflict.
    pub fn from_store(context: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::DuplicateIdentity => AppError::Conflict,
            source => AppError::Internal { context, source },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Rejected { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AppError::Internal { .. } = &self {
            error!("{self}");
        }

        (status, Json(Notice::danger(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identity_is_conflict() {
        let error = AppError::from_store("Error submitting survey", StoreError::DuplicateIdentity);

        assert!(matches!(error, AppError::Conflict));
        assert_eq!(error.to_string(), DUPLICATE_IDENTITY);
    }

    #[test]
    fn test_internal_message_carries_context() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let error = AppError::from_store("Error submitting survey", source.into());

        assert!(error.to_string().starts_with("Error submitting survey: encoding error"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_input("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Conflict.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Rejected("no").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from_store("Error sending message", StoreError::TrnExhausted)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
