//! Error types shared by the store and the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted URL is missing or does not use http(s)
    #[error("{0}")]
    InvalidUrl(String),

    #[error("URL not found")]
    NotFound,

    /// Every generated candidate was already taken
    #[error("no free short code after {attempts} attempts")]
    CollisionExhausted { attempts: usize },

    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("corrupt record: {0}")]
    Serialization(#[from] serde_json::Error),
}

macro_rules! impl_from_redb {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for AppError {
                fn from(err: $ty) -> Self {
                    AppError::Storage(err.into())
                }
            }
        )+
    };
}

impl_from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::CollisionExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::InvalidUrl(message) => message.clone(),
            AppError::NotFound => "URL not found".to_string(),
            AppError::CollisionExhausted { .. } => {
                "Could not allocate a unique short code, please retry".to_string()
            }
            AppError::Storage(_) | AppError::Serialization(_) => {
                tracing::error!(error = %self, "store operation failed");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
