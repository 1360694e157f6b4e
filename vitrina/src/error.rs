use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VitrinaError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Ranking error: {0}")]
    Ranking(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API rate limit exceeded, retry after {retry_after:?} seconds")]
    ApiRateLimit { retry_after: Option<u64> },

    #[error("API authentication error: {0}")]
    ApiAuth(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for VitrinaError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            VitrinaError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            VitrinaError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            VitrinaError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            VitrinaError::Embedding(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            VitrinaError::Retrieval(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            VitrinaError::Ranking(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            VitrinaError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            VitrinaError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            VitrinaError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            VitrinaError::ApiRateLimit { .. } => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            VitrinaError::ApiAuth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            VitrinaError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            VitrinaError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            VitrinaError::LlmRateLimit { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("LLM rate limit exceeded, retry after {retry_after:?} seconds"),
            ),
            VitrinaError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, VitrinaError>;
