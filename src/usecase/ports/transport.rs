use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure taxonomy for every backend call. `Rejected` is the
/// application-level failure case: a 2xx envelope with `isSuccess: false`.
/// Services surface it as an error so no caller can silently proceed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("session expired")]
    Unauthorized,
    #[error("{message}")]
    Rejected { message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// User-facing text. Raw transport errors carry no server message, so
    /// they fall back to a fixed line instead of leaking reqwest internals.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error. Please try again.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Decode(_) => "Unexpected response from the server.".to_string(),
            ApiError::Status { message, status } => {
                if message.is_empty() {
                    format!("Request failed with status {status}.")
                } else {
                    message.clone()
                }
            }
            ApiError::Rejected { message } => message.clone(),
        }
    }
}

/// One file part of a multipart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub path: PathBuf,
}

/// The HTTP boundary every resource service talks through. Implementations
/// attach the bearer token and fixed headers, map HTTP 401 to
/// `ApiError::Unauthorized` after clearing the session, and hand the raw
/// envelope body back as JSON for the service layer to decode.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str, query: &str) -> Result<Value, ApiError>;
    async fn get_by_id(&self, path: &str, id: i64) -> Result<Value, ApiError>;
    async fn post(&self, path: &str, payload: Value) -> Result<Value, ApiError>;
    async fn post_text_plain(&self, path: &str, body: String) -> Result<Value, ApiError>;
    async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<Value, ApiError>;
    async fn put(&self, path: &str, payload: Value) -> Result<Value, ApiError>;
    async fn delete_by_id(&self, path: &str, id: i64) -> Result<Value, ApiError>;
}
