use crate::models::Product;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when calling an external provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    RequestError(reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid provider credentials")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

// URLs are stripped: some providers take credentials in the query string
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestError(err.without_url())
    }
}

impl ProviderError {
    /// Map a non-success status to an error
    pub(crate) fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => Self::Unauthorized,
            _ => Self::ApiError(format!("{}: {}", context, status)),
        }
    }
}

/// Product search backend
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Search the catalog, returning at most `limit` products
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Product>, ProviderError>;
}

/// Text generation backend
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Complete `prompt`. `Ok(None)` means the provider answered without a usable candidate.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ProviderError>;
}
