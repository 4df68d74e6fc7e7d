//! Error types for the advisor core.

use thiserror::Error;

/// Advisor error type.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A keyword rule pattern failed to compile.
    #[error("invalid keyword pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// The product catalog could not answer a query.
    #[error("product search failed: {0}")]
    Search(String),
    /// Embedding error from Rig.
    #[error("embedding error: {0}")]
    Embedding(#[from] rig::embeddings::EmbeddingError),
    /// Completion error from Rig.
    #[error("completion error: {0}")]
    Completion(#[from] rig::completion::CompletionError),
    /// HTTP client error from Rig.
    #[error("http client error: {0}")]
    HttpClient(#[from] rig::http_client::Error),
    /// The generative backend answered with no usable text.
    #[error("generation returned no text")]
    EmptyGeneration,
    /// A retrieval branch exceeded its deadline.
    #[error("retrieval branch `{0}` timed out")]
    BranchTimeout(&'static str),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;
