//! Query embedder wrapper for Rig + Ollama.

use std::future::Future;
use std::pin::Pin;

use reqwest::Client as ReqwestClient;
use rig::client::{EmbeddingsClient, Nothing};
use rig::embeddings::EmbeddingModel;
use rig::providers::ollama;

use crate::advisor::core::config::EmbeddingConfig;
use crate::advisor::core::errors::{AdvisorError, AdvisorResult};

/// Boxed future type for embedder operations.
pub type EmbedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstraction over query embedding models.
pub trait QueryEmbedder: Send + Sync {
    /// Embed a search query.
    ///
    /// # Errors
    /// Returns an error if the embedding request fails.
    fn embed_query(&self, text: &str) -> EmbedFuture<'_, AdvisorResult<Vec<f64>>>;
}

type OllamaEmbeddingModel = ollama::EmbeddingModel<ReqwestClient>;

/// Ollama query embedder using Rig provider.
#[derive(Clone)]
pub struct OllamaEmbedder {
    model: OllamaEmbeddingModel,
    ndims: usize,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder from config.
    ///
    /// # Errors
    /// Returns an error if no model is configured, the base URL is invalid or
    /// the client cannot be built.
    pub fn new(config: &EmbeddingConfig) -> AdvisorResult<Self> {
        let model_name = config.model.clone().ok_or_else(|| {
            AdvisorError::InvalidConfig("embedding.model is not set".to_string())
        })?;

        let builder = ollama::Client::<ReqwestClient>::builder().api_key(Nothing);
        let builder = if let Some(base_url) = &config.base_url {
            builder.base_url(base_url)
        } else {
            builder
        };
        let client = builder.build().map_err(AdvisorError::from)?;
        let model = client.embedding_model_with_ndims(model_name, config.ndims);
        Ok(Self {
            model,
            ndims: config.ndims,
        })
    }

    /// Embedding dimensionality.
    #[must_use]
    pub const fn ndims(&self) -> usize {
        self.ndims
    }
}

impl QueryEmbedder for OllamaEmbedder {
    fn embed_query(&self, text: &str) -> EmbedFuture<'_, AdvisorResult<Vec<f64>>> {
        let text = text.to_string();
        Box::pin(async move {
            self.model
                .embed_text(&text)
                .await
                .map(|embedding| embedding.vec)
                .map_err(AdvisorError::Embedding)
        })
    }
}
