//! Configuration for the advisor.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::advisor::core::errors::{AdvisorError, AdvisorResult};

/// Environment variable overriding the completion model name.
pub const LLM_MODEL_ENV: &str = "ADVISOR_LLM_MODEL";
/// Environment variable overriding the Ollama base URL (completion and embedding).
pub const OLLAMA_URL_ENV: &str = "ADVISOR_OLLAMA_URL";
/// Environment variable enabling the embedding adapter with the given model.
pub const EMBED_MODEL_ENV: &str = "ADVISOR_EMBED_MODEL";
/// Environment variable overriding the number of suggestions per turn.
pub const TOP_K_ENV: &str = "ADVISOR_TOP_K";

/// Top-level configuration for the advisor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Conversation memory settings.
    pub conversation: ConversationConfig,
    /// Hybrid retrieval settings.
    pub retrieval: RetrievalConfig,
    /// Retrieval cache settings.
    pub cache: CacheConfig,
    /// Chat reply settings.
    pub chat: ChatConfig,
    /// Completion model settings.
    pub llm: LlmConfig,
    /// Embedding model settings.
    pub embedding: EmbeddingConfig,
}

impl AdvisorConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the default config and overlay values found in the environment.
    ///
    /// # Errors
    /// Returns an error if an override cannot be parsed or the result is invalid.
    pub fn from_env() -> AdvisorResult<Self> {
        let mut config = Self::default();

        if let Ok(model) = std::env::var(LLM_MODEL_ENV) {
            config.llm.model = model;
        }

        if let Ok(base_url) = std::env::var(OLLAMA_URL_ENV) {
            config.llm.base_url = Some(base_url.clone());
            config.embedding.base_url = Some(base_url);
        }

        if let Ok(model) = std::env::var(EMBED_MODEL_ENV) {
            config.embedding.model = Some(model);
        }

        if let Ok(raw) = std::env::var(TOP_K_ENV) {
            config.retrieval.top_k = raw.trim().parse().map_err(|_| {
                AdvisorError::InvalidConfig(format!("{TOP_K_ENV} must be a positive integer"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the number of suggestions returned per turn.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.retrieval.top_k = top_k;
        self
    }

    /// Set the conversation inactivity timeout.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl_seconds: u64) -> Self {
        self.conversation.ttl_seconds = ttl_seconds;
        self
    }

    /// Set the completion model name.
    #[must_use]
    pub fn with_llm_model(mut self, model: impl Into<String>) -> Self {
        self.llm.model = model.into();
        self
    }

    /// Enable the embedding adapter with the given model name.
    #[must_use]
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding.model = Some(model.into());
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> AdvisorResult<()> {
        let conversation = &self.conversation;
        if conversation.ttl_seconds == 0 {
            return Err(AdvisorError::InvalidConfig(
                "conversation.ttl_seconds must be > 0".to_string(),
            ));
        }

        if conversation.max_sessions == 0 {
            return Err(AdvisorError::InvalidConfig(
                "conversation.max_sessions must be > 0".to_string(),
            ));
        }

        if conversation.max_message_chars == 0 {
            return Err(AdvisorError::InvalidConfig(
                "conversation.max_message_chars must be > 0".to_string(),
            ));
        }

        if conversation.keep_recent >= conversation.min_history_to_summarize
            || conversation.min_history_to_summarize > conversation.max_history
        {
            return Err(AdvisorError::InvalidConfig(
                "conversation requires keep_recent < min_history_to_summarize <= max_history"
                    .to_string(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(AdvisorError::InvalidConfig(
                "retrieval.top_k must be > 0".to_string(),
            ));
        }

        if self.retrieval.branch_timeout_ms == Some(0) {
            return Err(AdvisorError::InvalidConfig(
                "retrieval.branch_timeout_ms must be > 0 when set".to_string(),
            ));
        }

        if self.cache.max_entries == 0 {
            return Err(AdvisorError::InvalidConfig(
                "cache.max_entries must be > 0".to_string(),
            ));
        }

        if self.chat.max_tokens == 0 {
            return Err(AdvisorError::InvalidConfig(
                "chat.max_tokens must be > 0".to_string(),
            ));
        }

        if let Some(base_url) = &self.llm.base_url {
            Url::parse(base_url)?;
        }

        if let Some(base_url) = &self.embedding.base_url {
            Url::parse(base_url)?;
        }

        Ok(())
    }
}

/// Conversation memory settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Inactivity window after which a conversation is replaced.
    pub ttl_seconds: u64,
    /// History length that triggers summarization once exceeded.
    pub max_history: usize,
    /// Below this many entries summarization is skipped.
    pub min_history_to_summarize: usize,
    /// Raw messages kept after the summary marker.
    pub keep_recent: usize,
    /// Maximum sanitized message length in chars.
    pub max_message_chars: usize,
    /// Maximum number of live sessions held in memory.
    pub max_sessions: usize,
}

impl ConversationConfig {
    /// Inactivity window as a duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 30 * 60,
            max_history: 12,
            min_history_to_summarize: 6,
            keep_recent: 2,
            max_message_chars: 800,
            max_sessions: 10_000,
        }
    }
}

/// Hybrid retrieval settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of suggestions returned.
    pub top_k: usize,
    /// Optional deadline for each retrieval branch, in milliseconds.
    pub branch_timeout_ms: Option<u64>,
}

impl RetrievalConfig {
    /// Branch deadline as a duration.
    #[must_use]
    pub fn branch_timeout(&self) -> Option<Duration> {
        self.branch_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            branch_timeout_ms: None,
        }
    }
}

/// Retrieval cache settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// TTL for hybrid suggestion results (seconds).
    pub suggestions_ttl_seconds: u64,
    /// TTL for single-strategy profile recommendations (seconds).
    pub recommendations_ttl_seconds: u64,
    /// Maximum entries per cache.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suggestions_ttl_seconds: 300,     // 5 minutes
            recommendations_ttl_seconds: 120, // 2 minutes
            max_entries: 1000,
        }
    }
}

/// Chat reply settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Token budget handed to the generative backend.
    pub max_tokens: u64,
    /// Products named by the fallback reply.
    pub fallback_suggestions: usize,
    /// Products named by the appended tail when the reply names none.
    pub tail_suggestions: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            fallback_suggestions: 3,
            tail_suggestions: 2,
        }
    }
}

/// Completion model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama completion model name.
    pub model: String,
    /// Temperature for generation.
    pub temperature: f64,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "ministral-3:8b-instruct-2512-q8_0".to_string(),
            temperature: 0.4,
            base_url: None,
        }
    }
}

/// Embedding model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama embedding model name; hybrid retrieval is disabled when unset.
    pub model: Option<String>,
    /// Embedding vector dimensions.
    pub ndims: usize,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: None,
            ndims: 768,
            base_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AdvisorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.conversation.max_history, 12);
        assert_eq!(config.cache.suggestions_ttl_seconds, 300);
        assert_eq!(config.cache.recommendations_ttl_seconds, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = AdvisorConfig::new()
            .with_top_k(3)
            .with_session_ttl(60)
            .with_llm_model("tiny")
            .with_embedding_model("nomic-embed-text");

        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.conversation.ttl(), Duration::from_secs(60));
        assert_eq!(config.llm.model, "tiny");
        assert_eq!(config.embedding.model.as_deref(), Some("nomic-embed-text"));
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let config = AdvisorConfig::new().with_top_k(0);
        assert!(matches!(
            config.validate(),
            Err(AdvisorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_history_bounds() {
        let mut config = AdvisorConfig::default();
        config.conversation.keep_recent = 8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = AdvisorConfig::default();
        config.llm.base_url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(AdvisorError::Url(_))));
    }
}
