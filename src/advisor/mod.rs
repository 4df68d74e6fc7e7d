//! Conversational perfume recommendation core.
//!
//! This module is organized into:
//! - `core`: Configuration, errors, slots, and product types
//! - `extract`: Keyword-driven slot extraction, profile operations, and sanitization
//! - `conversation`: Bounded, self-summarizing session memory
//! - `embedding`: Query embedding abstraction and Ollama implementation
//! - `retrieval`: Catalog abstraction, TTL caches, and hybrid search
//! - `catalog`: In-memory catalog adapter
//! - `prompt`: Prompt block construction
//! - `chat`: Turn orchestration and canned replies

pub mod catalog;
pub mod chat;
pub mod conversation;
pub mod core;
pub mod embedding;
pub mod extract;
pub mod prompt;
pub mod retrieval;

// Re-export commonly used types for convenience
pub use catalog::{CatalogEntry, InMemoryCatalog};
pub use chat::{ChatOrchestrator, ChatReply};
pub use conversation::{ANONYMOUS_SESSION, Conversation, ConversationStore};
pub use self::core::{
    AdvisorConfig, AdvisorError, AdvisorResult, CacheConfig, ChatConfig, ConversationConfig,
    EmbeddingConfig, LlmConfig, Product, RetrievalConfig, SearchPage, SlotCategory, Slots,
    SortMode, Suggestion,
};
pub use embedding::{EmbedFuture, OllamaEmbedder, QueryEmbedder};
pub use extract::{
    Sanitizer, SlotExtractor, build_search_query, follow_up_hint, merge, next_missing,
    profile_hash,
};
pub use retrieval::{CacheStats, ProductCatalog, RetrievalEngine, SearchFuture, TtlCache};
