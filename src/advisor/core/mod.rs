//! Core advisor types: configuration, errors, slots and products.

pub mod config;
pub mod errors;
pub mod product;
pub mod slots;

pub use config::{
    AdvisorConfig, CacheConfig, ChatConfig, ConversationConfig, EmbeddingConfig, LlmConfig,
    RetrievalConfig,
};
pub use errors::{AdvisorError, AdvisorResult};
pub use product::{Product, SearchPage, SortMode, Suggestion};
pub use slots::{SlotCategory, Slots};
