//! Query embedding modules.

pub mod embedder;

pub use embedder::{EmbedFuture, OllamaEmbedder, QueryEmbedder};
