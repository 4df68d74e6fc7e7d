//! Generative backend abstraction and the Ollama adapter.

pub mod generator;

pub use generator::{GenerateFuture, Generator, OllamaGenerator};
