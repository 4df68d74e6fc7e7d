//! Text generation wrapper for Rig + Ollama.

use std::future::Future;
use std::pin::Pin;

use reqwest::Client as ReqwestClient;
use rig::client::{CompletionClient, Nothing};
use rig::completion::CompletionModel;
use rig::message::AssistantContent;
use rig::providers::ollama;

use crate::advisor::core::config::LlmConfig;
use crate::advisor::core::errors::{AdvisorError, AdvisorResult};

/// Boxed future type for generation.
pub type GenerateFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstraction over generative text backends.
pub trait Generator: Send + Sync {
    /// Generate a reply for `prompt` within `max_tokens`.
    ///
    /// # Errors
    /// Returns an error if the backend fails or answers with no text.
    fn generate(&self, prompt: &str, max_tokens: u64) -> GenerateFuture<'_, AdvisorResult<String>>;
}

/// Ollama generator using Rig provider.
pub struct OllamaGenerator {
    model: ollama::CompletionModel,
    temperature: f64,
}

impl OllamaGenerator {
    /// Create a new Ollama generator from config.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn new(config: &LlmConfig) -> AdvisorResult<Self> {
        let builder = ollama::Client::<ReqwestClient>::builder().api_key(Nothing);
        let builder = if let Some(base_url) = &config.base_url {
            builder.base_url(base_url)
        } else {
            builder
        };
        let client = builder.build().map_err(AdvisorError::from)?;
        Ok(Self {
            model: client.completion_model(config.model.clone()),
            temperature: config.temperature,
        })
    }
}

impl Generator for OllamaGenerator {
    fn generate(&self, prompt: &str, max_tokens: u64) -> GenerateFuture<'_, AdvisorResult<String>> {
        let prompt = prompt.to_string();
        Box::pin(async move {
            let request = self
                .model
                .completion_request(prompt)
                .temperature(self.temperature)
                .max_tokens_opt(Some(max_tokens))
                .build();

            let response = self.model.completion(request).await?;
            let text = extract_text(&response.choice);
            if text.trim().is_empty() {
                return Err(AdvisorError::EmptyGeneration);
            }
            Ok(text.trim().to_string())
        })
    }
}

fn extract_text(choice: &rig::OneOrMany<AssistantContent>) -> String {
    let mut out = String::new();
    for content in choice.iter() {
        if let AssistantContent::Text(text) = content {
            out.push_str(&text.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_default_config() {
        assert!(OllamaGenerator::new(&LlmConfig::default()).is_ok());
    }

    #[test]
    fn test_extract_text_joins_text_parts() {
        let choice = rig::OneOrMany::many(vec![
            AssistantContent::text("Olá, "),
            AssistantContent::text("tudo bem?"),
        ])
        .unwrap();
        assert_eq!(extract_text(&choice), "Olá, tudo bem?");
    }
}
