//! Chat turn orchestration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::advisor::chat::replies::{
    CLARIFY_REPLY, FAREWELL_REPLY, GREETING_REPLY, fallback_reply, is_farewell, is_greeting,
    mentions_domain, with_tail,
};
use crate::advisor::conversation::store::ConversationStore;
use crate::advisor::core::config::{AdvisorConfig, ChatConfig};
use crate::advisor::core::errors::AdvisorResult;
use crate::advisor::core::product::Suggestion;
use crate::advisor::embedding::embedder::QueryEmbedder;
use crate::advisor::extract::profile::follow_up_hint;
use crate::advisor::extract::slot_extractor::SlotExtractor;
use crate::advisor::prompt::prompt_builder::build_chat_prompt;
use crate::advisor::retrieval::catalog::ProductCatalog;
use crate::advisor::retrieval::hybrid_search::RetrievalEngine;
use crate::llm::generator::Generator;

/// Reply for one chat turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Text shown to the user.
    pub reply: String,
    /// Recommendation cards.
    pub suggestions: Vec<Suggestion>,
    /// Next clarifying question, empty once the profile is complete.
    pub follow_up_hint: String,
}

impl ChatReply {
    fn canned(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::default()
        }
    }
}

/// Ties extraction, conversation memory, retrieval and generation together.
pub struct ChatOrchestrator {
    extractor: SlotExtractor,
    store: ConversationStore,
    retrieval: RetrievalEngine,
    generator: Arc<dyn Generator>,
    config: ChatConfig,
}

impl ChatOrchestrator {
    /// Create an orchestrator from its parts.
    #[must_use]
    pub const fn new(
        extractor: SlotExtractor,
        store: ConversationStore,
        retrieval: RetrievalEngine,
        generator: Arc<dyn Generator>,
        config: ChatConfig,
    ) -> Self {
        Self {
            extractor,
            store,
            retrieval,
            generator,
            config,
        }
    }

    /// Build every component from config around the given collaborators.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or a component cannot be built.
    pub fn from_config(
        config: &AdvisorConfig,
        catalog: Arc<dyn ProductCatalog>,
        embedder: Option<Arc<dyn QueryEmbedder>>,
        generator: Arc<dyn Generator>,
    ) -> AdvisorResult<Self> {
        config.validate()?;
        Ok(Self::new(
            SlotExtractor::new()?,
            ConversationStore::new(&config.conversation)?,
            RetrievalEngine::new(catalog, embedder, &config.retrieval, &config.cache),
            generator,
            config.chat.clone(),
        ))
    }

    /// Conversation store backing the sessions.
    #[must_use]
    pub const fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Retrieval engine serving suggestions.
    #[must_use]
    pub const fn retrieval(&self) -> &RetrievalEngine {
        &self.retrieval
    }

    /// Run one chat turn. Never fails: backend errors degrade the reply.
    pub async fn chat(&self, session_id: &str, raw_message: &str) -> ChatReply {
        if is_greeting(raw_message) {
            debug!("Greeting for session {session_id}");
            return ChatReply::canned(GREETING_REPLY);
        }

        if is_farewell(raw_message) {
            debug!("Farewell for session {session_id}");
            return ChatReply::canned(FAREWELL_REPLY);
        }

        let sanitized = self.store.sanitizer().clean(raw_message);
        let extracted = self.extractor.parse(&sanitized);
        let conversation = self
            .store
            .add_message(session_id, &sanitized, &extracted)
            .await;
        let prefs = &conversation.prefs;
        let hint = follow_up_hint(prefs);

        if !mentions_domain(&sanitized) && prefs.is_empty() {
            debug!("Off-topic message with empty profile; asking for preferences");
            return ChatReply {
                reply: CLARIFY_REPLY.to_string(),
                suggestions: Vec::new(),
                follow_up_hint: hint,
            };
        }

        let suggestions = self.retrieval.get_suggestions(prefs, &sanitized).await;
        let prompt = build_chat_prompt(&conversation.summary, &suggestions, &sanitized);

        let reply = match self.generator.generate(&prompt, self.config.max_tokens).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Generation returned no text; using fallback reply");
                fallback_reply(&suggestions, self.config.fallback_suggestions)
            }
            Err(err) => {
                warn!("Generation failed: {err}; using fallback reply");
                fallback_reply(&suggestions, self.config.fallback_suggestions)
            }
        };

        ChatReply {
            reply: with_tail(reply, &suggestions, self.config.tail_suggestions),
            suggestions,
            follow_up_hint: hint,
        }
    }
}
