//! Session-keyed conversation store.
//!
//! One store-wide lock guards every session. Expiry is lazy: a stale
//! conversation is replaced the next time its session is touched.

use std::num::NonZeroUsize;

use chrono::Utc;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::advisor::conversation::state::{Conversation, HistoryLimits};
use crate::advisor::core::config::ConversationConfig;
use crate::advisor::core::errors::{AdvisorError, AdvisorResult};
use crate::advisor::core::slots::Slots;
use crate::advisor::extract::sanitize::Sanitizer;

/// Session id used when the caller supplies none.
pub const ANONYMOUS_SESSION: &str = "anon";

/// In-memory conversation store keyed by session id.
pub struct ConversationStore {
    sessions: Mutex<LruCache<String, Conversation>>,
    limits: HistoryLimits,
    sanitizer: Sanitizer,
}

impl ConversationStore {
    /// Create a store from config.
    ///
    /// # Errors
    /// Returns an error if the session capacity is zero or the sanitizer cannot be built.
    pub fn new(config: &ConversationConfig) -> AdvisorResult<Self> {
        let capacity = NonZeroUsize::new(config.max_sessions).ok_or_else(|| {
            AdvisorError::InvalidConfig("conversation.max_sessions must be > 0".to_string())
        })?;

        Ok(Self {
            sessions: Mutex::new(LruCache::new(capacity)),
            limits: HistoryLimits::from_config(config),
            sanitizer: Sanitizer::new(config.max_message_chars)?,
        })
    }

    /// Sanitizer applied to every stored message.
    #[must_use]
    pub const fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Run `f` against the session's conversation, creating or replacing it as needed.
    pub async fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Conversation) -> R,
    ) -> R {
        let key = session_key(session_id);
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;

        let stale = sessions
            .peek(key)
            .is_some_and(|conversation| conversation.is_expired_at(now));
        if stale {
            info!("Conversation for session {key} expired; starting a new one");
            sessions.pop(key);
        }

        let conversation =
            sessions.get_or_insert_mut(key.to_string(), || Conversation::with_limits(self.limits));
        f(conversation)
    }

    /// Add a message to the session and return the updated conversation.
    pub async fn add_message(&self, session_id: &str, raw: &str, extracted: &Slots) -> Conversation {
        let sanitizer = &self.sanitizer;
        self.with_session(session_id, |conversation| {
            conversation.add_message(raw, extracted, sanitizer);
            debug!("Conversation now at turn {}", conversation.turn_count);
            conversation.clone()
        })
        .await
    }

    /// Current conversation for a session, if one exists and has not expired.
    pub async fn snapshot(&self, session_id: &str) -> Option<Conversation> {
        let key = session_key(session_id);
        let sessions = self.sessions.lock().await;
        sessions
            .peek(key)
            .filter(|conversation| !conversation.is_expired_at(Utc::now()))
            .cloned()
    }

    /// Number of sessions held, including stale ones not yet replaced.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether no session is held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

fn session_key(session_id: &str) -> &str {
    let trimmed = session_id.trim();
    if trimmed.is_empty() {
        ANONYMOUS_SESSION
    } else {
        trimmed
    }
}
