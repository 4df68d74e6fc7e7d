//! Per-session conversation state with bounded, self-summarizing history.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::advisor::core::config::ConversationConfig;
use crate::advisor::core::slots::Slots;
use crate::advisor::extract::profile::merge;
use crate::advisor::extract::sanitize::Sanitizer;

/// Prefix of the history entry that replaces summarized messages.
pub const SUMMARY_MARKER: &str = "(summary) ";

/// Bounds applied to a conversation's history.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistoryLimits {
    /// History length that triggers summarization once exceeded.
    pub max_history: usize,
    /// Below this many entries summarization is skipped.
    pub min_to_summarize: usize,
    /// Raw messages kept after the summary marker.
    pub keep_recent: usize,
    /// Inactivity window.
    pub ttl: ChronoDuration,
}

impl HistoryLimits {
    /// Derive limits from the conversation config.
    #[must_use]
    pub fn from_config(config: &ConversationConfig) -> Self {
        Self {
            max_history: config.max_history,
            min_to_summarize: config.min_history_to_summarize,
            keep_recent: config.keep_recent,
            ttl: ChronoDuration::from_std(config.ttl())
                .unwrap_or_else(|_| ChronoDuration::days(365)),
        }
    }
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self::from_config(&ConversationConfig::default())
    }
}

/// Conversation state for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Sanitized messages, oldest first.
    pub history: Vec<String>,
    /// Rolling profile summary.
    pub summary: String,
    /// Preferences merged across turns.
    pub prefs: Slots,
    /// Number of messages added.
    pub turn_count: u64,
    /// Instant after which the conversation is considered stale.
    pub expires_at: DateTime<Utc>,
    #[serde(skip)]
    limits: HistoryLimits,
}

impl Conversation {
    /// Start an empty conversation with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(HistoryLimits::default())
    }

    /// Start an empty conversation with explicit limits.
    #[must_use]
    pub fn with_limits(limits: HistoryLimits) -> Self {
        Self {
            history: Vec::new(),
            summary: String::new(),
            prefs: Slots::default(),
            turn_count: 0,
            expires_at: Utc::now() + limits.ttl,
            limits,
        }
    }

    /// Whether the conversation has passed its expiry at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Record a user message and the preferences extracted from it.
    ///
    /// Returns the sanitized text that was stored.
    pub fn add_message(&mut self, raw: &str, extracted: &Slots, sanitizer: &Sanitizer) -> String {
        let clean = sanitizer.clean(raw);
        self.prefs = merge(&self.prefs, extracted);
        self.history.push(clean.clone());
        self.turn_count += 1;
        self.expires_at = Utc::now() + self.limits.ttl;

        if self.history.len() > self.limits.max_history {
            self.summarize();
        }

        clean
    }

    /// Collapse history into a profile summary plus the most recent messages.
    pub fn summarize(&mut self) {
        if self.history.len() < self.limits.min_to_summarize {
            return;
        }

        self.summary = self
            .prefs
            .iter_filled()
            .map(|(category, values)| format!("{}={}", category.as_str(), values.join(",")))
            .collect::<Vec<_>>()
            .join(" | ");

        let keep_from = self.history.len().saturating_sub(self.limits.keep_recent);
        let mut history = Vec::with_capacity(self.limits.keep_recent + 1);
        history.push(format!("{SUMMARY_MARKER}{}", self.summary));
        history.extend(self.history.drain(keep_from..));
        self.history = history;

        info!(
            "Summarized conversation at turn {} ({} chars)",
            self.turn_count,
            self.summary.len()
        );
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::core::slots::SlotCategory;

    fn sanitizer() -> Sanitizer {
        Sanitizer::new(800).unwrap()
    }

    fn floral() -> Slots {
        let mut slots = Slots::default();
        slots.insert(SlotCategory::Accords, "Floral");
        slots
    }

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.history.is_empty());
        assert!(conversation.prefs.is_empty());
        assert_eq!(conversation.turn_count, 0);
        assert!(conversation.expires_at > Utc::now());
    }

    #[test]
    fn test_add_message_sanitizes_and_merges() {
        let mut conversation = Conversation::new();
        let stored = conversation.add_message(
            "algo floral, me liga (11) 98765-4321",
            &floral(),
            &sanitizer(),
        );

        assert_eq!(stored, "algo floral, me liga");
        assert_eq!(conversation.history, vec!["algo floral, me liga"]);
        assert_eq!(conversation.prefs.accords, vec!["Floral"]);
        assert_eq!(conversation.turn_count, 1);

        conversation.add_message("de novo", &floral(), &sanitizer());
        assert_eq!(conversation.prefs.accords, vec!["Floral"]);
        assert_eq!(conversation.turn_count, 2);
    }

    #[test]
    fn test_history_bounded_after_thirteen_messages() {
        let mut conversation = Conversation::new();
        let s = sanitizer();
        for i in 0..12 {
            conversation.add_message(&format!("mensagem {i}"), &floral(), &s);
        }
        assert_eq!(conversation.history.len(), 12);
        assert!(conversation.summary.is_empty());

        conversation.add_message("mensagem 12", &Slots::default(), &s);
        assert_eq!(conversation.history.len(), 3);
        assert_eq!(conversation.summary, "Accords=Floral");
        assert_eq!(conversation.history[0], "(summary) Accords=Floral");
        assert_eq!(conversation.history[1], "mensagem 11");
        assert_eq!(conversation.history[2], "mensagem 12");
        assert_eq!(conversation.turn_count, 13);
    }

    #[test]
    fn test_summary_lists_categories_in_stable_order() {
        let mut conversation = Conversation::new();
        let mut prefs = Slots::default();
        prefs.insert(SlotCategory::Budget, "Médio");
        prefs.insert(SlotCategory::Occasions, "Trabalho");
        prefs.insert(SlotCategory::Occasions, "Festa");
        prefs.insert(SlotCategory::Accords, "Floral");
        conversation.add_message("primeira", &prefs, &sanitizer());
        for i in 0..6 {
            conversation.add_message(&format!("m{i}"), &Slots::default(), &sanitizer());
        }

        conversation.summarize();
        assert_eq!(
            conversation.summary,
            "Occasions=Trabalho,Festa | Accords=Floral | Budget=Médio"
        );
    }

    #[test]
    fn test_summarize_skips_short_history() {
        let mut conversation = Conversation::new();
        for i in 0..5 {
            conversation.add_message(&format!("m{i}"), &floral(), &sanitizer());
        }
        conversation.summarize();
        assert_eq!(conversation.history.len(), 5);
        assert!(conversation.summary.is_empty());
    }

    #[test]
    fn test_expiry() {
        let limits = HistoryLimits {
            ttl: ChronoDuration::seconds(10),
            ..HistoryLimits::default()
        };
        let conversation = Conversation::with_limits(limits);
        assert!(!conversation.is_expired_at(Utc::now()));
        assert!(conversation.is_expired_at(Utc::now() + ChronoDuration::seconds(11)));
    }
}
