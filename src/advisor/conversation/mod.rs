//! Bounded conversation memory keyed by session.

pub mod state;
pub mod store;

pub use state::{Conversation, HistoryLimits, SUMMARY_MARKER};
pub use store::{ANONYMOUS_SESSION, ConversationStore};
