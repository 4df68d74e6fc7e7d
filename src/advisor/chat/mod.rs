//! Chat orchestration: gates, retrieval, generation and reply assembly.

pub mod orchestrator;
pub mod replies;

pub use orchestrator::{ChatOrchestrator, ChatReply};
