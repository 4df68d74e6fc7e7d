//! Prompt construction for the generative backend.

pub mod prompt_builder;

pub use prompt_builder::{INSTRUCTIONS, build_chat_prompt};
