//! Preference extraction: keyword rules, profile operations and sanitization.

pub mod keyword_table;
pub mod profile;
pub mod sanitize;
pub mod slot_extractor;

pub use keyword_table::{KeywordRule, default_rules};
pub use profile::{
    build_search_query, canonical_profile, follow_up_hint, follow_up_question, merge,
    next_missing, profile_hash,
};
pub use sanitize::Sanitizer;
pub use slot_extractor::SlotExtractor;
