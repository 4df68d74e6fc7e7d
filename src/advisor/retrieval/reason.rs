//! Compatibility reasons attached to suggestions.

use crate::advisor::core::product::Product;
use crate::advisor::core::slots::Slots;

/// Reason when no preference overlaps the product tags.
pub const GENERAL_MATCH: &str = "general profile match";
/// Suffix for suggestions found by vector similarity.
pub const SEMANTIC_SUFFIX: &str = " • semantic similarity with your query";
/// Suffix for suggestions found by direct accord matching.
pub const ACCORD_SUFFIX: &str = " • direct accord match";

/// Count case-insensitive overlaps between the profile and the product tags.
///
/// Occasions, seasons and accords are compared pairwise.
#[must_use]
pub fn overlap_count(slots: &Slots, product: &Product) -> usize {
    let pairs = [
        (&slots.occasions, &product.occasions),
        (&slots.seasons, &product.seasons),
        (&slots.accords, &product.accords),
    ];

    pairs
        .into_iter()
        .map(|(wanted, tags)| {
            wanted
                .iter()
                .filter(|value| tags.iter().any(|tag| tag.to_lowercase() == value.to_lowercase()))
                .count()
        })
        .sum()
}

/// Human-readable overlap reason.
#[must_use]
pub fn overlap_reason(slots: &Slots, product: &Product) -> String {
    match overlap_count(slots, product) {
        0 => GENERAL_MATCH.to_string(),
        1 => "1 compatibility point with your preferences".to_string(),
        n => format!("{n} compatibility points with your preferences"),
    }
}
