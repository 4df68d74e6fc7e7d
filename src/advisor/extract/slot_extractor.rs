//! Rule-driven slot extraction.

use regex::Regex;
use tracing::debug;

use crate::advisor::core::errors::AdvisorResult;
use crate::advisor::core::slots::{SlotCategory, Slots};
use crate::advisor::extract::keyword_table::{KeywordRule, default_rules};

/// A keyword rule with its compiled pattern.
struct CompiledRule {
    category: SlotCategory,
    pattern: Regex,
    label: String,
}

/// Stateless parser turning free text into preference slots.
pub struct SlotExtractor {
    rules: Vec<CompiledRule>,
}

impl SlotExtractor {
    /// Create an extractor over the default keyword table.
    ///
    /// # Errors
    /// Returns an error if any default pattern is invalid.
    pub fn new() -> AdvisorResult<Self> {
        Self::with_rules(default_rules())
    }

    /// Create an extractor over a custom keyword table.
    ///
    /// Rules are evaluated in the order given; within a category the first
    /// matching rule decides the first value.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn with_rules(rules: impl IntoIterator<Item = KeywordRule>) -> AdvisorResult<Self> {
        let mut compiled = Vec::new();
        for rule in rules {
            let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", rule.pattern))?;
            compiled.push(CompiledRule {
                category: rule.category,
                pattern,
                label: rule.label,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// Number of loaded rules.
    #[must_use]
    pub const fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Extract canonical preference labels from a message.
    #[must_use]
    pub fn parse(&self, message: &str) -> Slots {
        let text = message.to_lowercase();
        let mut slots = Slots::default();
        if text.trim().is_empty() {
            return slots;
        }

        for rule in &self.rules {
            if rule.pattern.is_match(&text) {
                slots.insert(rule.category, rule.label.clone());
            }
        }

        debug!(
            "Extracted {} preference categories from message",
            slots.iter_filled().count()
        );
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SlotExtractor {
        SlotExtractor::new().unwrap()
    }

    #[test]
    fn test_parse_work_floral_medium_budget() {
        let slots = extractor().parse("quero algo floral para o trabalho, orçamento médio");
        assert_eq!(slots.accords, vec!["Floral"]);
        assert_eq!(slots.occasions, vec!["Trabalho"]);
        assert_eq!(slots.budget, vec!["Médio"]);
        assert!(slots.climate.is_empty());
        assert!(slots.notes.is_empty());
    }

    #[test]
    fn test_parse_is_case_insensitive_and_canonicalizes() {
        let slots = extractor().parse("Algo AMADEIRADO e Cítrico, bem MARCANTE, pro Inverno");
        assert_eq!(slots.accords, vec!["Amadeirado", "Cítrico"]);
        assert_eq!(slots.intensity, vec!["Intensa"]);
        assert_eq!(slots.seasons, vec!["Inverno"]);
    }

    #[test]
    fn test_parse_deduplicates_variants_of_same_label() {
        let slots = extractor().parse("gosto de flores, perfume floral, bem florado");
        assert_eq!(slots.accords, vec!["Floral"]);
    }

    #[test]
    fn test_parse_respects_word_boundaries() {
        let slots = extractor().parse("uma pessoa generosa e carinhosa");
        assert!(slots.notes.is_empty());
        assert!(slots.budget.is_empty());
    }

    #[test]
    fn test_parse_ignores_cara_as_interjection() {
        let slots = extractor().parse("cara, quero um perfume floral");
        assert!(slots.budget.is_empty());
        assert_eq!(slots.accords, vec!["Floral"]);

        assert_eq!(extractor().parse("pode ser um perfume caro").budget, vec!["Premium"]);
        assert_eq!(extractor().parse("algo mais cara que isso").budget, vec!["Premium"]);
    }

    #[test]
    fn test_parse_notes_and_gender() {
        let slots = extractor().parse("presente para minha esposa, com baunilha e rosas");
        assert_eq!(slots.gender, vec!["Feminino"]);
        assert_eq!(slots.notes, vec!["Baunilha", "Rosa"]);
    }

    #[test]
    fn test_parse_empty_message() {
        assert!(extractor().parse("   ").is_empty());
    }

    #[test]
    fn test_custom_rules() {
        let rules = vec![KeywordRule::new(SlotCategory::Notes, r"figo", "Figo")];
        let extractor = SlotExtractor::with_rules(rules).unwrap();
        assert_eq!(extractor.rule_count(), 1);
        assert_eq!(extractor.parse("notas de figo").notes, vec!["Figo"]);
    }

    #[test]
    fn test_invalid_custom_rule() {
        let rules = vec![KeywordRule::new(SlotCategory::Notes, r"(", "Broken")];
        assert!(SlotExtractor::with_rules(rules).is_err());
    }
}
