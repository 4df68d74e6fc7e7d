//! Pure operations over preference profiles.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::advisor::core::slots::{SlotCategory, Slots};

/// Categories appended to the search query, in precedence order.
const QUERY_PRECEDENCE: [SlotCategory; 6] = [
    SlotCategory::Gender,
    SlotCategory::Accords,
    SlotCategory::Occasions,
    SlotCategory::Seasons,
    SlotCategory::Climate,
    SlotCategory::Notes,
];

/// Merge two profiles: per category `a`'s values then `b`'s, deduplicated.
#[must_use]
pub fn merge(a: &Slots, b: &Slots) -> Slots {
    let mut merged = Slots::default();
    for category in SlotCategory::ALL {
        for value in a.get(category).iter().chain(b.get(category)) {
            merged.insert(category, value.as_str());
        }
    }
    merged
}

/// First category in priority order that holds no value.
///
/// Returns `None` once every askable category is filled.
#[must_use]
pub fn next_missing(slots: &Slots) -> Option<SlotCategory> {
    SlotCategory::PRIORITY
        .into_iter()
        .find(|category| slots.get(*category).is_empty())
}

/// Canonical text form of a profile, stable across runs.
///
/// Each value is prefixed with its byte length so labels containing the
/// separators cannot collide.
#[must_use]
pub fn canonical_profile(slots: &Slots) -> String {
    SlotCategory::ALL
        .into_iter()
        .map(|category| {
            let values = slots
                .get(category)
                .iter()
                .map(|value| format!("{}:{value}", value.len()))
                .collect::<Vec<_>>()
                .join(",");
            format!("{}:{values}", category.short_code())
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Deterministic fingerprint of a profile, used as a cache key.
#[must_use]
pub fn profile_hash(slots: &Slots) -> String {
    let mut hasher = DefaultHasher::new();
    canonical_profile(slots).hash(&mut hasher);
    let value = hasher.finish();
    format!("{value:016x}")
}

/// Full-text query: the message followed by the first value of the query categories.
#[must_use]
pub fn build_search_query(slots: &Slots, message: &str) -> String {
    let mut query = message.to_string();
    for value in QUERY_PRECEDENCE
        .into_iter()
        .filter_map(|category| slots.first(category))
    {
        if !query.is_empty() {
            query.push(' ');
        }
        query.push_str(value);
    }
    query
}

/// Clarifying question asked when a category is still missing.
#[must_use]
pub const fn follow_up_question(category: SlotCategory) -> &'static str {
    match category {
        SlotCategory::Occasions => {
            "Para qual ocasião você quer o perfume? Trabalho, dia a dia, festa ou encontro?"
        }
        SlotCategory::Climate => "Você vai usar mais em clima quente, frio ou ameno?",
        SlotCategory::Intensity => "Prefere algo suave, moderado ou mais intenso?",
        SlotCategory::Accords => {
            "Quais famílias olfativas te agradam? Floral, amadeirado, cítrico, doce..."
        }
        SlotCategory::Budget => "Qual faixa de preço você imagina: econômico, médio ou premium?",
        SlotCategory::Longevity => "Quanto tempo você gostaria que o perfume durasse na pele?",
        SlotCategory::Seasons => "Em qual estação do ano pretende usar mais?",
        SlotCategory::Gender => "É para você? Prefere uma fragrância feminina, masculina ou unissex?",
        SlotCategory::Notes => "Tem alguma nota que você adora, como baunilha, rosa ou café?",
    }
}

/// Follow-up hint for a profile: the next clarifying question, or empty when complete.
#[must_use]
pub fn follow_up_hint(slots: &Slots) -> String {
    next_missing(slots)
        .map(follow_up_question)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(entries: &[(SlotCategory, &str)]) -> Slots {
        let mut slots = Slots::default();
        for (category, value) in entries {
            slots.insert(*category, *value);
        }
        slots
    }

    fn full_profile() -> Slots {
        slots(&[
            (SlotCategory::Occasions, "Trabalho"),
            (SlotCategory::Climate, "Quente"),
            (SlotCategory::Seasons, "Verão"),
            (SlotCategory::Intensity, "Suave"),
            (SlotCategory::Accords, "Cítrico"),
            (SlotCategory::Budget, "Médio"),
            (SlotCategory::Longevity, "Alta"),
            (SlotCategory::Gender, "Unissex"),
        ])
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = slots(&[
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Budget, "Médio"),
        ]);
        let b = slots(&[
            (SlotCategory::Accords, "Cítrico"),
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Occasions, "Trabalho"),
        ]);

        let once = merge(&a, &b);
        let twice = merge(&once, &b);
        assert_eq!(once, twice);
        assert_eq!(once.accords, vec!["Floral", "Cítrico"]);
        assert_eq!(once.occasions, vec!["Trabalho"]);
        assert_eq!(once.budget, vec!["Médio"]);
    }

    #[test]
    fn test_merge_never_duplicates() {
        let a = slots(&[(SlotCategory::Notes, "Rosa")]);
        let merged = merge(&a, &a);
        assert_eq!(merged.notes, vec!["Rosa"]);
    }

    #[test]
    fn test_merge_dedupes_values_already_in_first_profile() {
        let a = Slots {
            accords: vec!["Floral".to_string(), "Floral".to_string()],
            ..Slots::default()
        };
        let merged = merge(&a, &Slots::default());
        assert_eq!(merged.accords, vec!["Floral"]);
    }

    #[test]
    fn test_next_missing_follows_priority() {
        let mut profile = Slots::default();
        assert_eq!(next_missing(&profile), Some(SlotCategory::Occasions));

        profile.insert(SlotCategory::Occasions, "Trabalho");
        assert_eq!(next_missing(&profile), Some(SlotCategory::Climate));

        profile.insert(SlotCategory::Climate, "Frio");
        assert_eq!(next_missing(&profile), Some(SlotCategory::Intensity));

        profile.insert(SlotCategory::Seasons, "Inverno");
        assert_eq!(next_missing(&profile), Some(SlotCategory::Intensity));
    }

    #[test]
    fn test_next_missing_none_when_complete() {
        assert_eq!(next_missing(&full_profile()), None);
        assert!(follow_up_hint(&full_profile()).is_empty());
    }

    #[test]
    fn test_next_missing_ignores_notes() {
        let mut profile = full_profile();
        profile.notes.clear();
        assert_eq!(next_missing(&profile), None);
    }

    #[test]
    fn test_profile_hash_is_deterministic() {
        let profile = full_profile();
        assert_eq!(profile_hash(&profile), profile_hash(&profile.clone()));
        assert_eq!(profile_hash(&profile).len(), 16);
    }

    #[test]
    fn test_profile_hash_distinguishes_profiles() {
        let a = slots(&[(SlotCategory::Accords, "Floral")]);
        let b = slots(&[(SlotCategory::Notes, "Floral")]);
        let c = slots(&[
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Accords, "Doce"),
        ]);
        assert_ne!(profile_hash(&a), profile_hash(&b));
        assert_ne!(profile_hash(&a), profile_hash(&c));
        assert_ne!(profile_hash(&a), profile_hash(&Slots::default()));
    }

    #[test]
    fn test_canonical_profile_layout() {
        let profile = slots(&[
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Accords, "Doce"),
        ]);
        assert_eq!(
            canonical_profile(&profile),
            "oc:|cl:|se:|in:|ac:6:Floral,4:Doce|bu:|lo:|ge:|no:"
        );
    }

    #[test]
    fn test_profile_hash_separators_in_labels_do_not_collide() {
        let joined = slots(&[(SlotCategory::Accords, "Floral,Doce")]);
        let split = slots(&[
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Accords, "Doce"),
        ]);
        let piped = slots(&[(SlotCategory::Accords, "Floral|bu:Doce")]);
        let budget = slots(&[
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Budget, "Doce"),
        ]);
        assert_ne!(profile_hash(&joined), profile_hash(&split));
        assert_ne!(canonical_profile(&piped), canonical_profile(&budget));
    }

    #[test]
    fn test_build_search_query_precedence() {
        let profile = slots(&[
            (SlotCategory::Occasions, "Trabalho"),
            (SlotCategory::Accords, "Floral"),
            (SlotCategory::Accords, "Doce"),
            (SlotCategory::Gender, "Feminino"),
            (SlotCategory::Budget, "Médio"),
        ]);
        assert_eq!(
            build_search_query(&profile, "algo leve"),
            "algo leve Feminino Floral Trabalho"
        );
    }

    #[test]
    fn test_build_search_query_empty_inputs() {
        assert_eq!(build_search_query(&Slots::default(), ""), "");
        let profile = slots(&[(SlotCategory::Notes, "Baunilha")]);
        assert_eq!(build_search_query(&profile, ""), "Baunilha");
    }
}
