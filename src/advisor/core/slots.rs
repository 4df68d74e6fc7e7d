//! Preference slots extracted from the conversation.
//!
//! A [`Slots`] value holds one ordered, duplicate-free list of canonical labels
//! per [`SlotCategory`]. Values are always display labels such as `"Floral"`,
//! never the raw keyword the user typed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named preference category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SlotCategory {
    /// Where or when the fragrance will be worn.
    Occasions,
    /// Weather the fragrance should suit.
    Climate,
    /// Seasons of the year.
    Seasons,
    /// Projection / strength.
    Intensity,
    /// Olfactory families.
    Accords,
    /// Price band.
    Budget,
    /// Desired lasting power.
    Longevity,
    /// Target audience.
    Gender,
    /// Specific notes (vanilla, rose, ...).
    Notes,
}

impl SlotCategory {
    /// Every category in canonical storage order.
    pub const ALL: [Self; 9] = [
        Self::Occasions,
        Self::Climate,
        Self::Seasons,
        Self::Intensity,
        Self::Accords,
        Self::Budget,
        Self::Longevity,
        Self::Gender,
        Self::Notes,
    ];

    /// Order in which missing categories are asked about. Notes is never asked.
    pub const PRIORITY: [Self; 8] = [
        Self::Occasions,
        Self::Climate,
        Self::Intensity,
        Self::Accords,
        Self::Budget,
        Self::Longevity,
        Self::Seasons,
        Self::Gender,
    ];

    /// Display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Occasions => "Occasions",
            Self::Climate => "Climate",
            Self::Seasons => "Seasons",
            Self::Intensity => "Intensity",
            Self::Accords => "Accords",
            Self::Budget => "Budget",
            Self::Longevity => "Longevity",
            Self::Gender => "Gender",
            Self::Notes => "Notes",
        }
    }

    /// Two-letter code used when fingerprinting a profile.
    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::Occasions => "oc",
            Self::Climate => "cl",
            Self::Seasons => "se",
            Self::Intensity => "in",
            Self::Accords => "ac",
            Self::Budget => "bu",
            Self::Longevity => "lo",
            Self::Gender => "ge",
            Self::Notes => "no",
        }
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| value.to_string())
    }
}

/// Ordered, duplicate-free preference values per category.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Slots {
    /// Occasion labels.
    #[serde(default)]
    pub occasions: Vec<String>,
    /// Climate labels.
    #[serde(default)]
    pub climate: Vec<String>,
    /// Season labels.
    #[serde(default)]
    pub seasons: Vec<String>,
    /// Intensity labels.
    #[serde(default)]
    pub intensity: Vec<String>,
    /// Accord labels.
    #[serde(default)]
    pub accords: Vec<String>,
    /// Budget labels.
    #[serde(default)]
    pub budget: Vec<String>,
    /// Longevity labels.
    #[serde(default)]
    pub longevity: Vec<String>,
    /// Gender labels.
    #[serde(default)]
    pub gender: Vec<String>,
    /// Note labels.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Slots {
    /// Values stored for a category.
    #[must_use]
    pub fn get(&self, category: SlotCategory) -> &[String] {
        match category {
            SlotCategory::Occasions => &self.occasions,
            SlotCategory::Climate => &self.climate,
            SlotCategory::Seasons => &self.seasons,
            SlotCategory::Intensity => &self.intensity,
            SlotCategory::Accords => &self.accords,
            SlotCategory::Budget => &self.budget,
            SlotCategory::Longevity => &self.longevity,
            SlotCategory::Gender => &self.gender,
            SlotCategory::Notes => &self.notes,
        }
    }

    const fn values_mut(&mut self, category: SlotCategory) -> &mut Vec<String> {
        match category {
            SlotCategory::Occasions => &mut self.occasions,
            SlotCategory::Climate => &mut self.climate,
            SlotCategory::Seasons => &mut self.seasons,
            SlotCategory::Intensity => &mut self.intensity,
            SlotCategory::Accords => &mut self.accords,
            SlotCategory::Budget => &mut self.budget,
            SlotCategory::Longevity => &mut self.longevity,
            SlotCategory::Gender => &mut self.gender,
            SlotCategory::Notes => &mut self.notes,
        }
    }

    /// Append a value unless the category already holds it.
    ///
    /// Returns `true` when the value was added.
    pub fn insert(&mut self, category: SlotCategory, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.values_mut(category);
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// First value of a category, if any.
    #[must_use]
    pub fn first(&self, category: SlotCategory) -> Option<&str> {
        self.get(category).first().map(String::as_str)
    }

    /// Whether every category is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        SlotCategory::ALL
            .into_iter()
            .all(|category| self.get(category).is_empty())
    }

    /// Iterate over non-empty categories in canonical order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (SlotCategory, &[String])> {
        SlotCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, values)| !values.is_empty())
    }
}
