//! Catalog records and recommendation cards.

use serde::{Deserialize, Serialize};

/// A catalog product as returned by the search collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// URL slug.
    pub slug: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail_url: String,
    /// Price in the store currency.
    pub price: f64,
    /// Occasion tags.
    #[serde(default)]
    pub occasions: Vec<String>,
    /// Season tags.
    #[serde(default)]
    pub seasons: Vec<String>,
    /// Accord tags.
    #[serde(default)]
    pub accords: Vec<String>,
}

/// A recommendation card surfaced to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Catalog identifier.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// URL slug.
    pub slug: String,
    /// Thumbnail image URL.
    pub thumbnail_url: String,
    /// Price in the store currency.
    pub price: f64,
    /// Why the product fits the user's profile.
    pub reason: String,
}

impl Suggestion {
    /// Build a card from a product and its compatibility reason.
    #[must_use]
    pub fn from_product(product: Product, reason: impl Into<String>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            brand: product.brand,
            slug: product.slug,
            thumbnail_url: product.thumbnail_url,
            price: product.price,
            reason: reason.into(),
        }
    }
}

/// Ordering requested from the full-text search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Best text match first.
    #[default]
    Relevance,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently added first.
    Newest,
}

/// One page of full-text search results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Total number of matches across all pages.
    pub total: usize,
}
