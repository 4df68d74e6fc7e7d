//! In-memory product catalog loaded from JSON.
//!
//! Full-text search scores products by query token overlap against their name,
//! brand and tags. `OR` between terms is accepted and treated as a separator,
//! so any matching term qualifies a product.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::advisor::core::errors::AdvisorResult;
use crate::advisor::core::product::{Product, SearchPage, SortMode};
use crate::advisor::retrieval::catalog::{ProductCatalog, SearchFuture};

/// Minimum token length considered by full-text search.
const MIN_TOKEN_CHARS: usize = 2;

/// A catalog record: the product plus an optional precomputed embedding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product fields.
    #[serde(flatten)]
    pub product: Product,
    /// Embedding used by similarity search.
    #[serde(default)]
    pub embedding: Option<Vec<f64>>,
}

/// Product catalog held in memory.
pub struct InMemoryCatalog {
    entries: Vec<IndexedEntry>,
}

struct IndexedEntry {
    entry: CatalogEntry,
    tokens: HashSet<String>,
}

impl InMemoryCatalog {
    /// Build a catalog from entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let tokens = product_tokens(&entry.product);
                IndexedEntry { entry, tokens }
            })
            .collect();
        Self { entries }
    }

    /// Parse a JSON array of catalog entries.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> AdvisorResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load a JSON catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> AdvisorResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;
        info!("Loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no product.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn search(&self, query: &str, limit: usize, offset: usize, sort: SortMode) -> SearchPage {
        let terms = query_tokens(query);
        if terms.is_empty() {
            return SearchPage::default();
        }

        let mut scored: Vec<(usize, &Product)> = self
            .entries
            .iter()
            .filter_map(|indexed| {
                let score = terms.iter().filter(|t| indexed.tokens.contains(*t)).count();
                (score > 0).then_some((score, &indexed.entry.product))
            })
            .collect();

        scored.sort_by(|(score_a, a), (score_b, b)| match sort {
            SortMode::Relevance => score_b.cmp(score_a).then(a.id.cmp(&b.id)),
            SortMode::PriceAsc => a.price.total_cmp(&b.price).then(a.id.cmp(&b.id)),
            SortMode::PriceDesc => b.price.total_cmp(&a.price).then(a.id.cmp(&b.id)),
            SortMode::Newest => b.id.cmp(&a.id),
        });

        SearchPage {
            total: scored.len(),
            products: scored
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(|(_, product)| product.clone())
                .collect(),
        }
    }

    fn similar(&self, vector: &[f64], limit: usize) -> Vec<Product> {
        let mut scored: Vec<(f64, &Product)> = self
            .entries
            .iter()
            .filter_map(|indexed| {
                let embedding = indexed.entry.embedding.as_deref()?;
                cosine_similarity(vector, embedding).map(|score| (score, &indexed.entry.product))
            })
            .collect();

        scored.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, product)| product.clone())
            .collect()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn search_products(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
        sort: SortMode,
    ) -> SearchFuture<'_, AdvisorResult<SearchPage>> {
        let page = self.search(query, limit, offset, sort);
        Box::pin(async move { Ok(page) })
    }

    fn find_similar_by_embedding(
        &self,
        vector: Vec<f64>,
        limit: usize,
    ) -> SearchFuture<'_, AdvisorResult<Vec<Product>>> {
        let products = self.similar(&vector, limit);
        Box::pin(async move { Ok(products) })
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
}

fn query_tokens(query: &str) -> HashSet<String> {
    query
        .split_whitespace()
        .filter(|word| *word != "OR")
        .flat_map(tokenize)
        .collect()
}

fn product_tokens(product: &Product) -> HashSet<String> {
    let mut tokens: HashSet<String> = tokenize(&product.name).collect();
    tokens.extend(tokenize(&product.brand));
    for tag in product
        .occasions
        .iter()
        .chain(&product.seasons)
        .chain(&product.accords)
    {
        tokens.extend(tokenize(tag));
    }
    tokens
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}
