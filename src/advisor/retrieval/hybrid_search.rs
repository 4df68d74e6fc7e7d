//! Hybrid product retrieval.
//!
//! Full-text search, embedding similarity and direct accord matching run
//! concurrently; their results are merged in completion order, deduplicated by
//! product id and cached per profile.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::advisor::core::config::{CacheConfig, RetrievalConfig};
use crate::advisor::core::errors::{AdvisorError, AdvisorResult};
use crate::advisor::core::product::{Product, SortMode, Suggestion};
use crate::advisor::core::slots::Slots;
use crate::advisor::embedding::embedder::QueryEmbedder;
use crate::advisor::extract::profile::{build_search_query, profile_hash};
use crate::advisor::retrieval::cache::{CacheStats, TtlCache};
use crate::advisor::retrieval::catalog::ProductCatalog;
use crate::advisor::retrieval::reason::{ACCORD_SUFFIX, SEMANTIC_SUFFIX, overlap_reason};

/// Retrieval strategy feeding the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Composed-query full-text search.
    FullText,
    /// Nearest neighbours of the embedded query.
    Embedding,
    /// Full-text search over the accord preferences only.
    DirectAccord,
}

impl Branch {
    /// Stable branch name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullText => "full_text",
            Self::Embedding => "embedding",
            Self::DirectAccord => "direct_accord",
        }
    }
}

/// Hybrid retrieval engine with per-profile result caches.
pub struct RetrievalEngine {
    catalog: Arc<dyn ProductCatalog>,
    embedder: Option<Arc<dyn QueryEmbedder>>,
    top_k: usize,
    branch_timeout: Option<Duration>,
    suggestions: TtlCache<Vec<Suggestion>>,
    recommendations: TtlCache<Vec<Suggestion>>,
}

impl RetrievalEngine {
    /// Create an engine with caches built from config.
    ///
    /// Without an embedder the engine runs in full-text only mode.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        embedder: Option<Arc<dyn QueryEmbedder>>,
        retrieval: &RetrievalConfig,
        cache: &CacheConfig,
    ) -> Self {
        let (suggestions, recommendations) = if cache.enabled {
            (
                TtlCache::new(
                    Duration::from_secs(cache.suggestions_ttl_seconds),
                    cache.max_entries,
                ),
                TtlCache::new(
                    Duration::from_secs(cache.recommendations_ttl_seconds),
                    cache.max_entries,
                ),
            )
        } else {
            (TtlCache::disabled(), TtlCache::disabled())
        };

        Self::with_caches(catalog, embedder, retrieval, suggestions, recommendations)
    }

    /// Create an engine around caller-supplied caches.
    #[must_use]
    pub fn with_caches(
        catalog: Arc<dyn ProductCatalog>,
        embedder: Option<Arc<dyn QueryEmbedder>>,
        retrieval: &RetrievalConfig,
        suggestions: TtlCache<Vec<Suggestion>>,
        recommendations: TtlCache<Vec<Suggestion>>,
    ) -> Self {
        Self {
            catalog,
            embedder,
            top_k: retrieval.top_k,
            branch_timeout: retrieval.branch_timeout(),
            suggestions,
            recommendations,
        }
    }

    /// Whether the embedding branch is available.
    #[must_use]
    pub const fn is_hybrid(&self) -> bool {
        self.embedder.is_some()
    }

    /// Suggestions for a profile and message, at most `top_k`, never failing.
    ///
    /// Results are cached by profile fingerprint; the message only shapes the
    /// query of a cache miss.
    pub async fn get_suggestions(&self, slots: &Slots, raw_message: &str) -> Vec<Suggestion> {
        let key = profile_hash(slots);
        if let Some(cached) = self.suggestions.get(&key) {
            debug!("Suggestion cache hit for profile {key}");
            return cached;
        }
        debug!("Suggestion cache miss for profile {key}");

        let query = build_search_query(slots, raw_message).trim().to_string();
        let mut merged = match &self.embedder {
            None => {
                let hits = self.full_text(slots, &query).await;
                absorb(Branch::FullText, hits)
            }
            Some(embedder) => self.fan_out(slots, &query, embedder.as_ref()).await,
        };
        merged.truncate(self.top_k);

        self.suggestions.insert(&key, merged.clone());
        merged
    }

    /// Single-strategy recommendations for a profile, cached separately.
    pub async fn recommend(&self, slots: &Slots) -> Vec<Suggestion> {
        let key = profile_hash(slots);
        if let Some(cached) = self.recommendations.get(&key) {
            debug!("Recommendation cache hit for profile {key}");
            return cached;
        }

        let query = build_search_query(slots, "").trim().to_string();
        let mut hits = absorb(Branch::FullText, self.full_text(slots, &query).await);
        hits.truncate(self.top_k);

        self.recommendations.insert(&key, hits.clone());
        hits
    }

    /// Entry counts of both caches.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            suggestion_entries: self.suggestions.len(),
            recommendation_entries: self.recommendations.len(),
        }
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.suggestions.clear();
        self.recommendations.clear();
    }

    async fn fan_out(
        &self,
        slots: &Slots,
        query: &str,
        embedder: &dyn QueryEmbedder,
    ) -> Vec<Suggestion> {
        let mut pending: FuturesUnordered<BoxFuture<'_, (Branch, AdvisorResult<Vec<Suggestion>>)>> =
            FuturesUnordered::new();
        pending.push(
            self.full_text(slots, query)
                .map(|hits| (Branch::FullText, hits))
                .boxed(),
        );
        pending.push(
            self.semantic(slots, query, embedder)
                .map(|hits| (Branch::Embedding, hits))
                .boxed(),
        );
        pending.push(
            self.direct_accord(slots)
                .map(|hits| (Branch::DirectAccord, hits))
                .boxed(),
        );

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        while let Some((branch, hits)) = pending.next().await {
            let hits = absorb(branch, hits);
            debug!("Branch {} returned {} suggestions", branch.name(), hits.len());
            merged.extend(hits.into_iter().filter(|hit| seen.insert(hit.id)));
        }
        merged
    }

    async fn full_text(&self, slots: &Slots, query: &str) -> AdvisorResult<Vec<Suggestion>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let page = self
            .bounded(
                Branch::FullText,
                self.catalog
                    .search_products(query, self.top_k, 0, SortMode::Relevance),
            )
            .await?;
        Ok(annotate(slots, page.products, ""))
    }

    async fn semantic(
        &self,
        slots: &Slots,
        query: &str,
        embedder: &dyn QueryEmbedder,
    ) -> AdvisorResult<Vec<Suggestion>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let products = self
            .bounded(Branch::Embedding, async {
                let vector = embedder.embed_query(query).await?;
                self.catalog
                    .find_similar_by_embedding(vector, self.top_k)
                    .await
            })
            .await?;
        Ok(annotate(slots, products, SEMANTIC_SUFFIX))
    }

    async fn direct_accord(&self, slots: &Slots) -> AdvisorResult<Vec<Suggestion>> {
        if slots.accords.is_empty() {
            return Ok(Vec::new());
        }

        let query = slots.accords.join(" OR ");
        let page = self
            .bounded(
                Branch::DirectAccord,
                self.catalog
                    .search_products(&query, self.top_k, 0, SortMode::Relevance),
            )
            .await?;
        Ok(annotate(slots, page.products, ACCORD_SUFFIX))
    }

    async fn bounded<T>(
        &self,
        branch: Branch,
        call: impl Future<Output = AdvisorResult<T>>,
    ) -> AdvisorResult<T> {
        match self.branch_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AdvisorError::BranchTimeout(branch.name()))?,
            None => call.await,
        }
    }
}

fn annotate(slots: &Slots, products: Vec<Product>, suffix: &str) -> Vec<Suggestion> {
    products
        .into_iter()
        .map(|product| {
            let reason = format!("{}{suffix}", overlap_reason(slots, &product));
            Suggestion::from_product(product, reason)
        })
        .collect()
}

fn absorb(branch: Branch, result: AdvisorResult<Vec<Suggestion>>) -> Vec<Suggestion> {
    result.unwrap_or_else(|err| {
        warn!("Retrieval branch {} failed: {err}", branch.name());
        Vec::new()
    })
}
