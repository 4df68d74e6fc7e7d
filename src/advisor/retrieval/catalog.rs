//! Product catalog abstraction consumed by retrieval.

use std::future::Future;
use std::pin::Pin;

use crate::advisor::core::errors::AdvisorResult;
use crate::advisor::core::product::{Product, SearchPage, SortMode};

/// Boxed future type for catalog operations.
pub type SearchFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstraction over the product search backend.
pub trait ProductCatalog: Send + Sync {
    /// Full-text search returning one page of products.
    ///
    /// # Errors
    /// Returns an error if the backend cannot answer the query.
    fn search_products(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
        sort: SortMode,
    ) -> SearchFuture<'_, AdvisorResult<SearchPage>>;

    /// Nearest products to an embedding vector, closest first.
    ///
    /// # Errors
    /// Returns an error if the backend cannot answer the query.
    fn find_similar_by_embedding(
        &self,
        vector: Vec<f64>,
        limit: usize,
    ) -> SearchFuture<'_, AdvisorResult<Vec<Product>>>;
}
