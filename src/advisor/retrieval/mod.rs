//! Product retrieval: catalog abstraction, TTL caching and hybrid search.

pub mod cache;
pub mod catalog;
pub mod hybrid_search;
pub mod reason;

pub use cache::{CacheStats, TtlCache};
pub use catalog::{ProductCatalog, SearchFuture};
pub use hybrid_search::{Branch, RetrievalEngine};
pub use reason::{overlap_count, overlap_reason};
