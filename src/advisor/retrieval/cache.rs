//! TTL cache for retrieval results.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe keyed cache whose entries expire after a fixed TTL.
pub struct TtlCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
    max_entries: usize,
    enabled: bool,
}

impl<T: Clone> TtlCache<T> {
    /// Create a cache holding at most `max_entries` values for `ttl` each.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
            enabled: true,
        }
    }

    /// Create a cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::ZERO,
            max_entries: 0,
            enabled: false,
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get an unexpired value. Expired entries are removed on access.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        self.entries.get(key).and_then(|entry| {
            if entry.is_expired() {
                drop(entry);
                self.entries.remove_if(key, |_, current| current.is_expired());
                None
            } else {
                Some(entry.data.clone())
            }
        })
    }

    /// Store a value, replacing any previous one under `key`.
    pub fn insert(&self, key: &str, value: T) {
        if !self.enabled {
            return;
        }

        self.enforce_max_entries();
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, self.ttl));
    }

    /// Number of stored entries, expired ones included until swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove expired entries.
    pub fn cleanup_expired(&self) {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.is_expired())
            .map(|entry| entry.key().clone())
            .collect();

        for key in expired_keys {
            self.entries.remove(&key);
        }
    }

    /// Make room for one more entry, expired entries first.
    fn enforce_max_entries(&self) {
        if self.entries.len() < self.max_entries {
            return;
        }

        self.cleanup_expired();

        if self.entries.len() >= self.max_entries {
            let to_remove = self.entries.len() - self.max_entries + 1;
            let keys: Vec<String> = self
                .entries
                .iter()
                .take(to_remove)
                .map(|entry| entry.key().clone())
                .collect();
            for key in keys {
                self.entries.remove(&key);
            }
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of hybrid suggestion entries.
    pub suggestion_entries: usize,
    /// Number of profile recommendation entries.
    pub recommendation_entries: usize,
}
