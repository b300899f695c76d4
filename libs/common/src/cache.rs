//! Process-lifetime cache for remote media listings
//!
//! This module provides the listing cache shared across catalog requests.
//! Entries are keyed by media-source reference and live for the lifetime of
//! the process: there is no eviction and no TTL, so the first successful
//! listing for a reference wins until restart. New files added to a remote
//! folder after that first listing will not appear until the service is
//! restarted; this staleness is an accepted simplification for a small,
//! human-curated catalog.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process cache of successful remote listings, safe under concurrent
/// catalog requests
///
/// Callers use a read-check-then-write-on-miss pattern: [`get`], then compute
/// the listing, then [`insert`]. Two requests racing on the same cold key may
/// both perform the remote listing; the first insert wins and both observe a
/// consistent value.
///
/// [`get`]: ListingCache::get
/// [`insert`]: ListingCache::insert
pub struct ListingCache<V> {
    entries: RwLock<HashMap<String, Arc<V>>>,
}

impl<V> ListingCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the cached listing for a media-source reference
    pub async fn get(&self, key: &str) -> Option<Arc<V>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a listing for a media-source reference
    ///
    /// Returns the stored value: the existing entry if another request got
    /// there first, otherwise the one passed in.
    pub async fn insert(&self, key: &str, value: V) -> Arc<V> {
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(key) {
            debug!("Listing cache entry for {} already populated", key);
            return existing.clone();
        }
        let value = Arc::new(value);
        entries.insert(key.to_string(), value.clone());
        value
    }

    /// Number of cached listings
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no listings
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V> Default for ListingCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
