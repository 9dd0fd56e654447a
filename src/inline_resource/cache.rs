//! Remote content cache
//!
//! An explicit, cheaply cloneable cache of fetched remote resources keyed by
//! normalized URL. Whoever constructs it owns its lifetime: create one per pass
//! for pass-scoped caching, or share one across passes for the whole process.
//! Entries never expire.

use dashmap::DashMap;
use std::sync::Arc;

use crate::utils::normalize_url_for_cache;

#[derive(Debug, Clone, Default)]
pub struct RemoteCache {
    entries: Arc<DashMap<String, Arc<str>>>,
}

impl RemoteCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<Arc<str>> {
        self.entries
            .get(&normalize_url_for_cache(url))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Store content for `url`, replacing any earlier entry
    pub fn insert(&self, url: &str, content: Arc<str>) {
        self.entries.insert(normalize_url_for_cache(url), content);
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(&normalize_url_for_cache(url))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
