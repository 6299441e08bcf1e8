// ABOUTME: In-memory override store with LRU eviction
// ABOUTME: Process-local backend for tests and single-session CLI use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::num::NonZeroUsize;
use std::sync::Arc;

use larder_core::constants::overrides::DEFAULT_MEMORY_CAPACITY;
use larder_core::errors::AppResult;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::warn;

use super::OverrideStore;

/// In-memory override store
///
/// Uses `Arc<RwLock<LruCache>>` so clones share one map. When capacity is
/// reached the least recently used key is evicted and logged at `warn`. The
/// checked and hidden sets of a list are separate keys, so eviction can drop
/// one without the other; use the `SQLite` backend when state must survive.
#[derive(Clone)]
pub struct InMemoryOverrideStore {
    store: Arc<RwLock<LruCache<String, Vec<u8>>>>,
}

impl InMemoryOverrideStore {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MEMORY_CAPACITY) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    /// Create a store holding at most `capacity` keys (zero falls back to the default)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Number of keys currently held
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryOverrideStore {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAPACITY)
    }
}

#[async_trait::async_trait]
impl OverrideStore for InMemoryOverrideStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        // `LruCache::get` promotes the entry, so it needs the write lock
        let mut store = self.store.write().await;
        Ok(store.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> AppResult<()> {
        let mut store = self.store.write().await;
        if let Some((evicted, _)) = store.push(key.to_owned(), value) {
            if evicted != key {
                warn!(
                    store.key = %evicted,
                    capacity = store.cap().get(),
                    "Override store full, evicted least recently used entry"
                );
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.store.write().await.pop(key);
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
