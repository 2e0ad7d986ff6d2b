use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use super::base::Retriever;
use super::models::RetrievedDocument;
use crate::core::error::Result;

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

/// Memoizes ranked results per (query, top_k) for a bounded time.
pub struct CachedRetriever<R> {
    inner: R,
    cache: Mutex<LruCache<String, (Vec<RetrievedDocument>, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: Retriever> CachedRetriever<R> {
    pub fn new(inner: R, capacity: usize, ttl_secs: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn make_key(query: &str, top_k: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        hasher.update(top_k.to_le_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn get(&self, key: &str) -> Option<Vec<RetrievedDocument>> {
        let mut cache = self.cache.lock();
        let entry = cache
            .get(key)
            .map(|(documents, stored_at)| (stored_at.elapsed() < self.ttl).then(|| documents.clone()));
        let fresh = match entry {
            Some(Some(documents)) => Some(documents),
            Some(None) => {
                cache.pop(key);
                None
            }
            None => None,
        };

        let counter = if fresh.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        fresh
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        CacheStats {
            hits,
            misses,
            size: self.cache.lock().len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl<R: Retriever> Retriever for CachedRetriever<R> {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let key = Self::make_key(query, top_k);
        if let Some(documents) = self.get(&key) {
            debug!("Retrieval cache hit for '{}'", crate::safe_truncate(query, 50));
            return Ok(documents);
        }

        let documents = self.inner.search(query, top_k).await?;
        self.cache.lock().put(key, (documents.clone(), Instant::now()));
        Ok(documents)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
