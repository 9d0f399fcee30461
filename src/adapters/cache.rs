use crate::domain::model::{RelatedKeywordRecord, SupplyCount};
use crate::domain::ports::{KeywordSource, SupplySource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Process-lifetime memo keyed by the exact input string. Only successful
/// responses are stored, so a failed lookup is attempted again next time.
#[derive(Debug)]
struct ResponseCache<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V: Clone> ResponseCache<V> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    async fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn put(&self, key: &str, value: V) {
        self.entries.lock().await.insert(key.to_string(), value);
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

pub struct CachedKeywordSource<K: KeywordSource> {
    inner: K,
    cache: ResponseCache<Vec<RelatedKeywordRecord>>,
}

impl<K: KeywordSource> CachedKeywordSource<K> {
    pub fn new(inner: K) -> Self {
        Self {
            inner,
            cache: ResponseCache::new(),
        }
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}

#[async_trait]
impl<K: KeywordSource> KeywordSource for CachedKeywordSource<K> {
    async fn related_keywords(&self, seed: &str) -> Result<Vec<RelatedKeywordRecord>> {
        if let Some(records) = self.cache.get(seed).await {
            tracing::debug!("Keyword cache hit for '{}'", seed);
            return Ok(records);
        }

        let records = self.inner.related_keywords(seed).await?;
        self.cache.put(seed, records.clone()).await;
        Ok(records)
    }
}

pub struct CachedSupplySource<S: SupplySource> {
    inner: S,
    cache: ResponseCache<SupplyCount>,
}

impl<S: SupplySource> CachedSupplySource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: ResponseCache::new(),
        }
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}

#[async_trait]
impl<S: SupplySource> SupplySource for CachedSupplySource<S> {
    async fn supply_count(&self, keyword: &str) -> Result<SupplyCount> {
        if let Some(count) = self.cache.get(keyword).await {
            tracing::debug!("Supply cache hit for '{}'", keyword);
            return Ok(count);
        }

        let count = self.inner.supply_count(keyword).await?;
        self.cache.put(keyword, count).await;
        Ok(count)
    }
}
