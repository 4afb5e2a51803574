//! Keyed query cache with freshness windows and in-flight de-duplication.
//!
//! Every entry remembers when it was last written. A read is served from the
//! cache while the entry is younger than the caller's stale time; otherwise
//! the fetcher runs. Entries older than their gc time are dropped. Concurrent
//! fetches for the same key share one request.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lru::LruCache;
use marquee_core::config::CacheConfig;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::errors::{MovieSearchError, SharedSearchError};
use crate::query_keys::QueryKey;

/// Freshness and retention windows for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Cached data younger than this is returned without fetching
    pub stale_time: Duration,
    /// Cached data older than this is discarded
    pub gc_time: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(5 * 60),
        }
    }
}

impl QueryOptions {
    /// Options with the given freshness and retention windows.
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            stale_time,
            gc_time,
        }
    }

    /// Options for search result pages.
    pub fn search(config: &CacheConfig) -> Self {
        Self::new(config.search_stale_time, config.search_gc_time)
    }

    /// Options for detail records, prefetched or fetched directly.
    pub fn detail(config: &CacheConfig) -> Self {
        Self::new(config.detail_stale_time, config.detail_gc_time)
    }
}

/// Cache counters for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryCacheStats {
    /// Reads served from fresh entries
    pub hits: u64,
    /// Reads that started a new request
    pub misses: u64,
    /// Reads that joined a request already in flight
    pub deduplicated: u64,
    /// Entries dropped by gc or capacity
    pub evicted: u64,
    /// Entries currently cached
    pub entries: usize,
    /// Requests currently in flight
    pub in_flight: usize,
}

struct CacheEntry<V> {
    data: V,
    updated_at: Instant,
    gc_time: Duration,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        now.saturating_duration_since(self.updated_at) < stale_time
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.updated_at) >= self.gc_time
    }
}

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, SharedSearchError>>>;

struct CacheState<V> {
    entries: LruCache<QueryKey, CacheEntry<V>>,
    in_flight: HashMap<QueryKey, SharedFetch<V>>,
    stats: QueryCacheStats,
}

impl<V> CacheState<V> {
    fn collect_garbage(&mut self, now: Instant) -> usize {
        let expired: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.pop(key);
        }
        self.stats.evicted += expired.len() as u64;
        expired.len()
    }
}

/// Shared handle to a keyed cache of query results.
pub struct QueryCache<V> {
    state: Arc<Mutex<CacheState<V>>>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<V> std::fmt::Debug for QueryCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("QueryCache")
            .field("entries", &state.entries.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache holding at most `max_entries` results.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            state: Arc::new(Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                in_flight: HashMap::new(),
                stats: QueryCacheStats::default(),
            })),
        }
    }

    /// Returns fresh cached data for `key`, joins a request already in flight
    /// for `key`, or starts `fetcher` and caches its successful result.
    ///
    /// Failed fetches are not cached; every waiter receives the same error.
    ///
    /// # Errors
    /// - Whatever error the fetcher produced, shared between waiters
    pub async fn fetch_query<F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetcher: F,
    ) -> Result<V, SharedSearchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, MovieSearchError>> + Send + 'static,
    {
        let fetch = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let now = Instant::now();
            state.collect_garbage(now);

            if let Some(entry) = state.entries.get_mut(&key) {
                if entry.is_fresh(now, options.stale_time) {
                    entry.gc_time = entry.gc_time.max(options.gc_time);
                    state.stats.hits += 1;
                    tracing::trace!(%key, "query cache hit");
                    return Ok(entry.data.clone());
                }
            }

            match state.in_flight.get(&key) {
                Some(existing) => {
                    state.stats.deduplicated += 1;
                    tracing::trace!(%key, "joining in-flight query");
                    existing.clone()
                }
                None => {
                    state.stats.misses += 1;
                    tracing::debug!(%key, "fetching query");
                    let fetch = self.start_fetch(key.clone(), options, fetcher());
                    state.in_flight.insert(key, fetch.clone());
                    fetch
                }
            }
        };

        fetch.await
    }

    fn start_fetch<Fut>(&self, key: QueryKey, options: QueryOptions, request: Fut) -> SharedFetch<V>
    where
        Fut: Future<Output = Result<V, MovieSearchError>> + Send + 'static,
    {
        let shared_state = Arc::clone(&self.state);

        async move {
            let result = request.await.map_err(Arc::new);

            {
                let mut guard = shared_state.lock();
                let state = &mut *guard;
                state.in_flight.remove(&key);

                match &result {
                    Ok(data) => {
                        let entry = CacheEntry {
                            data: data.clone(),
                            updated_at: Instant::now(),
                            gc_time: options.gc_time,
                        };
                        if let Some((evicted, _)) = state.entries.push(key.clone(), entry) {
                            if evicted != key {
                                state.stats.evicted += 1;
                            }
                        }
                    }
                    Err(error) => tracing::debug!(%key, %error, "query failed"),
                }
            }

            result
        }
        .boxed()
        .shared()
    }

    /// Populates `key` in the background. Errors are logged and dropped; the
    /// task is never cancelled by newer queries.
    pub fn prefetch_query<F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetcher: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V, MovieSearchError>> + Send + 'static,
    {
        let cache = self.clone();
        tokio::spawn(async move {
            if let Err(error) = cache.fetch_query(key.clone(), options, fetcher).await {
                tracing::debug!(%key, %error, "prefetch failed");
            }
        })
    }

    /// Cached data for `key` regardless of freshness, if still retained.
    pub fn get_query_data(&self, key: &QueryKey) -> Option<V> {
        let mut state = self.state.lock();
        state.collect_garbage(Instant::now());
        state.entries.peek(key).map(|entry| entry.data.clone())
    }

    /// Drops every entry past its gc time and returns how many were dropped.
    pub fn garbage_collect(&self) -> usize {
        self.state.lock().collect_garbage(Instant::now())
    }

    /// Snapshot of entry counts and hit/miss counters.
    pub fn stats(&self) -> QueryCacheStats {
        let state = self.state.lock();
        QueryCacheStats {
            entries: state.entries.len(),
            in_flight: state.in_flight.len(),
            ..state.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_fetch(
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<u32, MovieSearchError>> {
        let calls = Arc::clone(calls);
        move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(value)
            }
            .boxed()
        }
    }

    fn key() -> QueryKey {
        QueryKey::search_result("matrix", 1)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_is_served_without_fetching() {
        let cache = QueryCache::new(10);
        let calls = Arc::new(AtomicUsize::new(0));
        let options = QueryOptions::new(Duration::from_secs(600), Duration::from_secs(3600));

        assert_eq!(cache.fetch_query(key(), options, counting_fetch(&calls, 1)).await.unwrap(), 1);
        assert_eq!(cache.fetch_query(key(), options, counting_fetch(&calls, 2)).await.unwrap(), 1);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_is_refetched() {
        let cache = QueryCache::new(10);
        let calls = Arc::new(AtomicUsize::new(0));
        let options = QueryOptions::default();

        cache.fetch_query(key(), options, counting_fetch(&calls, 1)).await.unwrap();
        let second = cache.fetch_query(key(), options, counting_fetch(&calls, 2)).await.unwrap();

        assert_eq!(second, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get_query_data(&key()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = QueryCache::new(10);
        let calls = Arc::new(AtomicUsize::new(0));
        let options = QueryOptions::default();

        let (first, second) = tokio::join!(
            cache.fetch_query(key(), options, counting_fetch(&calls, 7)),
            cache.fetch_query(key(), options, counting_fetch(&calls, 8)),
        );

        assert_eq!(first.unwrap(), 7);
        assert_eq!(second.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.deduplicated, 1);
        assert_eq!(stats.in_flight, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_gc_time() {
        let cache = QueryCache::new(10);
        let calls = Arc::new(AtomicUsize::new(0));
        let options = QueryOptions::new(Duration::ZERO, Duration::from_secs(60));

        cache.fetch_query(key(), options, counting_fetch(&calls, 3)).await.unwrap();
        assert_eq!(cache.get_query_data(&key()), Some(3));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get_query_data(&key()), None);
        assert_eq!(cache.stats().evicted, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_shared_and_not_cached() {
        let cache: QueryCache<u32> = QueryCache::new(10);
        let failing = || async {
            Err(MovieSearchError::NetworkError {
                reason: "connection refused".to_string(),
            })
        };

        let err = cache
            .fetch_query(key(), QueryOptions::default(), failing)
            .await
            .unwrap_err();
        assert!(matches!(*err, MovieSearchError::NetworkError { .. }));
        assert_eq!(cache.get_query_data(&key()), None);
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_prefetch_failure_is_swallowed() {
        let cache: QueryCache<u32> = QueryCache::new(10);
        let handle = cache.prefetch_query(
            QueryKey::movie_detail(1),
            QueryOptions::default(),
            || async {
                Err(MovieSearchError::NotFound {
                    resource: "movie/1".to_string(),
                })
            },
        );

        handle.await.unwrap();
        assert_eq!(cache.get_query_data(&QueryKey::movie_detail(1)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = QueryCache::new(2);
        let calls = Arc::new(AtomicUsize::new(0));
        let options = QueryOptions::default();

        for page in 1..=3 {
            cache
                .fetch_query(
                    QueryKey::search_result("alien", page),
                    options,
                    counting_fetch(&calls, page),
                )
                .await
                .unwrap();
        }

        assert_eq!(cache.get_query_data(&QueryKey::search_result("alien", 1)), None);
        assert_eq!(cache.get_query_data(&QueryKey::search_result("alien", 3)), Some(3));
        assert_eq!(cache.stats().entries, 2);
    }
}
