//! Movie search service
//!
//! Puts the query cache in front of a `MovieApi` provider. Searches and
//! detail lookups go through the cache; result pages trigger background
//! detail prefetches.

use std::sync::Arc;

use marquee_core::config::{CacheConfig, MarqueeConfig};
use marquee_core::RuntimeMode;
use tokio::task::JoinHandle;

use crate::errors::{MovieSearchError, SharedSearchError};
use crate::providers::{DemoProvider, MovieApi, TmdbProvider};
use crate::query_cache::{QueryCache, QueryCacheStats, QueryOptions};
use crate::query_keys::QueryKey;
use crate::types::{MovieDetail, MovieDiscovery};

/// Search and detail access with caching and prefetch.
#[derive(Debug, Clone)]
pub struct MovieSearchService {
    provider: Arc<dyn MovieApi>,
    searches: QueryCache<MovieDiscovery>,
    details: QueryCache<MovieDetail>,
    cache_config: CacheConfig,
}

impl MovieSearchService {
    /// Creates a service over `provider`.
    pub fn new(provider: Arc<dyn MovieApi>, cache_config: CacheConfig) -> Self {
        Self {
            provider,
            searches: QueryCache::new(cache_config.max_entries),
            details: QueryCache::new(cache_config.max_entries),
            cache_config,
        }
    }

    /// Creates the service matching the runtime mode: the configured HTTP API
    /// in production, the demo catalogue in development.
    ///
    /// # Errors
    /// - `MovieSearchError::Configuration` - API configuration is invalid
    pub fn from_runtime_mode(
        mode: RuntimeMode,
        config: &MarqueeConfig,
    ) -> Result<Self, MovieSearchError> {
        let provider: Arc<dyn MovieApi> = match mode {
            RuntimeMode::Production => Arc::new(TmdbProvider::new(&config.api)?),
            RuntimeMode::Development => Arc::new(DemoProvider::new()),
        };
        tracing::info!(%mode, "Movie search service ready");

        Ok(Self::new(provider, config.cache.clone()))
    }

    /// Fetches one page of results for `search` through the cache.
    ///
    /// Issues at most one request per call; concurrent calls for the same
    /// `(search, page)` share it.
    ///
    /// # Errors
    /// - Network, status or schema failures from the provider
    pub async fn search(
        &self,
        search: &str,
        page: u32,
    ) -> Result<MovieDiscovery, SharedSearchError> {
        let provider = Arc::clone(&self.provider);
        let query = search.to_string();

        self.searches
            .fetch_query(
                QueryKey::search_result(search, page),
                QueryOptions::search(&self.cache_config),
                move || async move { provider.search_movies(&query, page).await },
            )
            .await
    }

    /// Fetches the detail record of one movie through the cache.
    ///
    /// # Errors
    /// - `MovieSearchError::NotFound` and network or schema failures from the provider
    pub async fn movie_detail(&self, id: u64) -> Result<MovieDetail, SharedSearchError> {
        let provider = Arc::clone(&self.provider);

        self.details
            .fetch_query(
                QueryKey::movie_detail(id),
                QueryOptions::detail(&self.cache_config),
                move || async move { provider.movie_detail(id).await },
            )
            .await
    }

    /// Schedules a background detail fetch for every movie on `discovery`.
    ///
    /// Best effort: failures are only logged, and the tasks are never
    /// cancelled. Returns the handles in result order.
    pub fn prefetch_details(&self, discovery: &MovieDiscovery) -> Vec<(u64, JoinHandle<()>)> {
        if discovery.is_empty() {
            return Vec::new();
        }
        tracing::debug!(count = discovery.results.len(), "Prefetching movie details");

        discovery
            .movie_ids()
            .into_iter()
            .map(|id| {
                let provider = Arc::clone(&self.provider);
                let handle = self.details.prefetch_query(
                    QueryKey::movie_detail(id),
                    QueryOptions::detail(&self.cache_config),
                    move || async move { provider.movie_detail(id).await },
                );
                (id, handle)
            })
            .collect()
    }

    /// Last cached page for `(search, page)`, stale or not.
    pub fn cached_search(&self, search: &str, page: u32) -> Option<MovieDiscovery> {
        self.searches
            .get_query_data(&QueryKey::search_result(search, page))
    }

    /// Cached detail record, stale or not.
    pub fn cached_detail(&self, id: u64) -> Option<MovieDetail> {
        self.details.get_query_data(&QueryKey::movie_detail(id))
    }

    /// Statistics of the search result cache.
    pub fn search_cache_stats(&self) -> QueryCacheStats {
        self.searches.stats()
    }

    /// Statistics of the detail cache.
    pub fn detail_cache_stats(&self) -> QueryCacheStats {
        self.details.stats()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::providers::MockProvider;

    fn service_with(mock: MockProvider) -> (MovieSearchService, Arc<MockProvider>) {
        let mock = Arc::new(mock);
        let service = MovieSearchService::new(mock.clone(), CacheConfig::default());
        (service, mock)
    }

    #[tokio::test]
    async fn test_search_issues_exactly_one_request() {
        let (service, mock) = service_with(MockProvider::new());

        let discovery = service.search("matrix", 1).await.unwrap();

        assert_eq!(discovery.total_pages, 5);
        assert_eq!(mock.search_requests(), vec![("matrix".to_string(), 1)]);
        assert!(mock.detail_requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_schema() {
        let (service, _mock) = service_with(
            MockProvider::new().with_search_body(json!({ "results": [{ "id": 1 }] })),
        );

        let err = service.search("matrix", 1).await.unwrap_err();
        assert!(matches!(*err, MovieSearchError::ValidationError { .. }));
        assert!(service.cached_search("matrix", 1).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_identical_searches_are_deduplicated() {
        let (service, mock) =
            service_with(MockProvider::new().with_latency(Duration::from_millis(100)));

        let (a, b) = tokio::join!(service.search("heat", 2), service.search("heat", 2));
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(mock.search_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_prefetch_covers_exactly_the_page_ids() {
        let (service, mock) = service_with(MockProvider::new().with_results(4, 5));

        let discovery = service.search("matrix", 2).await.unwrap();
        let handles = service.prefetch_details(&discovery);
        let scheduled: Vec<u64> = handles.iter().map(|(id, _)| *id).collect();
        for (_, handle) in handles {
            handle.await.unwrap();
        }

        let mut requested = mock.detail_requests();
        requested.sort_unstable();
        assert_eq!(scheduled, mock.ids_for_page(2));
        assert_eq!(requested, mock.ids_for_page(2));
        for id in mock.ids_for_page(2) {
            assert!(service.cached_detail(id).is_some());
        }
    }

    #[tokio::test]
    async fn test_empty_page_prefetches_nothing() {
        let (service, mock) = service_with(MockProvider::new());

        let discovery = service.search("", 1).await.unwrap();
        assert!(service.prefetch_details(&discovery).is_empty());
        assert!(mock.detail_requests().is_empty());
    }

    #[tokio::test]
    async fn test_prefetched_detail_is_served_from_cache() {
        let (service, mock) = service_with(MockProvider::new().with_results(1, 1));

        let discovery = service.search("alien", 1).await.unwrap();
        for (_, handle) in service.prefetch_details(&discovery) {
            handle.await.unwrap();
        }

        let id = discovery.results[0].id;
        let detail = service.movie_detail(id).await.unwrap();
        assert_eq!(detail.id, id);
        assert_eq!(mock.detail_requests(), vec![id]);
        assert_eq!(service.detail_cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_failed_prefetch_is_ignored() {
        let (service, mock) = service_with(
            MockProvider::new()
                .with_results(2, 1)
                .with_missing_detail(101),
        );

        let discovery = service.search("blade", 1).await.unwrap();
        for (_, handle) in service.prefetch_details(&discovery) {
            handle.await.unwrap();
        }

        assert!(service.cached_detail(101).is_none());
        assert!(service.cached_detail(102).is_some());
        assert_eq!(mock.detail_requests().len(), 2);
    }
}
