//! Mock provider implementation for testing.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::MovieApi;
use crate::errors::MovieSearchError;
use crate::types::{MovieDetail, MovieDiscovery, MovieSummary};

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRequest {
    /// `search_movies` call
    Search {
        /// Query text as received
        query: String,
        /// Requested page
        page: u32,
    },
    /// `movie_detail` call
    Detail {
        /// Requested movie id
        id: u64,
    },
}

/// Mock provider for testing.
///
/// Generates `per_page` movies for every non-blank query, with ids derived
/// from the page (`page * 100 + n`), and records every request it receives.
#[derive(Debug)]
pub struct MockProvider {
    per_page: usize,
    total_pages: u32,
    latency: Duration,
    raw_search_body: Option<serde_json::Value>,
    fail_searches: bool,
    missing_details: Vec<u64>,
    requests: Mutex<Vec<MockRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            per_page: 3,
            total_pages: 5,
            latency: Duration::ZERO,
            raw_search_body: None,
            fail_searches: false,
            missing_details: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockProvider {
    /// Creates a new mock provider for testing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size and the total page count of every search.
    pub fn with_results(mut self, per_page: usize, total_pages: u32) -> Self {
        self.per_page = per_page;
        self.total_pages = total_pages;
        self
    }

    /// Delays every response, for exercising in-flight behavior.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answers searches with this body, run through schema validation.
    pub fn with_search_body(mut self, body: serde_json::Value) -> Self {
        self.raw_search_body = Some(body);
        self
    }

    /// Fails every search with a network error.
    pub fn failing(mut self) -> Self {
        self.fail_searches = true;
        self
    }

    /// Answers detail requests for `id` with `NotFound`.
    pub fn with_missing_detail(mut self, id: u64) -> Self {
        self.missing_details.push(id);
        self
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Every search call as `(query, page)`, in call order.
    pub fn search_requests(&self) -> Vec<(String, u32)> {
        self.requests
            .lock()
            .iter()
            .filter_map(|request| match request {
                MockRequest::Search { query, page } => Some((query.clone(), *page)),
                MockRequest::Detail { .. } => None,
            })
            .collect()
    }

    /// Every detail call's id, in call order.
    pub fn detail_requests(&self) -> Vec<u64> {
        self.requests
            .lock()
            .iter()
            .filter_map(|request| match request {
                MockRequest::Detail { id } => Some(*id),
                MockRequest::Search { .. } => None,
            })
            .collect()
    }

    /// Ids the mock returns for `page` of a non-blank query.
    pub fn ids_for_page(&self, page: u32) -> Vec<u64> {
        (1..=self.per_page as u64)
            .map(|n| u64::from(page) * 100 + n)
            .collect()
    }
}

#[async_trait]
impl MovieApi for MockProvider {
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<MovieDiscovery, MovieSearchError> {
        self.requests.lock().push(MockRequest::Search {
            query: query.to_string(),
            page,
        });
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.fail_searches {
            return Err(MovieSearchError::NetworkError {
                reason: "mock network failure".to_string(),
            });
        }
        if let Some(ref body) = self.raw_search_body {
            return MovieDiscovery::from_json(body.clone());
        }
        if query.trim().is_empty() {
            return Ok(MovieDiscovery::empty(page));
        }

        let results = self
            .ids_for_page(page)
            .into_iter()
            .map(|id| MovieSummary::new(id, format!("{query} #{id}")))
            .collect();

        Ok(MovieDiscovery {
            page,
            results,
            total_pages: self.total_pages,
            total_results: self.per_page as u64 * u64::from(self.total_pages),
        })
    }

    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, MovieSearchError> {
        self.requests.lock().push(MockRequest::Detail { id });
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.missing_details.contains(&id) {
            return Err(MovieSearchError::NotFound {
                resource: format!("movie/{id}"),
            });
        }

        Ok(MovieDetail {
            id,
            title: format!("Movie {id}"),
            overview: None,
            tagline: None,
            runtime: Some(100),
            release_date: None,
            genres: Vec::new(),
            vote_average: None,
            poster_path: None,
            homepage: None,
            status: Some("Released".to_string()),
        })
    }
}
