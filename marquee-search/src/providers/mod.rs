//! Provider implementations for movie search functionality.

use async_trait::async_trait;

use crate::errors::MovieSearchError;
use crate::types::{MovieDetail, MovieDiscovery};

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockProvider, MockRequest};
pub use tmdb::TmdbProvider;

/// Trait for movie database backends.
///
/// Implementations answer search and detail requests through different
/// backends (the real HTTP API, an offline demo catalogue, mocks for tests).
/// Each call issues exactly one request; caching happens above this layer.
#[async_trait]
pub trait MovieApi: Send + Sync + std::fmt::Debug {
    /// Fetches one page of search results for `query`.
    ///
    /// # Errors
    /// - `MovieSearchError::NetworkError` - Network connectivity issues
    /// - `MovieSearchError::HttpStatus` - API rejected the request
    /// - `MovieSearchError::ValidationError` - Response does not match the discovery schema
    async fn search_movies(&self, query: &str, page: u32)
    -> Result<MovieDiscovery, MovieSearchError>;

    /// Fetches the detail record of one movie.
    ///
    /// # Errors
    /// - `MovieSearchError::NotFound` - No movie with this id
    /// - `MovieSearchError::NetworkError` - Network connectivity issues
    /// - `MovieSearchError::ValidationError` - Response does not match the detail schema
    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, MovieSearchError>;
}
