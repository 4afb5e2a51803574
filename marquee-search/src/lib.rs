//! Marquee Search - Movie search and detail prefetching

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Fetches paginated movie search results from a movie database API,
//! validates them against the discovery schema, and caches them by query
//! key. Detail records for every result are prefetched in the background.

pub mod errors;
pub mod providers;
pub mod query_cache;
pub mod query_keys;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::{MovieSearchError, SharedSearchError};
pub use providers::{DemoProvider, MovieApi, TmdbProvider};
pub use query_cache::{QueryCache, QueryCacheStats, QueryOptions};
pub use query_keys::QueryKey;
pub use service::MovieSearchService;
pub use types::{Genre, MovieDetail, MovieDiscovery, MovieSummary};

/// Convenience type alias for Results with MovieSearchError.
pub type Result<T> = std::result::Result<T, MovieSearchError>;
