//! Cache keys for movie queries.

use std::fmt;

/// Identifies one cached fetch result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// A page of search results for a search text.
    SearchResult {
        /// Settled search text
        search: String,
        /// 1-based result page
        page: u32,
    },
    /// The detail record of one movie.
    MovieDetail {
        /// TMDB movie id
        id: u64,
    },
}

impl QueryKey {
    /// Key for one page of search results.
    pub fn search_result(search: impl Into<String>, page: u32) -> Self {
        Self::SearchResult {
            search: search.into(),
            page,
        }
    }

    /// Key for the detail record of `id`.
    pub fn movie_detail(id: u64) -> Self {
        Self::MovieDetail { id }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchResult { search, page } => {
                write!(f, "[\"movies\", \"search-result\", {search:?}, {page}]")
            }
            Self::MovieDetail { id } => write!(f, "[\"movie\", {id}]"),
        }
    }
}
