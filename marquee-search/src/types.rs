//! Movie discovery schema.
//!
//! Response bodies are first deserialized and then validated; anything that
//! fails either step is rejected as a `ValidationError` before it reaches the
//! cache.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::MovieSearchError;

/// Base URL for poster and backdrop images.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// A movie as returned by a search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Movie identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Title in the original language
    #[serde(default)]
    pub original_title: Option<String>,
    /// Plot summary
    #[serde(default, deserialize_with = "empty_as_none")]
    pub overview: Option<String>,
    /// Release date as `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    /// Relative poster image path
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Relative backdrop image path
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Average rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Number of ratings
    #[serde(default)]
    pub vote_count: Option<u64>,
    /// Popularity score
    #[serde(default)]
    pub popularity: Option<f64>,
    /// ISO 639-1 code of the original language
    #[serde(default)]
    pub original_language: Option<String>,
    /// Genre identifiers
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult content flag
    #[serde(default)]
    pub adult: bool,
}

impl MovieSummary {
    /// Creates a summary with only the required fields set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_title: None,
            overview: None,
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            vote_count: None,
            popularity: None,
            original_language: None,
            genre_ids: Vec::new(),
            adult: false,
        }
    }

    /// Release year parsed from `release_date`.
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    /// Absolute poster URL at the given TMDB size (e.g. `w185`).
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{IMAGE_BASE_URL}/{size}{path}"))
    }

    fn validate(&self) -> Result<(), MovieSearchError> {
        if self.id == 0 {
            return Err(MovieSearchError::ValidationError {
                reason: format!("movie '{}' has id 0", self.title),
            });
        }
        if self.title.trim().is_empty() {
            return Err(MovieSearchError::ValidationError {
                reason: format!("movie {} has an empty title", self.id),
            });
        }
        Ok(())
    }
}

/// A page of search results plus paging totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDiscovery {
    /// 1-based page number of this result page
    #[serde(default = "first_page")]
    pub page: u32,
    /// Movies on this page
    pub results: Vec<MovieSummary>,
    /// Total number of pages for the query
    pub total_pages: u32,
    /// Total number of matching movies
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl MovieDiscovery {
    /// An empty result page.
    pub fn empty(page: u32) -> Self {
        Self {
            page: page.max(1),
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    /// Deserializes and validates a response body.
    ///
    /// # Errors
    /// - `MovieSearchError::ValidationError` - Body does not match the discovery schema
    pub fn from_json(value: serde_json::Value) -> Result<Self, MovieSearchError> {
        let discovery: Self =
            serde_json::from_value(value).map_err(|e| MovieSearchError::ValidationError {
                reason: format!("discovery response: {e}"),
            })?;
        discovery.validate()?;
        Ok(discovery)
    }

    /// Checks the invariants serde cannot express.
    ///
    /// # Errors
    /// - `MovieSearchError::ValidationError` - A constraint is violated
    pub fn validate(&self) -> Result<(), MovieSearchError> {
        if self.page == 0 {
            return Err(MovieSearchError::ValidationError {
                reason: "page must be at least 1".to_string(),
            });
        }
        if !self.results.is_empty() && self.total_pages == 0 {
            return Err(MovieSearchError::ValidationError {
                reason: "results present but total_pages is 0".to_string(),
            });
        }
        self.results.iter().try_for_each(MovieSummary::validate)
    }

    /// Identifiers of every movie on this page, in result order.
    pub fn movie_ids(&self) -> Vec<u64> {
        self.results.iter().map(|movie| movie.id).collect()
    }

    /// Whether this page carries no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Genre attached to a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// TMDB genre id
    pub id: u32,
    /// Display name
    pub name: String,
}

/// Full record behind `movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Movie identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Plot summary
    #[serde(default, deserialize_with = "empty_as_none")]
    pub overview: Option<String>,
    /// Marketing tagline
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tagline: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Release date as `YYYY-MM-DD`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    /// Genres
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Average rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Relative poster image path
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Official homepage
    #[serde(default, deserialize_with = "empty_as_none")]
    pub homepage: Option<String>,
    /// Release status, e.g. "Released"
    #[serde(default)]
    pub status: Option<String>,
}

impl MovieDetail {
    /// Deserializes and validates a detail response body.
    ///
    /// # Errors
    /// - `MovieSearchError::ValidationError` - Body does not match the detail schema
    pub fn from_json(value: serde_json::Value) -> Result<Self, MovieSearchError> {
        let detail: Self =
            serde_json::from_value(value).map_err(|e| MovieSearchError::ValidationError {
                reason: format!("detail response: {e}"),
            })?;

        if detail.id == 0 || detail.title.trim().is_empty() {
            return Err(MovieSearchError::ValidationError {
                reason: format!("detail record {} is missing id or title", detail.id),
            });
        }
        Ok(detail)
    }

    /// Release year parsed from `release_date`.
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

fn release_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
}

/// The API sends `""` for unknown strings; treat those as absent.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
