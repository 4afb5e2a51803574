//! Search state and its URL query-string encoding.
//!
//! The `(search, page)` pair is the single source of truth of the search
//! view and is mirrored into the navigable URL so any view is shareable.

use serde::{Deserialize, Deserializer, Serialize};
use url::form_urlencoded;

/// Query parameter carrying the search text.
pub const SEARCH_PARAM: &str = "search";
/// Query parameter carrying the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// Raw URL query parameters as they arrive from a request.
///
/// Both fields are optional; a malformed or zero `page` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u32>,
}

fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_page))
}

fn parse_page(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|page| *page >= 1)
}

impl SearchParams {
    /// Parses a raw query string (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                SEARCH_PARAM => params.search = Some(value.into_owned()),
                PAGE_PARAM => params.page = parse_page(&value),
                _ => {}
            }
        }
        params
    }
}

/// Typed search state: search text plus 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub search: String,
    pub page: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }
}

impl From<SearchParams> for SearchState {
    fn from(params: SearchParams) -> Self {
        Self {
            search: params.search.unwrap_or_default(),
            page: params.page.unwrap_or(1),
        }
    }
}

impl From<&SearchState> for SearchParams {
    fn from(state: &SearchState) -> Self {
        Self {
            search: Some(state.search.clone()),
            page: Some(state.page),
        }
    }
}

impl SearchState {
    /// Creates a state, clamping `page` to at least 1.
    pub fn new(search: impl Into<String>, page: u32) -> Self {
        Self {
            search: search.into(),
            page: page.max(1),
        }
    }

    /// Returns the state after the search text changed. The page always
    /// resets to 1.
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
        }
    }

    /// Returns the state after a page change, keeping the search text.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            search: self.search.clone(),
            page: page.max(1),
        }
    }

    /// True when the search text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.search.trim().is_empty()
    }

    /// Encodes the state as `search=<text>&page=<n>`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(SEARCH_PARAM, &self.search)
            .append_pair(PAGE_PARAM, &self.page.to_string())
            .finish()
    }

    /// Builds a link to `path` carrying this state.
    pub fn href(&self, path: &str) -> String {
        format!("{path}?{}", self.to_query_string())
    }
}
