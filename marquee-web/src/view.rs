//! Search view model.
//!
//! Holds the local UI state of the search page and decides which of the
//! three views to render. Rendering itself lives in `components` and `pages`;
//! hosts (the HTTP handlers and the session actor) drive this type.

use marquee_core::{Pagination, SearchParams, SearchState};
use marquee_search::{MovieDiscovery, MovieSummary, QueryKey, SharedSearchError};

/// Message shown while no search text has settled.
pub const INSTRUCTIONS: &str = "Enter a movie title to search";

/// Status of the search fetch for the current query key.
#[derive(Debug, Clone)]
pub enum FetchStatus {
    /// No fetch wanted: the settled search text is blank
    Idle,
    /// Waiting for the current query key
    Pending,
    /// The current query key failed
    Failed(SharedSearchError),
    /// Data for the current query key
    Loaded(MovieDiscovery),
}

/// What the search view renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewContent {
    /// Loading placeholder
    Skeleton,
    /// Empty-state message asking for a title
    Instructions,
    /// Result list; pagination only when the list is non-empty
    Results {
        movies: Vec<MovieSummary>,
        pagination: Option<Pagination>,
    },
}

/// Search view state: typed text, page, settled text and fetch status.
#[derive(Debug, Clone)]
pub struct SearchView {
    state: SearchState,
    debounced_search: String,
    status: FetchStatus,
}

impl SearchView {
    /// Initializes the view from URL query parameters. The settled text starts
    /// equal to the typed text, as nothing is pending on first render.
    pub fn from_params(params: SearchParams) -> Self {
        let state = SearchState::from(params);
        let debounced_search = state.search.clone();
        let mut view = Self {
            state,
            debounced_search,
            status: FetchStatus::Idle,
        };
        view.status = view.initial_status();
        view
    }

    fn initial_status(&self) -> FetchStatus {
        if self.query_key().is_some() {
            FetchStatus::Pending
        } else {
            FetchStatus::Idle
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn search_value(&self) -> &str {
        &self.state.search
    }

    pub fn page(&self) -> u32 {
        self.state.page
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Handles typed text: updates it, resets the page to 1 and returns the
    /// state to push into the URL.
    pub fn on_search_input(&mut self, value: impl Into<String>) -> SearchState {
        self.state = self.state.with_search(value);
        self.state.clone()
    }

    /// Handles a page change and returns the state to push into the URL.
    pub fn on_page_change(&mut self, page: u32) -> SearchState {
        self.state = self.state.with_page(page);
        self.state.clone()
    }

    /// Records a newly settled search text. Returns whether it changed.
    pub fn set_debounced(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.debounced_search {
            return false;
        }
        self.debounced_search = value;
        true
    }

    /// Key of the fetch the view currently wants, or `None` while the settled
    /// text is blank.
    pub fn query_key(&self) -> Option<QueryKey> {
        if self.debounced_search.trim().is_empty() {
            None
        } else {
            Some(QueryKey::search_result(
                self.debounced_search.clone(),
                self.state.page,
            ))
        }
    }

    /// Marks the current key as pending, or idle when nothing is wanted.
    pub fn begin_fetch(&mut self) {
        self.status = self.initial_status();
    }

    /// Applies a fetch outcome if `key` is still the wanted key. Results for
    /// superseded keys are dropped; returns whether the outcome was applied.
    pub fn apply_result(
        &mut self,
        key: &QueryKey,
        result: Result<MovieDiscovery, SharedSearchError>,
    ) -> bool {
        if self.query_key().as_ref() != Some(key) {
            tracing::trace!(%key, "dropping superseded search result");
            return false;
        }

        self.status = match result {
            Ok(discovery) => FetchStatus::Loaded(discovery),
            Err(error) => FetchStatus::Failed(error),
        };
        true
    }

    /// Chooses the view to render.
    ///
    /// Blank settled text always yields the instructions. A fetch error is
    /// returned so the caller's error boundary can render its fallback.
    ///
    /// # Errors
    /// - The search error of the current query key
    pub fn content(&self) -> Result<ViewContent, SharedSearchError> {
        if self.debounced_search.trim().is_empty() {
            return Ok(ViewContent::Instructions);
        }

        match &self.status {
            FetchStatus::Failed(error) => Err(error.clone()),
            FetchStatus::Idle | FetchStatus::Pending => Ok(ViewContent::Skeleton),
            FetchStatus::Loaded(discovery) => {
                let pagination = (!discovery.results.is_empty())
                    .then(|| Pagination::new(self.state.page, discovery.total_pages));
                Ok(ViewContent::Results {
                    movies: discovery.results.clone(),
                    pagination,
                })
            }
        }
    }
}
