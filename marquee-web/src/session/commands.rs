//! Command definitions for the search session actor.

use marquee_core::SearchState;
use marquee_search::{MovieDiscovery, QueryKey, SharedSearchError};
use tokio::sync::oneshot;

use crate::view::{SearchView, ViewContent};

/// Commands that can be sent to the search session actor.
pub enum SessionCommand {
    /// The user typed into the search box.
    Input {
        value: String,
        responder: oneshot::Sender<SearchState>,
    },
    /// The user picked another page.
    ChangePage {
        page: u32,
        responder: oneshot::Sender<SearchState>,
    },
    /// Shutdown the session actor gracefully.
    Shutdown { responder: oneshot::Sender<()> },
    /// Internal notification when a search fetch settles.
    FetchCompleted {
        key: QueryKey,
        result: Result<MovieDiscovery, SharedSearchError>,
    },
}

/// Render-ready state published after every change.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Typed search text and page, as mirrored into the URL
    pub state: SearchState,
    /// Search text after the debounce window
    pub debounced_search: String,
    /// What the view shows; `Err` is handed to the error boundary
    pub content: Result<ViewContent, SharedSearchError>,
    /// Navigable location for `state`
    pub url: String,
}

impl SessionSnapshot {
    pub(crate) fn of(view: &SearchView) -> Self {
        Self {
            state: view.state().clone(),
            debounced_search: view.debounced_search().to_string(),
            content: view.content(),
            url: view.state().href("/"),
        }
    }

    /// Whether the snapshot shows a result list.
    pub fn has_results(&self) -> bool {
        matches!(self.content, Ok(ViewContent::Results { .. }))
    }
}
