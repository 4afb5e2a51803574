//! Interactive search session
//!
//! Runs the search view as an actor: typed text flows through the debouncer,
//! the settled text and page drive cached fetches, and every change is
//! published as a render-ready snapshot.

pub mod actor;
pub mod commands;
pub mod handle;

pub use actor::spawn_search_session;
pub use commands::SessionSnapshot;
pub use handle::SearchSessionHandle;

/// Errors returned by a session handle.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Search session has shut down")]
    Shutdown,
}
