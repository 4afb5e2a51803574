//! Marquee Web - Movie search page and JSON API

#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered HTMX + Tailwind search view with debounced input,
//! URL-synced paging and an error boundary, plus the interactive session
//! actor that drives the same view outside the browser.

pub mod components;
pub mod errors;
pub mod handlers;
pub mod pages;
pub mod server;
pub mod session;
pub mod view;

// Re-export main types
pub use errors::{ApiError, WebError};
pub use server::{AppState, router, run_server};
pub use session::{SearchSessionHandle, SessionError, SessionSnapshot, spawn_search_session};
pub use view::{FetchStatus, INSTRUCTIONS, SearchView, ViewContent};

/// Convenience type alias for Results with WebError.
pub type Result<T> = std::result::Result<T, WebError>;
