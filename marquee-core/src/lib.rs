//! Marquee Core - Shared building blocks for the movie search front end
//!
//! This crate holds everything the search service and the web view agree on:
//! configuration, runtime mode, tracing setup, the URL-backed search state,
//! the debounce primitive, and pagination math.

pub mod config;
pub mod debounce;
pub mod mode;
pub mod pagination;
pub mod search_state;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::MarqueeConfig;
pub use debounce::{Debouncer, settled_value};
pub use mode::RuntimeMode;
pub use pagination::{PageItem, Pagination};
pub use search_state::{SearchParams, SearchState};

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tracing setup failed: {reason}")]
    Tracing { reason: String },
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
            MarqueeError::Tracing { .. } => "Logging could not be initialized".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
