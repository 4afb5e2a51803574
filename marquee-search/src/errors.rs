//! Error types for movie search functionality.

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while fetching or validating movie data.
#[derive(Debug, Error)]
pub enum MovieSearchError {
    /// Network communication error occurred during a request.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// The API answered with a non-success status code.
    #[error("API returned status {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Status message reported by the API, if any
        message: String,
    },

    /// Response body was not valid JSON.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Response JSON did not match the expected schema.
    #[error("Schema validation failed: {reason}")]
    ValidationError {
        /// Which constraint was violated
        reason: String,
    },

    /// Requested record does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was requested
        resource: String,
    },

    /// Provider could not be constructed from configuration.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// The reason the configuration was rejected
        reason: String,
    },
}

impl MovieSearchError {
    /// Checks if the error means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::HttpStatus { status, .. } if *status == 404)
    }
}

/// Error shared between every waiter of a de-duplicated request.
pub type SharedSearchError = Arc<MovieSearchError>;
