//! Web error types and the error boundary
//!
//! `WebError` is what page handlers return when rendering cannot proceed.
//! Its HTML response is the error fallback; `ApiError` renders the same
//! errors as JSON for the API routes.

use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use marquee_search::{MovieSearchError, SharedSearchError};
use serde_json::json;
use thiserror::Error;

use crate::components::error_fallback;

/// Errors surfaced by web handlers.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    Search(SharedSearchError),

    #[error("Invalid movie id: {raw}")]
    InvalidMovieId { raw: String },

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

impl From<SharedSearchError> for WebError {
    fn from(error: SharedSearchError) -> Self {
        Self::Search(error)
    }
}

impl From<MovieSearchError> for WebError {
    fn from(error: MovieSearchError) -> Self {
        Self::Search(Arc::new(error))
    }
}

impl WebError {
    /// HTTP status for the error response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Search(error) if error.is_not_found() => StatusCode::NOT_FOUND,
            Self::Search(error) => match error.as_ref() {
                MovieSearchError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::InvalidMovieId { .. } => StatusCode::BAD_REQUEST,
            Self::Configuration { .. } | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Search(error) => match error.as_ref() {
                MovieSearchError::NetworkError { .. } => {
                    "The movie database could not be reached. Try again in a moment.".to_string()
                }
                MovieSearchError::HttpStatus { status, .. } => {
                    format!("The movie database rejected the request (status {status}).")
                }
                MovieSearchError::ParseError { .. } | MovieSearchError::ValidationError { .. } => {
                    "The movie database returned an unexpected response.".to_string()
                }
                MovieSearchError::NotFound { resource } => format!("Not found: {resource}"),
                MovieSearchError::Configuration { .. } => {
                    "Movie search is not configured correctly.".to_string()
                }
            },
            Self::InvalidMovieId { raw } => format!("\"{raw}\" is not a movie id."),
            Self::Configuration { .. } | Self::Server(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(error = %self, %status, "Rendering error fallback");

        (status, Html(error_fallback(&self.user_message()))).into_response()
    }
}

/// JSON rendering of `WebError` for API routes.
#[derive(Debug)]
pub struct ApiError(pub WebError);

impl From<WebError> for ApiError {
    fn from(error: WebError) -> Self {
        Self(error)
    }
}

impl From<SharedSearchError> for ApiError {
    fn from(error: SharedSearchError) -> Self {
        Self(WebError::Search(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        tracing::warn!(error = %self.0, %status, "API request failed");

        let body = json!({
            "error": self.0.user_message(),
            "detail": self.0.to_string(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = WebError::from(MovieSearchError::NotFound {
            resource: "movie/1".to_string(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let upstream_404 = WebError::from(MovieSearchError::HttpStatus {
            status: 404,
            message: String::new(),
        });
        assert_eq!(upstream_404.status_code(), StatusCode::NOT_FOUND);

        let invalid = WebError::from(MovieSearchError::ValidationError {
            reason: "total_pages".to_string(),
        });
        assert_eq!(invalid.status_code(), StatusCode::BAD_GATEWAY);

        let bad_id = WebError::InvalidMovieId {
            raw: "abc".to_string(),
        };
        assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_network_error_message_hides_detail() {
        let error = WebError::from(MovieSearchError::NetworkError {
            reason: "dns failure for api.internal".to_string(),
        });
        assert!(!error.user_message().contains("api.internal"));
    }
}
