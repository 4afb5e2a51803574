//! JSON API handlers for search, movie details and health

use axum::extract::{Path, Query, State};
use axum::response::Json;
use marquee_core::{SearchParams, SearchState};
use marquee_search::{MovieDetail, MovieDiscovery, QueryCacheStats};
use serde::Serialize;

use crate::errors::{ApiError, WebError};
use crate::server::AppState;

/// Service health report.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub mode: String,
    pub uptime_secs: u64,
    pub search_cache: QueryCacheStats,
    pub detail_cache: QueryCacheStats,
}

/// Searches movies: `GET /api/search?search=<text>&page=<n>`.
///
/// Blank text answers an empty page without contacting the provider.
/// Detail prefetch starts for every returned movie.
///
/// # Errors
/// - Search failures mapped through `ApiError`
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieDiscovery>, ApiError> {
    let search = SearchState::from(params);
    if search.is_blank() {
        return Ok(Json(MovieDiscovery::empty(search.page)));
    }

    let discovery = state
        .search_service
        .search(&search.search, search.page)
        .await?;
    state.search_service.prefetch_details(&discovery);

    Ok(Json(discovery))
}

/// Movie detail record: `GET /api/movies/{id}`.
///
/// # Errors
/// - `WebError::InvalidMovieId` - Path segment is not a positive integer
/// - Detail fetch failures, including not found
pub async fn api_movie_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MovieDetail>, ApiError> {
    let id = parse_movie_id(&raw_id)?;
    let detail = state.search_service.movie_detail(id).await?;
    Ok(Json(detail))
}

/// Liveness and cache statistics: `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        mode: state.mode.to_string(),
        uptime_secs: state.server_started_at.elapsed().as_secs(),
        search_cache: state.search_service.search_cache_stats(),
        detail_cache: state.search_service.detail_cache_stats(),
    })
}

fn parse_movie_id(raw: &str) -> Result<u64, WebError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| WebError::InvalidMovieId {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_id() {
        assert_eq!(parse_movie_id("949").unwrap(), 949);
        assert!(parse_movie_id("0").is_err());
        assert!(parse_movie_id("-3").is_err());
        assert!(parse_movie_id("tt0113277").is_err());
    }
}
