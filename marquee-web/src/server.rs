//! HTMX + Tailwind web server for Marquee
//!
//! Serves the search page, its HTMX result partial, the detail route and a
//! small JSON API over the same movie search service.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::get;
use marquee_core::{MarqueeConfig, RuntimeMode};
use marquee_search::MovieSearchService;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::WebError;
use crate::handlers::{api_movie_detail, api_search, health};
use crate::pages::{movie_detail_page, search_page, search_results};
use crate::pages::search::RESULTS_PATH;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub search_service: MovieSearchService,
    pub config: Arc<MarqueeConfig>,
    pub mode: RuntimeMode,
    pub server_started_at: Instant,
}

impl AppState {
    pub fn new(search_service: MovieSearchService, config: MarqueeConfig, mode: RuntimeMode) -> Self {
        Self {
            search_service,
            config: Arc::new(config),
            mode,
            server_started_at: Instant::now(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(search_page))
        .route("/movies/{id}", get(movie_detail_page))
        // HTMX partials
        .route(RESULTS_PATH, get(search_results))
        // JSON API
        .route("/api/search", get(api_search))
        .route("/api/movies/{id}", get(api_movie_detail))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Runs the web server until it fails.
///
/// # Errors
/// - `WebError::Configuration` - Invalid configuration or provider setup
/// - `WebError::Server` - Bind or serve failure
pub async fn run_server(config: MarqueeConfig, mode: RuntimeMode) -> Result<(), WebError> {
    config
        .validate()
        .map_err(|e| WebError::Configuration {
            reason: e.to_string(),
        })?;

    let search_service =
        MovieSearchService::from_runtime_mode(mode, &config).map_err(|e| {
            WebError::Configuration {
                reason: e.to_string(),
            }
        })?;

    let address = config.server.bind_address();
    let app = router(AppState::new(search_service, config, mode));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%mode, "Marquee running on http://{address}");
    axum::serve(listener, app).await?;
    Ok(())
}
