//! Search page - debounced movie search with URL-synced paging

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use marquee_core::{SearchParams, SearchState};

use crate::components::{
    escape_html, input, instructions, movie_results, page_header, pagination_nav, results_skeleton,
};
use crate::errors::WebError;
use crate::pages::base::render_page;
use crate::server::AppState;
use crate::view::{SearchView, ViewContent};

/// Path of the partial that renders the result region.
pub const RESULTS_PATH: &str = "/htmx/search";
/// CSS selector of the result region.
pub const RESULTS_TARGET: &str = "#search-results";
/// Response header HTMX reads to update the browser location.
pub const PUSH_URL_HEADER: &str = "hx-push-url";

/// Link to the result partial for `state`.
pub fn results_href(state: &SearchState) -> String {
    state.href(RESULTS_PATH)
}

/// Renders one of the three views.
pub fn render_view_content(content: &ViewContent, search: &str) -> String {
    match content {
        ViewContent::Skeleton => results_skeleton(),
        ViewContent::Instructions => instructions(),
        ViewContent::Results { movies, pagination } => {
            let pagination_html = pagination
                .as_ref()
                .map(|pagination| pagination_nav(search, pagination))
                .unwrap_or_default();
            format!("{}{pagination_html}", movie_results(movies))
        }
    }
}

/// Renders the search page.
///
/// The text box is seeded from the URL. The result region renders the
/// instructions for blank text; otherwise it starts as a skeleton and loads
/// the result partial once the page is in the browser.
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let view = SearchView::from_params(params);
    let delay_ms = state.config.search.debounce_delay.as_millis();

    let search_box = input(
        "search",
        "Search for a movie title...",
        "search",
        Some(&format!(
            r#"value="{value}" autocomplete="off" autofocus
                  hx-get="{RESULTS_PATH}" hx-trigger="input changed delay:{delay_ms}ms, search"
                  hx-target="{RESULTS_TARGET}" hx-vals='{{"page": "1"}}' hx-indicator="{RESULTS_TARGET}""#,
            value = escape_html(view.search_value()),
        )),
    );

    let results_region = match view.content() {
        Ok(ViewContent::Skeleton) => format!(
            r#"<div id="search-results" hx-get="{}" hx-trigger="load">{}</div>"#,
            results_href(view.state()),
            results_skeleton()
        ),
        _ => format!(
            r#"<div id="search-results">
                <div class="htmx-indicator">{}</div>
                <div class="results-body">{}</div>
            </div>"#,
            results_skeleton(),
            instructions()
        ),
    };

    let content = format!(
        r#"{}
        <div class="max-w-2xl mx-auto mb-8">{search_box}</div>
        {results_region}"#,
        page_header("Search Movies", Some("Find any film by its title")),
    );

    render_page("Search", "search", &content)
}

/// Renders the result region for `(search, page)`.
///
/// Fetches through the cached search, prefetches details for the page it
/// got, and tells HTMX which URL to push. A fetch error renders the
/// `WebError` fallback under the same pushed URL.
pub async fn search_results(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let mut view = SearchView::from_params(params);

    if let Some(key) = view.query_key() {
        let result = state
            .search_service
            .search(view.debounced_search(), view.page())
            .await;
        if let Ok(discovery) = &result {
            state.search_service.prefetch_details(discovery);
        }
        view.apply_result(&key, result);
    }

    // The URL follows the input even when the fetch behind it fails.
    let push_url = [(PUSH_URL_HEADER, view.state().href("/"))];
    let content = match view.content() {
        Ok(content) => content,
        Err(error) => return (push_url, WebError::from(error)).into_response(),
    };
    let region = format!(
        r#"<div class="htmx-indicator">{}</div>
        <div class="results-body">{}</div>"#,
        results_skeleton(),
        render_view_content(&content, view.search_value())
    );

    (push_url, Html(region)).into_response()
}
