//! Route-level tests for the search page, partial, detail route and API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use marquee_core::config::CacheConfig;
use marquee_core::{MarqueeConfig, RuntimeMode};
use marquee_search::MovieSearchService;
use marquee_search::providers::MockProvider;
use marquee_web::{AppState, INSTRUCTIONS, router};
use tower::ServiceExt;

fn app(mock: MockProvider) -> (Router, Arc<MockProvider>) {
    let mock = Arc::new(mock);
    let service = MovieSearchService::new(mock.clone(), CacheConfig::default());
    let state = AppState::new(service, MarqueeConfig::for_testing(), RuntimeMode::Development);
    (router(state), mock)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_blank_page_shows_instructions_without_fetching() {
    let (app, mock) = app(MockProvider::new());

    let (status, _, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(INSTRUCTIONS));
    assert!(!body.contains(r#"hx-trigger="load""#));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_page_seeds_input_and_loads_results_from_url() {
    let (app, _mock) = app(MockProvider::new());

    let (status, _, body) = get(&app, "/?search=heat&page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="heat""#));
    assert!(body.contains(r#"hx-get="/htmx/search?search=heat&page=2" hx-trigger="load""#));
    assert!(body.contains(r#"data-skeleton="true""#));
    assert!(body.contains("delay:10ms"));
}

#[tokio::test]
async fn test_page_escapes_search_text() {
    let (app, _mock) = app(MockProvider::new());

    let (_, _, body) = get(&app, "/?search=%22%3E%3Cscript%3E").await;

    assert!(body.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
    assert!(!body.contains("\"><script>"));
}

#[tokio::test]
async fn test_results_partial_renders_movies_and_pushes_url() {
    let (app, mock) = app(MockProvider::new());

    let (status, headers, body) = get(&app, "/htmx/search?search=matrix&page=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["hx-push-url"], "/?search=matrix&page=1");
    for id in mock.ids_for_page(1) {
        assert!(body.contains(&format!(r#"href="/movies/{id}""#)));
    }
    assert!(body.contains(r#"aria-label="Pagination""#));
    assert!(body.contains(r#"href="/?search=matrix&page=5""#));
    assert_eq!(mock.search_requests(), vec![("matrix".to_string(), 1)]);
}

#[tokio::test]
async fn test_results_partial_prefetches_details() {
    let (app, mock) = app(MockProvider::new());

    get(&app, "/htmx/search?search=alien&page=2").await;

    let expected = mock.ids_for_page(2);
    for _ in 0..100 {
        if mock.detail_requests().len() == expected.len() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let mut requested = mock.detail_requests();
    requested.sort_unstable();
    assert_eq!(requested, expected);
}

#[tokio::test]
async fn test_blank_partial_shows_instructions() {
    let (app, mock) = app(MockProvider::new());

    let (status, headers, body) = get(&app, "/htmx/search?search=%20%20&page=1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(INSTRUCTIONS));
    assert_eq!(headers["hx-push-url"], "/?search=++&page=1");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_empty_results_hide_pagination() {
    let (app, _mock) = app(MockProvider::new().with_results(0, 4));

    let (status, _, body) = get(&app, "/htmx/search?search=zzz").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No movies found"));
    assert!(!body.contains(r#"aria-label="Pagination""#));
}

#[tokio::test]
async fn test_fetch_error_renders_error_boundary() {
    let (app, _mock) = app(MockProvider::new().failing());

    let (status, _, body) = get(&app, "/htmx/search?search=heat").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Something went wrong"));
    assert!(body.contains(r#"role="alert""#));
}

#[tokio::test]
async fn test_fetch_error_still_pushes_url() {
    let (app, _mock) = app(MockProvider::new().failing());

    let (status, headers, _) = get(&app, "/htmx/search?search=heat&page=2").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(headers["hx-push-url"], "/?search=heat&page=2");
}

#[tokio::test]
async fn test_detail_route_shows_only_the_id() {
    let (app, mock) = app(MockProvider::new());

    let (status, _, body) = get(&app, "/movies/949").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Movie ID: 949"));

    let (_, _, body) = get(&app, "/movies/%3Cb%3E").await;
    assert!(body.contains("Movie ID: &lt;b&gt;"));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_api_search_returns_discovery_json() {
    let (app, _mock) = app(MockProvider::new());

    let (status, _, body) = get(&app, "/api/search?search=heat&page=2").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["page"], 2);
    assert_eq!(json["total_pages"], 5);
    assert_eq!(json["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_api_detail_errors() {
    let (app, _mock) = app(MockProvider::new().with_missing_detail(7));

    let (status, _, _) = get(&app, "/api/movies/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = get(&app, "/api/movies/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 404);

    let (status, _, body) = get(&app, "/api/movies/8").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["id"], 8);
}

#[tokio::test]
async fn test_health_reports_cache_stats() {
    let (app, _mock) = app(MockProvider::new());
    get(&app, "/api/search?search=heat").await;

    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["search_cache"]["misses"], 1);
}
