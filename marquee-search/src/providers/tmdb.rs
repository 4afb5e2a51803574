//! TMDB HTTP provider.

use async_trait::async_trait;
use marquee_core::config::ApiConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use super::MovieApi;
use crate::errors::MovieSearchError;
use crate::types::{MovieDetail, MovieDiscovery};

/// Error body the API sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct TmdbStatus {
    #[serde(default)]
    status_message: Option<String>,
}

/// Movie database client speaking the TMDB v3 REST API.
#[derive(Debug, Clone)]
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
    api_key: Option<String>,
    language: Option<String>,
    include_adult: bool,
}

impl TmdbProvider {
    /// Creates a provider from API configuration.
    ///
    /// # Errors
    /// - `MovieSearchError::Configuration` - Base URL invalid or HTTP client could not be built
    pub fn new(config: &ApiConfig) -> Result<Self, MovieSearchError> {
        let base_url = config
            .parsed_base_url()
            .map_err(|e| MovieSearchError::Configuration {
                reason: e.to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| MovieSearchError::Configuration {
                reason: format!("HTTP client: {e}"),
            })?;

        if config.access_token.is_none() && config.api_key.is_none() {
            tracing::warn!("No TMDB credentials configured; requests will be rejected");
        }

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            include_adult: config.include_adult,
        })
    }

    /// Builds `search/movie?query=<query>&page=<page>` plus configured extras.
    ///
    /// # Errors
    /// - `MovieSearchError::Configuration` - Endpoint cannot be joined onto the base URL
    pub fn search_url(&self, query: &str, page: u32) -> Result<Url, MovieSearchError> {
        let mut url = self.endpoint("search/movie")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.to_string());
        if self.include_adult {
            url.query_pairs_mut().append_pair("include_adult", "true");
        }
        self.append_common(&mut url);
        Ok(url)
    }

    /// Builds `movie/{id}` plus configured extras.
    ///
    /// # Errors
    /// - `MovieSearchError::Configuration` - Endpoint cannot be joined onto the base URL
    pub fn detail_url(&self, id: u64) -> Result<Url, MovieSearchError> {
        let mut url = self.endpoint(&format!("movie/{id}"))?;
        self.append_common(&mut url);
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, MovieSearchError> {
        self.base_url
            .join(path)
            .map_err(|e| MovieSearchError::Configuration {
                reason: format!("endpoint '{path}': {e}"),
            })
    }

    fn append_common(&self, url: &mut Url) {
        // The key only travels in the URL when no bearer token is set.
        let api_key = match self.access_token {
            Some(_) => None,
            None => self.api_key.as_deref(),
        };
        if self.language.is_none() && api_key.is_none() {
            return;
        }

        let mut pairs = url.query_pairs_mut();
        if let Some(ref language) = self.language {
            pairs.append_pair("language", language);
        }
        if let Some(api_key) = api_key {
            pairs.append_pair("api_key", api_key);
        }
    }

    async fn get_json(&self, url: Url, resource: String) -> Result<serde_json::Value, MovieSearchError> {
        tracing::debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(ref token) = self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MovieSearchError::NetworkError {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MovieSearchError::NotFound { resource });
        }
        if !status.is_success() {
            let message = response
                .json::<TmdbStatus>()
                .await
                .ok()
                .and_then(|body| body.status_message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(MovieSearchError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| MovieSearchError::ParseError {
                reason: format!("JSON parsing failed: {e}"),
            })
    }
}

#[async_trait]
impl MovieApi for TmdbProvider {
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<MovieDiscovery, MovieSearchError> {
        let url = self.search_url(query, page)?;
        let body = self.get_json(url, format!("search/movie?query={query}")).await?;
        MovieDiscovery::from_json(body)
    }

    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, MovieSearchError> {
        let url = self.detail_url(id)?;
        let body = self.get_json(url, format!("movie/{id}")).await?;
        MovieDetail::from_json(body)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Serves a fake API on an ephemeral port and returns its base URL.
    async fn spawn_fake_api(seen: Seen) -> String {
        let search_seen = Arc::clone(&seen);
        let app = Router::new()
            .route(
                "/3/search/movie",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let seen = Arc::clone(&search_seen);
                    async move {
                        let query = params.get("query").cloned().unwrap_or_default();
                        seen.lock().push(params);
                        if query == "broken" {
                            return axum::Json(json!({ "page": 1, "results": "nope" }))
                                .into_response();
                        }
                        axum::Json(json!({
                            "page": 1,
                            "results": [{ "id": 603, "title": "The Matrix" }],
                            "total_pages": 5,
                            "total_results": 97
                        }))
                        .into_response()
                    }
                }),
            )
            .route(
                "/3/movie/{id}",
                get(|Path(id): Path<u64>, headers: HeaderMap| async move {
                    if headers.get("authorization").is_none() {
                        return (
                            AxumStatus::UNAUTHORIZED,
                            axum::Json(json!({ "status_message": "Invalid API key" })),
                        )
                            .into_response();
                    }
                    if id != 603 {
                        return AxumStatus::NOT_FOUND.into_response();
                    }
                    axum::Json(json!({ "id": 603, "title": "The Matrix", "runtime": 136 }))
                        .into_response()
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/3")
    }

    fn provider(base_url: String, token: Option<&str>) -> TmdbProvider {
        TmdbProvider::new(&ApiConfig {
            base_url,
            access_token: token.map(str::to_string),
            api_key: Some("key123".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_search_url_shape() {
        let provider = provider("https://api.themoviedb.org/3/".to_string(), None);
        let url = provider.search_url("the matrix", 2).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/search/movie?query=the+matrix&page=2&api_key=key123"
        );
    }

    #[test]
    fn test_include_adult_only_when_enabled() {
        let provider = TmdbProvider::new(&ApiConfig {
            base_url: "https://api.themoviedb.org/3/".to_string(),
            include_adult: true,
            ..Default::default()
        })
        .unwrap();
        let url = provider.search_url("heat", 1).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/search/movie?query=heat&page=1&include_adult=true"
        );
    }

    #[test]
    fn test_token_replaces_api_key_param() {
        let provider = provider("https://api.themoviedb.org/3".to_string(), Some("tok"));
        let url = provider.detail_url(603).unwrap();
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/603");
    }

    #[tokio::test]
    async fn test_search_issues_one_request_with_query_and_page() {
        let seen: Seen = Arc::default();
        let base = spawn_fake_api(Arc::clone(&seen)).await;
        let provider = provider(base, Some("tok"));

        let discovery = provider.search_movies("matrix", 1).await.unwrap();
        assert_eq!(discovery.total_pages, 5);
        assert_eq!(discovery.movie_ids(), vec![603]);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("query").map(String::as_str), Some("matrix"));
        assert_eq!(seen[0].get("page").map(String::as_str), Some("1"));
        assert_eq!(seen[0].len(), 2);
    }

    #[tokio::test]
    async fn test_schema_mismatch_rejects() {
        let base = spawn_fake_api(Arc::default()).await;
        let provider = provider(base, Some("tok"));

        let err = provider.search_movies("broken", 1).await.unwrap_err();
        assert!(matches!(err, MovieSearchError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_detail_status_mapping() {
        let base = spawn_fake_api(Arc::default()).await;

        let authorized = provider(base.clone(), Some("tok"));
        assert_eq!(authorized.movie_detail(603).await.unwrap().runtime, Some(136));
        assert!(authorized.movie_detail(1).await.unwrap_err().is_not_found());

        let anonymous = provider(base, None);
        match anonymous.movie_detail(603).await.unwrap_err() {
            MovieSearchError::HttpStatus { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
