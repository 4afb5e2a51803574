//! HTTP request handlers organized by functionality

pub mod api;

pub use api::{HealthReport, api_movie_detail, api_search, health};
