//! Plain-text rendering of search views for the terminal

use marquee_core::{PageItem, Pagination};
use marquee_search::{MovieDetail, MovieSummary, SharedSearchError};
use marquee_web::{INSTRUCTIONS, ViewContent};

/// Renders a session view, with errors shown as the fallback message.
pub fn session_content(content: &Result<ViewContent, SharedSearchError>) -> String {
    match content {
        Ok(content) => view_content(content),
        Err(error) => format!("Something went wrong: {error}"),
    }
}

pub fn view_content(content: &ViewContent) -> String {
    match content {
        ViewContent::Skeleton => "Loading…".to_string(),
        ViewContent::Instructions => INSTRUCTIONS.to_string(),
        ViewContent::Results { movies, pagination } => {
            if movies.is_empty() {
                return "No movies found".to_string();
            }
            let mut lines: Vec<String> = movies.iter().map(movie_line).collect();
            if let Some(pagination) = pagination {
                lines.push(String::new());
                lines.push(pagination_line(pagination));
            }
            lines.join("\n")
        }
    }
}

fn movie_line(movie: &MovieSummary) -> String {
    let year = movie
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let rating = movie
        .vote_average
        .filter(|r| *r > 0.0)
        .map(|r| format!("  ★ {r:.1}"))
        .unwrap_or_default();
    format!("{:>8}  {}{year}{rating}", movie.id, movie.title)
}

fn pagination_line(pagination: &Pagination) -> String {
    let pages: Vec<String> = pagination
        .items()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == pagination.current() => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();
    format!(
        "Page {} of {}: {}",
        pagination.current(),
        pagination.total_pages(),
        pages.join(" ")
    )
}

pub fn movie_detail(detail: &MovieDetail) -> String {
    let mut lines = vec![match detail.release_year() {
        Some(year) => format!("{} ({year})", detail.title),
        None => detail.title.clone(),
    }];
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{tagline}\""));
    }
    if let Some(runtime) = detail.runtime {
        lines.push(format!("Runtime: {runtime} min"));
    }
    if !detail.genres.is_empty() {
        let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(format!("Genres: {}", genres.join(", ")));
    }
    if let Some(overview) = &detail.overview {
        lines.push(String::new());
        lines.push(overview.clone());
    }
    lines.join("\n")
}
