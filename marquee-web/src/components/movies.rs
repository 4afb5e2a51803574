//! Movie result components

use marquee_search::MovieSummary;

use super::layout::{escape_html, grid};

const OVERVIEW_PREVIEW_CHARS: usize = 160;
const POSTER_SIZE: &str = "w342";

/// Parameters for rendering one movie card.
pub struct MovieCardParams<'a> {
    pub id: u64,
    pub title: &'a str,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub overview: Option<&'a str>,
    pub poster_url: Option<String>,
}

impl<'a> From<&'a MovieSummary> for MovieCardParams<'a> {
    fn from(movie: &'a MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: &movie.title,
            year: movie.release_year(),
            rating: movie.vote_average,
            overview: movie.overview.as_deref(),
            poster_url: movie.poster_url(POSTER_SIZE),
        }
    }
}

/// Renders a movie card linking to its detail route.
pub fn movie_card(params: MovieCardParams<'_>) -> String {
    let MovieCardParams {
        id,
        title,
        year,
        rating,
        overview,
        poster_url,
    } = params;

    let title = escape_html(title);
    let poster_html = match poster_url {
        Some(url) => format!(
            r#"<img src="{}" alt="{title}" loading="lazy" class="w-full h-72 object-cover rounded-md mb-4" />"#,
            escape_html(&url)
        ),
        None => r#"<div class="w-full h-72 bg-gray-700 rounded-md mb-4 flex items-center justify-center text-gray-500">No poster</div>"#.to_string(),
    };
    let year_html = year
        .map(|y| format!(r#"<span class="text-gray-400">{y}</span>"#))
        .unwrap_or_default();
    let rating_html = rating
        .filter(|r| *r > 0.0)
        .map(|r| format!(r#"<span class="text-yellow-400">★ {r:.1}</span>"#))
        .unwrap_or_default();
    let overview_html = overview
        .map(|text| {
            format!(
                r#"<p class="text-sm text-gray-400 mt-2">{}</p>"#,
                escape_html(&preview(text))
            )
        })
        .unwrap_or_default();

    format!(
        r#"<a href="/movies/{id}" class="block bg-gray-800 border border-gray-700 rounded-lg p-4 hover:border-marquee-500 transition-colors" data-movie-id="{id}">
            {poster_html}
            <h3 class="text-lg font-semibold text-white">{title}</h3>
            <div class="flex items-center justify-between text-sm mt-1">
                {year_html}
                {rating_html}
            </div>
            {overview_html}
        </a>"#
    )
}

fn preview(text: &str) -> String {
    if text.chars().count() <= OVERVIEW_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(OVERVIEW_PREVIEW_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// Renders the result list, or a no-match message for an empty page.
pub fn movie_results(movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return r#"<div class="text-center py-12 text-gray-400">No movies found</div>"#.to_string();
    }

    let cards: String = movies
        .iter()
        .map(|movie| movie_card(MovieCardParams::from(movie)))
        .collect();

    grid("grid-cols-1 sm:grid-cols-2 lg:grid-cols-4", &cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_card_links_to_detail_and_escapes_title() {
        let movie = MovieSummary {
            release_date: Some("1995-12-15".to_string()),
            vote_average: Some(7.94),
            ..MovieSummary::new(949, "Heat <1995>")
        };

        let html = movie_card(MovieCardParams::from(&movie));
        assert!(html.contains(r#"href="/movies/949""#));
        assert!(html.contains("Heat &lt;1995&gt;"));
        assert!(html.contains("1995"));
        assert!(html.contains("★ 7.9"));
        assert!(html.contains("No poster"));
    }

    #[test]
    fn test_long_overview_is_shortened() {
        let long = "word ".repeat(100);
        let shortened = preview(&long);
        assert!(shortened.ends_with('…'));
        assert!(shortened.chars().count() <= OVERVIEW_PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_empty_results_message() {
        assert!(movie_results(&[]).contains("No movies found"));
    }
}
