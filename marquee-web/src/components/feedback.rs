//! Loading, empty-state and error components

use super::layout::escape_html;
use crate::view::INSTRUCTIONS;

const SKELETON_CARDS: usize = 8;

/// Renders pulsing placeholder cards shown while results load.
pub fn results_skeleton() -> String {
    let cards: String = (0..SKELETON_CARDS)
        .map(|_| {
            r#"<div class="bg-gray-800 border border-gray-700 rounded-lg p-4 animate-pulse">
                <div class="w-full h-72 bg-gray-700 rounded-md mb-4"></div>
                <div class="h-5 bg-gray-700 rounded w-3/4 mb-2"></div>
                <div class="h-4 bg-gray-700 rounded w-1/4"></div>
            </div>"#
        })
        .collect();

    format!(
        r#"<div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6" data-skeleton="true" aria-busy="true">{cards}</div>"#
    )
}

/// Renders the empty-state message asking for a movie title.
pub fn instructions() -> String {
    format!(
        r#"<div class="text-center py-16">
            <div class="text-6xl mb-4">🎬</div>
            <p class="text-xl text-gray-300">{INSTRUCTIONS}</p>
        </div>"#
    )
}

/// Renders the error boundary fallback.
pub fn error_fallback(message: &str) -> String {
    format!(
        r#"<div class="bg-red-900 bg-opacity-30 border border-red-700 rounded-lg p-6 text-center" role="alert">
            <h2 class="text-xl font-semibold text-red-300 mb-2">Something went wrong</h2>
            <p class="text-gray-300 mb-4">{}</p>
            <a href="/" class="text-marquee-400 hover:underline">Start a new search</a>
        </div>"#,
        escape_html(message)
    )
}
