//! Pagination control

use marquee_core::{PageItem, Pagination, SearchState};

use super::layout::link_button;
use crate::pages::search::{RESULTS_TARGET, results_href};

/// Renders previous/next controls and the page list for `search`.
///
/// Links keep the search text and swap only the result region; the
/// response carries the URL to push.
pub fn pagination_nav(search: &str, pagination: &Pagination) -> String {
    let link_attrs = |page: u32| {
        let state = SearchState::new(search, page);
        format!(
            r#"href="{}" hx-get="{}" hx-target="{RESULTS_TARGET}" data-page="{page}""#,
            state.href("/"),
            results_href(&state)
        )
    };

    let previous = match pagination.previous() {
        Some(page) => link_button("← Previous", "ghost", Some(&link_attrs(page)), false),
        None => link_button("← Previous", "ghost", None, true),
    };
    let next = match pagination.next() {
        Some(page) => link_button("Next →", "ghost", Some(&link_attrs(page)), false),
        None => link_button("Next →", "ghost", None, true),
    };

    let pages: String = pagination
        .items()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == pagination.current() => format!(
                r#"<span class="px-3 py-2 rounded-lg text-sm font-medium bg-marquee-500 text-white" aria-current="page">{page}</span>"#
            ),
            PageItem::Page(page) => {
                link_button(&page.to_string(), "secondary", Some(&link_attrs(page)), false)
            }
            PageItem::Ellipsis => r#"<span class="px-2 text-gray-500">…</span>"#.to_string(),
        })
        .collect();

    format!(
        r#"<nav class="flex items-center justify-center space-x-2 mt-8" aria-label="Pagination">
            {previous}
            {pages}
            {next}
        </nav>"#
    )
}
