//! Movie detail page

use axum::extract::Path;
use axum::response::Html;

use crate::components::{card, escape_html};
use crate::pages::base::render_page;

/// Renders the detail route. Shows the movie identifier only.
pub async fn movie_detail_page(Path(id): Path<String>) -> Html<String> {
    let content = card(
        None,
        &format!(
            r#"<p class="text-2xl text-white">Movie ID: {}</p>
            <a href="javascript:history.back()" class="inline-block mt-6 text-marquee-400 hover:underline">← Back to results</a>"#,
            escape_html(&id)
        ),
    );

    render_page("Movie", "movie", &content)
}
