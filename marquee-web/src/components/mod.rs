//! Reusable HTML components for the HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments shared by full pages and
//! HTMX partial responses.

pub mod feedback;
pub mod layout;
pub mod movies;
pub mod pagination;

pub use feedback::{error_fallback, instructions, results_skeleton};
pub use layout::{card, escape_html, input, nav_bar, page_header};
pub use movies::{MovieCardParams, movie_card, movie_results};
pub use pagination::pagination_nav;
