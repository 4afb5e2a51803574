//! Full page and partial handlers
//!
//! Pages compose components into complete HTML responses on the shared base
//! layout; the search partial re-renders only the result region.

pub mod base;
pub mod detail;
pub mod search;

pub use base::render_page;
pub use detail::movie_detail_page;
pub use search::{render_view_content, search_page, search_results};
