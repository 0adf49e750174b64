//! Reusable HTML components for HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments that can be used
//! in full pages or as HTMX partial updates. All styling uses Tailwind CSS.

pub mod layout;
pub mod results;
pub mod search_form;

// Re-export main component functions
pub use layout::{button, card, escape_html, page_header, render_page};
pub use results::{
    POSTER_PLACEHOLDER, error_banner, loading_indicator, movie_card, pagination_controls,
    results_grid, results_panel,
};
pub use search_form::search_form;
