//! HTMX partial update handlers
//!
//! Every handler answers with the results panel fragment, which replaces
//! the panel in place.

pub mod search_actions;

// Re-export main HTMX handlers
pub use search_actions::{
    FragmentResult, SearchForm, next_page, previous_page, results_fragment, submit_search,
};
