//! Full page handlers

pub mod search;

pub use search::search_page;
