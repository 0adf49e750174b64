//! Moodreel Web - HTMX UI and JSON state API

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered pages over one search session per browser. HTMX fragments swap
//! the results panel in place; `/api/state` exposes the same snapshot as JSON.

pub mod components;
pub mod handlers;
pub mod htmx;
pub mod pages;
pub mod server;
pub mod sessions;

// Re-export main types
pub use server::{AppState, WebError, build_router, run_server};
pub use sessions::{ClientSession, SESSION_COOKIE, SessionRegistry};
