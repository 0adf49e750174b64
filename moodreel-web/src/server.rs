//! HTMX + Tailwind web server for Moodreel
//!
//! Every browser drives its own search session. Pages and fragments render
//! that session's latest snapshot; form posts drive it.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::{Router, middleware};
use moodreel_core::config::WebConfig;
use moodreel_core::{MoodTable, MoodreelConfig, MoodreelError, RuntimeMode};
use moodreel_search::{CatalogProvider, provider_for_mode};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{api_moods, api_state};
use crate::htmx::{next_page, previous_page, results_fragment, submit_search};
use crate::pages::search_page;
use crate::sessions::{SessionRegistry, attach_session};

/// Errors raised while starting or running the web server.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Catalog provider could not be built from configuration.
    #[error("Catalog setup failed: {reason}")]
    CatalogSetup {
        /// Underlying provider error text
        reason: String,
    },

    /// Listener could not bind or the server loop failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<WebError> for MoodreelError {
    fn from(error: WebError) -> Self {
        match error {
            WebError::CatalogSetup { reason } => MoodreelError::Configuration { reason },
            WebError::Io(io) => MoodreelError::from_server_error(io),
        }
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Search sessions, one per browser
    pub sessions: SessionRegistry,
    /// Mood table used for the suggestions list
    pub moods: MoodTable,
    /// Delay between results polls while a request is in flight
    pub poll_interval: Duration,
    /// Mode the catalog provider was selected for
    pub mode: RuntimeMode,
}

impl AppState {
    /// State whose browser sessions all search through `provider`.
    pub fn new(provider: Arc<dyn CatalogProvider>, web: &WebConfig, mode: RuntimeMode) -> Self {
        Self {
            sessions: SessionRegistry::new(provider, web.session_idle_timeout),
            moods: MoodTable::builtin(),
            poll_interval: web.poll_interval,
            mode,
        }
    }
}

/// Builds the application router with all page, fragment and API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Main page
        .route("/", get(search_page))
        // HTMX partial update endpoints
        .route("/htmx/search", post(submit_search))
        .route("/htmx/page/next", post(next_page))
        .route("/htmx/page/prev", post(previous_page))
        .route("/htmx/results", get(results_fragment))
        // JSON API endpoints
        .route("/api/state", get(api_state))
        .route("/api/moods", get(api_moods))
        .layer(middleware::from_fn_with_state(state.clone(), attach_session))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Starts the web server and serves until the process is stopped.
///
/// # Errors
/// - `WebError::CatalogSetup` - Provider could not be built for `mode`
/// - `WebError::Io` - Failed to bind `config.web` address or serve
pub async fn run_server(config: MoodreelConfig, mode: RuntimeMode) -> Result<(), WebError> {
    let provider = provider_for_mode(mode, &config.catalog).map_err(|e| WebError::CatalogSetup {
        reason: e.to_string(),
    })?;
    let state = AppState::new(provider, &config.web, mode);
    let app = build_router(state);

    let address = config.web.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, %mode, "Moodreel server listening");
    println!("Moodreel running on http://{address}");

    axum::serve(listener, app).await?;
    Ok(())
}
