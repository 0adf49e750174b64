//! Search and pagination HTMX handlers

use axum::extract::{Extension, Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use moodreel_core::ContentType;
use moodreel_search::SearchError;
use serde::Deserialize;

use crate::components::{error_banner, results_panel};
use crate::server::AppState;
use crate::sessions::ClientSession;

/// Response for every fragment handler.
pub type FragmentResult = Result<Html<String>, (StatusCode, Html<String>)>;

/// Form data for a mood search
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// Mood as typed
    #[serde(default)]
    pub mood: String,
    /// `movie`, `series`, or empty when nothing was picked
    #[serde(default)]
    pub content_type: String,
}

impl SearchForm {
    /// Selected content type; unknown values count as no selection.
    fn content_type(&self) -> ContentType {
        self.content_type.parse().unwrap_or_else(|error| {
            tracing::debug!(%error, "Ignoring unknown content type");
            ContentType::Unset
        })
    }
}

/// Handles the search form submission.
///
/// Validation failures are part of the session snapshot, so the fragment
/// always reflects what the session did with the input.
pub async fn submit_search(
    State(state): State<AppState>,
    Extension(session): Extension<ClientSession>,
    Form(form): Form<SearchForm>,
) -> FragmentResult {
    match session
        .handle
        .submit_search(&form.mood, form.content_type())
        .await
    {
        Ok(request) => {
            tracing::debug!(keyword = %request.keyword, "Search submitted from web");
        }
        Err(SearchError::SessionClosed) => return Err(session_unavailable()),
        Err(error) => {
            tracing::debug!(%error, "Search rejected");
        }
    }

    Ok(render_results(&state, &session))
}

/// Moves to the next page when there is one.
pub async fn next_page(
    State(state): State<AppState>,
    Extension(session): Extension<ClientSession>,
) -> FragmentResult {
    change_page(&state, &session, 1).await
}

/// Moves to the previous page when there is one.
pub async fn previous_page(
    State(state): State<AppState>,
    Extension(session): Extension<ClientSession>,
) -> FragmentResult {
    change_page(&state, &session, -1).await
}

/// Current results panel; polled while a request is in flight.
pub async fn results_fragment(
    State(state): State<AppState>,
    Extension(session): Extension<ClientSession>,
) -> Html<String> {
    render_results(&state, &session)
}

async fn change_page(state: &AppState, session: &ClientSession, delta: i64) -> FragmentResult {
    session
        .handle
        .go_to_page(delta)
        .await
        .map_err(|_| session_unavailable())?;

    Ok(render_results(state, session))
}

fn render_results(state: &AppState, session: &ClientSession) -> Html<String> {
    let view = session.handle.snapshot();
    Html(results_panel(&view, state.poll_interval.as_millis()))
}

fn session_unavailable() -> (StatusCode, Html<String>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(error_banner(SearchError::SessionClosed.user_message().as_str())),
    )
}
