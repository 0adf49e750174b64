//! Mood search page

use axum::extract::{Extension, State};
use axum::response::Html;

use crate::components::{card, page_header, render_page, results_panel, search_form};
use crate::server::AppState;
use crate::sessions::ClientSession;

/// Full search page rendered from the browser's current session snapshot.
pub async fn search_page(
    State(state): State<AppState>,
    Extension(session): Extension<ClientSession>,
) -> Html<String> {
    let view = session.handle.snapshot();

    let content = format!(
        "{header}{form}{results}",
        header = page_header(
            "What are you in the mood for?",
            Some("Pick a mood and we'll find movies or series to match."),
        ),
        form = card(None, &search_form(&state.moods, &view)),
        results = results_panel(&view, state.poll_interval.as_millis()),
    );

    render_page("Search", &content, state.mode.is_development())
}
