//! JSON API handlers

use axum::extract::{Extension, State};
use axum::response::Json;
use moodreel_core::mood::MoodEntry;
use moodreel_search::QueryView;

use crate::server::AppState;
use crate::sessions::ClientSession;

/// Snapshot of the calling browser's session.
pub async fn api_state(Extension(session): Extension<ClientSession>) -> Json<QueryView> {
    Json(session.handle.snapshot())
}

/// Every known mood with the keyword it searches for.
pub async fn api_moods(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    Json(state.moods.moods().collect())
}
