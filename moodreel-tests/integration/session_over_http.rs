//! Search sessions driving the real OMDb provider over HTTP

use std::sync::Arc;
use std::time::Duration;

use moodreel_core::ContentType;
use moodreel_search::{OmdbProvider, Phase, SearchSessionHandle, spawn_search_session};
use tokio::time::timeout;

use crate::fake_omdb::{FakeOmdbServer, SLOW_RESPONSE};

const WAIT: Duration = Duration::from_secs(5);

fn session(server: &FakeOmdbServer) -> SearchSessionHandle {
    let provider = OmdbProvider::from_config(&server.catalog_config()).unwrap();
    spawn_search_session(Arc::new(provider))
}

async fn settled(session: &SearchSessionHandle) -> moodreel_search::QueryView {
    timeout(WAIT, session.wait_until_settled())
        .await
        .expect("session did not settle in time")
        .unwrap()
}

#[tokio::test]
async fn test_happy_movie_search() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    session.submit_search("happy", ContentType::Movie).await.unwrap();
    let view = settled(&session).await;

    assert_eq!(view.phase, Phase::Ready);
    assert_eq!(view.keyword.as_deref(), Some("adventure"));
    assert_eq!(view.results.len(), 5);
    assert_eq!(view.total_count, 50);
    assert_eq!(view.page, 1);
    assert_eq!(view.page_count, 5);
    assert!(view.has_next);
    assert!(!view.has_prev);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn test_second_page_of_fifteen_is_last() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    session.submit_search("sad", ContentType::Movie).await.unwrap();
    settled(&session).await;
    let issued = session.next_page().await.unwrap().unwrap();
    assert_eq!(issued.page, 2);
    let view = settled(&session).await;

    assert_eq!(view.page, 2);
    assert_eq!(view.results.len(), 5);
    assert_eq!(view.page_count, 2);
    assert!(!view.has_next);
    assert!(view.has_prev);
    assert_eq!(server.requests().last().unwrap()["page"], "2");
}

#[tokio::test]
async fn test_unmapped_mood_never_reaches_catalog() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    assert!(session.submit_search("xyz", ContentType::Movie).await.is_err());

    let view = session.snapshot();
    assert_eq!(view.error.as_deref(), Some("Mood not recognized: 'xyz'"));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_not_found_reports_catalog_reason() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    session.submit_search("confused", ContentType::Movie).await.unwrap();
    let view = settled(&session).await;

    assert_eq!(view.phase, Phase::Failed);
    assert!(view.results.is_empty());
    assert_eq!(view.total_count, 0);
    assert_eq!(view.error.as_deref(), Some("Movie not found!"));
}

#[tokio::test]
async fn test_not_found_without_reason_uses_fallback() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    session
        .submit_search("overthinking", ContentType::Series)
        .await
        .unwrap();
    let view = settled(&session).await;

    assert_eq!(view.error.as_deref(), Some("No results found"));
}

#[tokio::test]
async fn test_server_failure_shows_generic_message() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    session.submit_search("bored", ContentType::Movie).await.unwrap();
    let view = settled(&session).await;

    assert_eq!(
        view.error.as_deref(),
        Some("Could not reach the movie catalog. Please try again.")
    );
    assert!(!view.loading);
}

#[tokio::test]
async fn test_slow_response_loses_to_newer_search() {
    let server = FakeOmdbServer::start().await;
    let session = session(&server);

    // gloomy -> horror is answered slowly, happy -> adventure immediately.
    session.submit_search("gloomy", ContentType::Movie).await.unwrap();
    session.submit_search("happy", ContentType::Movie).await.unwrap();

    let view = settled(&session).await;
    assert_eq!(view.keyword.as_deref(), Some("adventure"));

    tokio::time::sleep(SLOW_RESPONSE + Duration::from_millis(200)).await;
    let view = session.snapshot();
    assert_eq!(view.keyword.as_deref(), Some("adventure"));
    assert_eq!(view.total_count, 50);
    assert!(view.results.iter().all(|m| m.id.starts_with("tt-adventure")));
    assert_eq!(server.requests().len(), 2);
}
