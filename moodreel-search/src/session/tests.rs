//! Session actor tests driven through the public handle.

use std::sync::Arc;
use std::time::Duration;

use moodreel_core::{ContentType, MovieSummary};
use tokio::time::timeout;

use super::{Phase, SearchSessionHandle, spawn_search_session};
use crate::errors::{CatalogError, SearchError, TRANSPORT_FAILURE_MESSAGE};
use crate::providers::GatedCatalog;
use crate::types::CatalogPage;

const WAIT: Duration = Duration::from_secs(2);

struct SessionFixture {
    catalog: GatedCatalog,
    session: SearchSessionHandle,
}

impl SessionFixture {
    fn new() -> Self {
        let catalog = GatedCatalog::new();
        let session = spawn_search_session(Arc::new(catalog.clone()));
        Self { catalog, session }
    }

    fn page(&self, keyword: &str, count: usize, total: u64) -> Result<CatalogPage, CatalogError> {
        Ok(CatalogPage {
            items: (0..count)
                .map(|i| MovieSummary {
                    id: format!("{keyword}-{i}"),
                    title: format!("{keyword} {i}"),
                    year: "2010".to_string(),
                    poster_url: "N/A".to_string(),
                    kind: "movie".to_string(),
                })
                .collect(),
            total_count: total,
        })
    }

    async fn settled(&self) -> super::QueryView {
        timeout(WAIT, self.session.wait_until_settled())
            .await
            .expect("session did not settle in time")
            .expect("session closed")
    }

    async fn search_and_settle(&self, mood: &str, count: usize, total: u64) {
        let before = self.catalog.call_count();
        let request = self
            .session
            .submit_search(mood, ContentType::Movie)
            .await
            .unwrap();
        self.catalog.wait_for_calls(before + 1).await;
        assert!(
            self.catalog
                .release(before, self.page(&request.keyword, count, total))
        );
        self.settled().await;
    }
}

#[tokio::test]
async fn test_happy_search_populates_results() {
    let fixture = SessionFixture::new();

    let request = fixture
        .session
        .submit_search("happy", ContentType::Movie)
        .await
        .unwrap();
    assert_eq!(request.keyword, "adventure");
    assert_eq!(request.page, 1);

    fixture.catalog.wait_for_calls(1).await;
    assert!(fixture.session.snapshot().loading);
    assert_eq!(fixture.session.snapshot().phase, Phase::Loading);

    fixture.catalog.release(0, fixture.page("adventure", 5, 50));
    let view = fixture.settled().await;

    assert_eq!(view.results.len(), 5);
    assert_eq!(view.total_count, 50);
    assert_eq!(view.page, 1);
    assert_eq!(view.page_count, 5);
    assert!(view.has_next);
    assert!(!view.loading);
    assert_eq!(view.phase, Phase::Ready);
    assert_eq!(fixture.catalog.calls()[0].content_type, ContentType::Movie);
}

#[tokio::test]
async fn test_unmapped_mood_issues_no_request() {
    let fixture = SessionFixture::new();
    fixture.search_and_settle("happy", 5, 50).await;

    let result = fixture
        .session
        .submit_search("xyz", ContentType::Movie)
        .await;

    assert_eq!(
        result,
        Err(SearchError::UnmappedMood {
            input: "xyz".to_string()
        })
    );
    let view = fixture.session.snapshot();
    assert_eq!(view.error.as_deref(), Some("Mood not recognized: 'xyz'"));
    assert_eq!(view.results.len(), 5);
    assert_eq!(fixture.catalog.call_count(), 1);
}

#[tokio::test]
async fn test_missing_type_issues_no_request() {
    let fixture = SessionFixture::new();

    let result = fixture
        .session
        .submit_search("happy", ContentType::Unset)
        .await;

    assert!(matches!(result, Err(SearchError::MissingInput { .. })));
    assert_eq!(fixture.catalog.call_count(), 0);
    assert_eq!(fixture.session.snapshot().phase, Phase::Idle);
}

#[tokio::test]
async fn test_previous_page_at_first_page_is_noop() {
    let fixture = SessionFixture::new();
    fixture.search_and_settle("sad", 10, 30).await;
    let before = fixture.session.snapshot();

    let issued = fixture.session.previous_page().await.unwrap();

    assert!(issued.is_none());
    assert_eq!(fixture.session.snapshot(), before);
    assert_eq!(fixture.catalog.call_count(), 1);
}

#[tokio::test]
async fn test_next_page_fetches_new_page() {
    let fixture = SessionFixture::new();
    fixture.search_and_settle("sad", 10, 15).await;

    let issued = fixture.session.next_page().await.unwrap().unwrap();
    assert_eq!(issued.page, 2);
    assert_eq!(issued.keyword, "drama");
    assert_eq!(fixture.session.snapshot().page, 2);
    assert!(fixture.session.snapshot().loading);

    fixture.catalog.wait_for_calls(2).await;
    fixture.catalog.release(1, fixture.page("drama", 5, 15));
    let view = fixture.settled().await;

    assert_eq!(view.page, 2);
    assert_eq!(view.page_count, 2);
    assert!(!view.has_next);
    assert!(view.has_prev);
    assert!(fixture.session.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_late_response_does_not_clobber_newer_search() {
    let fixture = SessionFixture::new();

    fixture
        .session
        .submit_search("happy", ContentType::Movie)
        .await
        .unwrap();
    fixture
        .session
        .submit_search("gloomy", ContentType::Movie)
        .await
        .unwrap();
    fixture.catalog.wait_for_calls(2).await;

    // Newer request settles first, older one afterwards.
    fixture.catalog.release(1, fixture.page("horror", 3, 3));
    let view = fixture.settled().await;
    assert_eq!(view.keyword.as_deref(), Some("horror"));

    fixture.catalog.release(0, fixture.page("adventure", 10, 99));
    // Give the stale settlement time to reach the actor.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let view = fixture.session.snapshot();
    assert_eq!(view.total_count, 3);
    assert_eq!(view.results[0].id, "horror-0");
    assert!(!view.loading);
}

#[tokio::test]
async fn test_older_request_settling_first_keeps_loading() {
    let fixture = SessionFixture::new();
    fixture.search_and_settle("happy", 10, 50).await;

    fixture.session.next_page().await.unwrap().unwrap();
    fixture.session.next_page().await.unwrap().unwrap();
    fixture.catalog.wait_for_calls(3).await;

    fixture.catalog.release(1, fixture.page("page-two", 10, 50));
    tokio::time::sleep(Duration::from_millis(50)).await;
    let view = fixture.session.snapshot();
    assert!(view.loading);
    assert_eq!(view.page, 3);

    fixture.catalog.release(2, fixture.page("page-three", 10, 50));
    let view = fixture.settled().await;
    assert_eq!(view.page, 3);
    assert_eq!(view.results[0].id, "page-three-0");
}

#[tokio::test]
async fn test_not_found_response_clears_results() {
    let fixture = SessionFixture::new();
    fixture.search_and_settle("happy", 5, 50).await;

    fixture
        .session
        .submit_search("bored", ContentType::Series)
        .await
        .unwrap();
    fixture.catalog.wait_for_calls(2).await;
    fixture.catalog.release(
        1,
        Err(CatalogError::NotFound {
            reason: Some("Movie not found!".to_string()),
        }),
    );
    let view = fixture.settled().await;

    assert!(view.results.is_empty());
    assert_eq!(view.total_count, 0);
    assert_eq!(view.error.as_deref(), Some("Movie not found!"));
    assert_eq!(view.phase, Phase::Failed);
}

#[tokio::test]
async fn test_transport_failure_is_recoverable() {
    let fixture = SessionFixture::new();

    fixture
        .session
        .submit_search("tired", ContentType::Movie)
        .await
        .unwrap();
    fixture.catalog.wait_for_calls(1).await;
    fixture
        .catalog
        .release(0, Err(CatalogError::HttpStatus { status: 502 }));
    let view = fixture.settled().await;
    assert_eq!(view.error.as_deref(), Some(TRANSPORT_FAILURE_MESSAGE));
    assert!(!view.loading);

    fixture.search_and_settle("tired", 4, 4).await;
    let view = fixture.session.snapshot();
    assert!(view.error.is_none());
    assert_eq!(view.results.len(), 4);
}

#[tokio::test]
async fn test_subscribers_see_loading_then_settled() {
    let fixture = SessionFixture::new();
    let mut updates = fixture.session.subscribe();

    fixture
        .session
        .submit_search("curious", ContentType::Series)
        .await
        .unwrap();
    timeout(WAIT, updates.changed()).await.unwrap().unwrap();
    assert!(updates.borrow_and_update().loading);

    fixture.catalog.wait_for_calls(1).await;
    fixture.catalog.release(0, fixture.page("educational", 1, 1));
    timeout(WAIT, updates.changed()).await.unwrap().unwrap();
    let view = updates.borrow_and_update().clone();
    assert!(!view.loading);
    assert_eq!(view.keyword.as_deref(), Some("educational"));
}

#[tokio::test]
async fn test_shutdown_closes_session() {
    let fixture = SessionFixture::new();
    fixture.session.shutdown().await.unwrap();

    let result = fixture
        .session
        .submit_search("happy", ContentType::Movie)
        .await;
    assert_eq!(result, Err(SearchError::SessionClosed));
}
