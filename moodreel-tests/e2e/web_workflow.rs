//! Search, poll and paginate through the HTMX endpoints

use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use moodreel_core::RuntimeMode;
use moodreel_core::config::WebConfig;
use moodreel_search::provider_for_mode;
use moodreel_web::{AppState, build_router};
use serde_json::Value;
use tower::ServiceExt;

use crate::fake_omdb::{FakeOmdbServer, TEST_API_KEY};

struct WebFixture {
    server: FakeOmdbServer,
    app: Router,
    browser: Browser,
}

impl WebFixture {
    async fn start() -> Self {
        let server = FakeOmdbServer::start().await;
        let provider = provider_for_mode(RuntimeMode::Production, &server.catalog_config()).unwrap();
        let state = AppState::new(provider, &WebConfig::default(), RuntimeMode::Production);
        let app = build_router(state);
        Self {
            server,
            browser: Browser::new(app.clone()),
            app,
        }
    }

    /// Another browser against the same server, without a session cookie yet.
    fn other_browser(&self) -> Browser {
        Browser::new(self.app.clone())
    }

    async fn get(&self, uri: &str) -> String {
        self.browser.get(uri).await
    }

    async fn post(&self, uri: &str, form: &str) -> String {
        self.browser.post(uri, form).await
    }

    async fn poll_until_settled(&self) -> String {
        self.browser.poll_until_settled().await
    }

    async fn state(&self) -> Value {
        self.browser.state().await
    }
}

/// Router client that keeps the session cookie between requests.
struct Browser {
    app: Router,
    cookie: Mutex<Option<String>>,
}

impl Browser {
    fn new(app: Router) -> Self {
        Self {
            app,
            cookie: Mutex::new(None),
        }
    }

    async fn send(&self, mut request: Request<Body>) -> (StatusCode, String) {
        let cookie = self.cookie.lock().unwrap().clone();
        if let Some(cookie) = cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            *self.cookie.lock().unwrap() = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get(&self, uri: &str) -> String {
        let (status, body) = self
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK, "GET {uri}");
        body
    }

    async fn post(&self, uri: &str, form: &str) -> String {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        assert_eq!(status, StatusCode::OK, "POST {uri}");
        body
    }

    /// Polls the results fragment the way the page does until it stops polling.
    async fn poll_until_settled(&self) -> String {
        for _ in 0..50 {
            let fragment = self.get("/htmx/results").await;
            if !fragment.contains("hx-trigger") {
                return fragment;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("results never settled");
    }

    async fn state(&self) -> Value {
        serde_json::from_str(&self.get("/api/state").await).unwrap()
    }
}

#[tokio::test]
async fn test_search_then_paginate() {
    let fixture = WebFixture::start().await;

    let fragment = fixture
        .post("/htmx/search", "mood=sad&content_type=movie")
        .await;
    assert!(fragment.contains(r#"id="results""#));

    let fragment = fixture.poll_until_settled().await;
    assert!(fragment.contains("drama page 1 #0"));
    assert!(fragment.contains("Page 1 of 2"));
    assert!(fragment.contains("15 results"));
    assert!(fragment.contains("via.placeholder.com"));

    fixture.post("/htmx/page/next", "").await;
    let fragment = fixture.poll_until_settled().await;
    assert!(fragment.contains("drama page 2 #0"));
    assert!(fragment.contains("Page 2 of 2"));

    let state = fixture.state().await;
    assert_eq!(state["page"], 2);
    assert_eq!(state["has_next"], false);
    assert_eq!(state["has_prev"], true);

    // Past the last page nothing is requested.
    let before = fixture.server.requests().len();
    fixture.post("/htmx/page/next", "").await;
    assert_eq!(fixture.server.requests().len(), before);

    fixture.post("/htmx/page/prev", "").await;
    fixture.poll_until_settled().await;
    assert_eq!(fixture.state().await["page"], 1);
}

#[tokio::test]
async fn test_previous_before_any_search_is_noop() {
    let fixture = WebFixture::start().await;

    fixture.post("/htmx/page/prev", "").await;
    fixture.post("/htmx/page/next", "").await;

    let state = fixture.state().await;
    assert_eq!(state["phase"], "Idle");
    assert!(fixture.server.requests().is_empty());
}

#[tokio::test]
async fn test_missing_fields_render_validation_messages() {
    let fixture = WebFixture::start().await;

    let fragment = fixture.post("/htmx/search", "mood=&content_type=").await;
    assert!(fragment.contains("Please enter a mood and select movie or series"));

    let fragment = fixture
        .post("/htmx/search", "mood=happy&content_type=")
        .await;
    assert!(fragment.contains("Please select movie or series"));

    let fragment = fixture
        .post("/htmx/search", "mood=%20%20&content_type=series")
        .await;
    assert!(fragment.contains("Please enter a mood"));

    assert!(fixture.server.requests().is_empty());
}

#[tokio::test]
async fn test_catalog_failure_then_recovery() {
    let fixture = WebFixture::start().await;

    fixture
        .post("/htmx/search", "mood=bored&content_type=movie")
        .await;
    let fragment = fixture.poll_until_settled().await;
    assert!(fragment.contains("Could not reach the movie catalog. Please try again."));

    fixture
        .post("/htmx/search", "mood=happy&content_type=series")
        .await;
    let fragment = fixture.poll_until_settled().await;
    assert!(!fragment.contains("role=\"alert\""));
    assert!(fragment.contains("adventure page 1 #0"));
    assert_eq!(fixture.server.requests().last().unwrap()["type"], "series");
}

#[tokio::test]
async fn test_api_key_stays_server_side() {
    let fixture = WebFixture::start().await;

    fixture
        .post("/htmx/search", "mood=happy&content_type=movie")
        .await;
    fixture.poll_until_settled().await;

    for uri in ["/", "/htmx/results", "/api/state", "/api/moods"] {
        assert!(!fixture.get(uri).await.contains(TEST_API_KEY), "{uri}");
    }
    assert_eq!(fixture.server.requests()[0]["apikey"], TEST_API_KEY);
}

#[tokio::test]
async fn test_two_browsers_page_independently() {
    let fixture = WebFixture::start().await;
    let first = fixture.other_browser();
    let second = fixture.other_browser();

    first.post("/htmx/search", "mood=sad&content_type=movie").await;
    first.poll_until_settled().await;
    first.post("/htmx/page/next", "").await;
    let fragment = first.poll_until_settled().await;
    assert!(fragment.contains("drama page 2 #0"));

    // The second browser starts idle and its search does not move the first.
    assert_eq!(second.state().await["phase"], "Idle");
    second
        .post("/htmx/search", "mood=happy&content_type=series")
        .await;
    let fragment = second.poll_until_settled().await;
    assert!(fragment.contains("adventure page 1 #0"));

    let state = first.state().await;
    assert_eq!(state["keyword"], "drama");
    assert_eq!(state["page"], 2);
    assert_eq!(second.state().await["page"], 1);
}
