//! Fake OMDb search endpoint served by axum on an ephemeral port.
//!
//! Behavior is keyed by the `s` parameter so tests can pick an outcome by
//! picking a keyword.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use moodreel_core::config::CatalogConfig;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

pub const TEST_API_KEY: &str = "integration-test-key";

/// Delay of the `horror` keyword, longer than any other response.
pub const SLOW_RESPONSE: Duration = Duration::from_millis(300);

type RequestLog = Arc<Mutex<Vec<HashMap<String, String>>>>;

pub struct FakeOmdbServer {
    pub base_url: String,
    requests: RequestLog,
    task: JoinHandle<()>,
}

impl FakeOmdbServer {
    pub async fn start() -> Self {
        let requests = RequestLog::default();
        let app = Router::new()
            .route("/", get(search))
            .with_state(Arc::clone(&requests));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{address}/"),
            requests,
            task,
        }
    }

    /// Catalog configuration pointing at this server with the test key.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.base_url.clone(),
            api_key: Some(TEST_API_KEY.to_string()),
            request_timeout: Duration::from_secs(2),
            ..CatalogConfig::default()
        }
    }

    /// Query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeOmdbServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn search(
    State(requests): State<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    requests.lock().unwrap().push(params.clone());

    if params.get("apikey").map(String::as_str) != Some(TEST_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"Response": "False", "Error": "Invalid API key!"})),
        )
            .into_response();
    }

    let keyword = params.get("s").cloned().unwrap_or_default();
    let kind = params.get("type").cloned().unwrap_or_default();
    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);

    match keyword.as_str() {
        "adventure" => Json(found(&keyword, &kind, page, 5, 50)).into_response(),
        "drama" => match page {
            1 => Json(found(&keyword, &kind, page, 10, 15)).into_response(),
            2 => Json(found(&keyword, &kind, page, 5, 15)).into_response(),
            _ => Json(not_found(Some("Movie not found!"))).into_response(),
        },
        "horror" => {
            tokio::time::sleep(SLOW_RESPONSE).await;
            Json(found(&keyword, &kind, page, 3, 3)).into_response()
        }
        "documentary" => Json(not_found(None)).into_response(),
        "thriller" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "fantasy" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => Json(not_found(Some("Movie not found!"))).into_response(),
    }
}

fn found(keyword: &str, kind: &str, page: u32, count: usize, total: u64) -> Value {
    let kind = if kind.is_empty() { "movie" } else { kind };
    let items: Vec<Value> = (0..count)
        .map(|i| {
            let poster = if i % 2 == 0 {
                "N/A".to_string()
            } else {
                format!("https://posters.example/{keyword}/{page}/{i}.jpg")
            };
            json!({
                "Title": format!("{keyword} page {page} #{i}"),
                "Year": format!("{}", 2000 + i),
                "imdbID": format!("tt-{keyword}-{page}-{i}"),
                "Type": kind,
                "Poster": poster,
            })
        })
        .collect();

    json!({
        "Search": items,
        "totalResults": total.to_string(),
        "Response": "True",
    })
}

fn not_found(error: Option<&str>) -> Value {
    match error {
        Some(error) => json!({"Response": "False", "Error": error}),
        None => json!({"Response": "False"}),
    }
}
