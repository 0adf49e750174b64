//! OMDb provider against the fake catalog server

use moodreel_core::config::CatalogConfig;
use moodreel_core::{ContentType, SearchRequest};
use moodreel_search::{CatalogError, CatalogProvider, OmdbProvider};

use crate::fake_omdb::{FakeOmdbServer, TEST_API_KEY};

fn provider(server: &FakeOmdbServer) -> OmdbProvider {
    OmdbProvider::from_config(&server.catalog_config()).unwrap()
}

#[tokio::test]
async fn test_success_decodes_page_and_total() {
    let server = FakeOmdbServer::start().await;

    let page = provider(&server)
        .search_titles(&SearchRequest::first_page("adventure", ContentType::Movie))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_count, 50);
    assert_eq!(page.page_count(), 5);
    assert!(page.has_next_page(1));
    assert_eq!(page.items[0].id, "tt-adventure-1-0");
    assert_eq!(page.items[0].poster_url, "N/A");
    assert!(page.items[1].has_poster());
}

#[tokio::test]
async fn test_request_carries_query_parameters() {
    let server = FakeOmdbServer::start().await;
    let request = SearchRequest::first_page("romantic comedy", ContentType::Series).with_page(3);

    let _ = provider(&server).search_titles(&request).await;

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let params = &requests[0];
    assert_eq!(params["s"], "romantic comedy");
    assert_eq!(params["type"], "series");
    assert_eq!(params["page"], "3");
    assert_eq!(params["apikey"], TEST_API_KEY);
}

#[tokio::test]
async fn test_response_false_maps_to_not_found() {
    let server = FakeOmdbServer::start().await;

    let result = provider(&server)
        .search_titles(&SearchRequest::first_page("mystery", ContentType::Movie))
        .await;

    assert_eq!(
        result,
        Err(CatalogError::NotFound {
            reason: Some("Movie not found!".to_string())
        })
    );
}

#[tokio::test]
async fn test_response_false_without_reason() {
    let server = FakeOmdbServer::start().await;

    let result = provider(&server)
        .search_titles(&SearchRequest::first_page("documentary", ContentType::Movie))
        .await;

    assert_eq!(result, Err(CatalogError::NotFound { reason: None }));
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let server = FakeOmdbServer::start().await;

    let error = provider(&server)
        .search_titles(&SearchRequest::first_page("thriller", ContentType::Movie))
        .await
        .unwrap_err();

    assert_eq!(error, CatalogError::HttpStatus { status: 500 });
    assert!(error.is_transport());
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let server = FakeOmdbServer::start().await;

    let error = provider(&server)
        .search_titles(&SearchRequest::first_page("fantasy", ContentType::Movie))
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogError::ParseError { .. }));
    assert!(error.is_transport());
}

#[tokio::test]
async fn test_rejected_key_is_transport_failure() {
    let server = FakeOmdbServer::start().await;
    let config = CatalogConfig {
        api_key: Some("wrong-key".to_string()),
        ..server.catalog_config()
    };

    let error = OmdbProvider::from_config(&config)
        .unwrap()
        .search_titles(&SearchRequest::first_page("adventure", ContentType::Movie))
        .await
        .unwrap_err();

    assert_eq!(error, CatalogError::HttpStatus { status: 401 });
}

#[tokio::test]
async fn test_unreachable_catalog_is_network_error() {
    let config = CatalogConfig {
        base_url: "http://127.0.0.1:1/".to_string(),
        api_key: Some(TEST_API_KEY.to_string()),
        ..CatalogConfig::default()
    };

    let error = OmdbProvider::from_config(&config)
        .unwrap()
        .search_titles(&SearchRequest::first_page("adventure", ContentType::Movie))
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogError::NetworkError { .. }));
}
