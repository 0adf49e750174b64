//! OMDb catalog provider for production use.

use async_trait::async_trait;
use moodreel_core::config::CatalogConfig;
use moodreel_core::{MovieSummary, SearchRequest};
use serde::Deserialize;

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::CatalogPage;

/// OMDb search provider.
///
/// Issues `GET {base_url}?s=..&type=..&page=..&apikey=..` and maps the
/// `Response`/`Error` convention of the API onto [`CatalogError`].
pub struct OmdbProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for OmdbProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Response from the OMDb search endpoint.
#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    /// "True" or "False"
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    /// Total match count, string-encoded
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Single search hit from OMDb.
#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    media_type: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

impl OmdbSearchResponse {
    fn into_catalog_page(self) -> Result<CatalogPage, CatalogError> {
        if !self.response.eq_ignore_ascii_case("true") || self.search.is_empty() {
            return Err(CatalogError::NotFound { reason: self.error });
        }

        let total_count = self
            .total_results
            .and_then(|total| total.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let items = self
            .search
            .into_iter()
            .map(|item| MovieSummary {
                id: item.imdb_id,
                title: item.title,
                year: item.year,
                poster_url: if item.poster.is_empty() {
                    "N/A".to_string()
                } else {
                    item.poster
                },
                kind: item.media_type,
            })
            .collect();

        Ok(CatalogPage { items, total_count })
    }
}

/// Decodes an OMDb search response body.
///
/// # Errors
/// - `CatalogError::ParseError` - Body is not a search response
/// - `CatalogError::NotFound` - Catalog reported no matches
pub fn decode_search_response(body: &str) -> Result<CatalogPage, CatalogError> {
    let response: OmdbSearchResponse =
        serde_json::from_str(body).map_err(|e| CatalogError::ParseError {
            reason: format!("JSON parsing failed: {e}"),
        })?;
    response.into_catalog_page()
}

impl OmdbProvider {
    /// Create a provider from catalog configuration.
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - HTTP client could not be constructed
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::NetworkError {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CatalogProvider for OmdbProvider {
    async fn search_titles(&self, request: &SearchRequest) -> Result<CatalogPage, CatalogError> {
        let page = request.page.to_string();
        let mut query = vec![
            ("s", request.keyword.as_str()),
            ("type", request.content_type.as_query_value()),
            ("page", page.as_str()),
        ];
        if let Some(ref api_key) = self.api_key {
            query.push(("apikey", api_key.as_str()));
        }

        tracing::debug!(
            keyword = %request.keyword,
            content_type = %request.content_type,
            page = request.page,
            "Querying OMDb"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::NetworkError {
                reason: format!("Reading response body failed: {e}"),
            })?;

        decode_search_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_keeps_full_page() {
        let body = r#"{
            "Search": [
                {"Title":"Up","Year":"2009","imdbID":"tt1049413","Type":"movie","Poster":"https://img/up.jpg"},
                {"Title":"Hugo","Year":"2011","imdbID":"tt0970179","Type":"movie","Poster":"N/A"}
            ],
            "totalResults":"50",
            "Response":"True"
        }"#;

        let page = decode_search_response(body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 50);
        assert_eq!(page.items[0].id, "tt1049413");
        assert_eq!(page.items[0].kind, "movie");
        assert!(!page.items[1].has_poster());
    }

    #[test]
    fn test_decode_not_found_uses_catalog_reason() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;

        assert_eq!(
            decode_search_response(body),
            Err(CatalogError::NotFound {
                reason: Some("Movie not found!".to_string())
            })
        );
    }

    #[test]
    fn test_decode_true_without_results_is_not_found() {
        let body = r#"{"Response":"True","Search":[],"totalResults":"0"}"#;
        assert_eq!(
            decode_search_response(body),
            Err(CatalogError::NotFound { reason: None })
        );
    }

    #[test]
    fn test_decode_bad_total_defaults_to_zero() {
        let body = r#"{"Response":"True","Search":[{"Title":"X"}],"totalResults":"lots"}"#;
        let page = decode_search_response(body).unwrap();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.items[0].poster_url, "N/A");
    }

    #[test]
    fn test_decode_garbage_is_parse_error() {
        assert!(matches!(
            decode_search_response("<html>rate limited</html>"),
            Err(CatalogError::ParseError { .. })
        ));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = CatalogConfig {
            api_key: Some("f00dcafe".to_string()),
            ..CatalogConfig::default()
        };
        let provider = OmdbProvider::from_config(&config).unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("f00dcafe"));
    }
}
