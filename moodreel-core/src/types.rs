//! Domain types shared between the catalog client and the UI.

use serde::{Deserialize, Serialize};

/// Number of items the catalog returns per page.
pub const PAGE_SIZE: u64 = 10;

/// Content-type filter for catalog searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
    /// No filter selected yet.
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl ContentType {
    /// Value sent as the catalog `type` parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
            ContentType::Unset => "",
        }
    }

    /// Whether a concrete filter has been chosen.
    pub fn is_selected(self) -> bool {
        !matches!(self, ContentType::Unset)
    }

    /// Human label for display.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::Series => "Series",
            ContentType::Unset => "Select type",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(ContentType::Movie),
            "series" | "tv" => Ok(ContentType::Series),
            "" => Ok(ContentType::Unset),
            _ => Err(format!(
                "Invalid content type: '{s}'. Valid options are: movie, series"
            )),
        }
    }
}

/// A fully resolved catalog query for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Genre keyword the mood resolved to
    pub keyword: String,
    pub content_type: ContentType,
    /// 1-based page number
    pub page: u32,
}

impl SearchRequest {
    /// Creates a request for the first page.
    pub fn first_page(keyword: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            keyword: keyword.into(),
            content_type,
            page: 1,
        }
    }

    /// Same query, different page. Pages below 1 are clamped to 1.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            keyword: self.keyword.clone(),
            content_type: self.content_type,
            page: page.max(1),
        }
    }
}

/// One catalog entry as shown in a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// External catalog identifier (IMDb ID)
    pub id: String,
    pub title: String,
    /// Release year, or a range such as "2019–2021" for series
    pub year: String,
    /// Poster URL or the literal "N/A"
    pub poster_url: String,
    /// Catalog type such as "movie" or "series"
    pub kind: String,
}

impl MovieSummary {
    /// Whether the catalog supplied a poster image.
    pub fn has_poster(&self) -> bool {
        !self.poster_url.is_empty() && self.poster_url != "N/A"
    }

    /// Poster URL, or `fallback` when the catalog has none.
    pub fn poster_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.has_poster() {
            &self.poster_url
        } else {
            fallback
        }
    }
}

/// Number of pages needed to show `total_count` items.
pub fn page_count(total_count: u64) -> u64 {
    total_count.div_ceil(PAGE_SIZE)
}

/// Whether another page exists after `page`.
pub fn has_next_page(total_count: u64, page: u32) -> bool {
    total_count > u64::from(page) * PAGE_SIZE
}
