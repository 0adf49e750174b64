//! Result panel components - movie cards, pagination, status banners

use moodreel_core::MovieSummary;
use moodreel_search::QueryView;

use super::layout::{button, escape_html};

/// Image shown for titles the catalog has no poster for.
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// DOM id of the swappable results panel.
pub const RESULTS_TARGET: &str = "results";

/// Renders one result card: poster (or placeholder), title and year.
pub fn movie_card(movie: &MovieSummary) -> String {
    let poster = escape_html(movie.poster_or(POSTER_PLACEHOLDER));
    let title = escape_html(&movie.title);
    let year = escape_html(&movie.year);

    format!(
        r#"<div class="bg-gray-800 border border-gray-700 rounded-lg overflow-hidden">
            <img src="{poster}" alt="{title}" class="w-full h-72 object-cover bg-gray-700" loading="lazy" />
            <div class="p-4">
                <h4 class="text-white font-medium truncate" title="{title}">{title}</h4>
                <p class="text-gray-400 text-sm mt-1">{year}</p>
            </div>
        </div>"#
    )
}

/// Renders a grid of result cards, or nothing for an empty list.
pub fn results_grid(results: &[MovieSummary]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let cards: String = results.iter().map(movie_card).collect();
    format!(
        r#"<div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-5 gap-6">{cards}</div>"#
    )
}

/// Renders the error banner.
pub fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="bg-red-900 bg-opacity-40 border border-red-700 text-red-200 rounded-lg px-4 py-3 mb-6" role="alert">{}</div>"#,
        escape_html(message)
    )
}

/// Renders the loading indicator shown while a request is in flight.
pub fn loading_indicator() -> String {
    r#"<div class="flex items-center space-x-3 text-gray-400 mb-6">
            <div class="w-4 h-4 border-2 border-moodreel-500 border-t-transparent rounded-full animate-spin"></div>
            <span>Searching...</span>
        </div>"#
        .to_string()
}

/// Renders prev/next controls with "Page X of Y" and the total count.
///
/// Hidden until a search has produced at least one result page.
pub fn pagination_controls(view: &QueryView) -> String {
    if view.page_count == 0 {
        return String::new();
    }

    let target = format!(r##"hx-target="#{RESULTS_TARGET}" hx-swap="outerHTML""##);
    let prev = button(
        "Previous",
        "secondary",
        !view.has_prev || view.loading,
        Some(&format!(r#"hx-post="/htmx/page/prev" {target}"#)),
    );
    let next = button(
        "Next",
        "secondary",
        !view.has_next || view.loading,
        Some(&format!(r#"hx-post="/htmx/page/next" {target}"#)),
    );

    format!(
        r#"<div class="flex items-center justify-between mt-8">
            {prev}
            <div class="text-gray-400 text-sm text-center">
                <div>Page {page} of {page_count}</div>
                <div class="text-gray-500">{total} results</div>
            </div>
            {next}
        </div>"#,
        page = view.page,
        page_count = view.page_count,
        total = view.total_count,
    )
}

/// Renders the whole results panel for a snapshot.
///
/// While loading, the panel re-requests itself every `poll_ms`
/// milliseconds and replaces itself once the request has settled.
pub fn results_panel(view: &QueryView, poll_ms: u128) -> String {
    let poll_attrs = if view.loading {
        format!(
            r#"hx-get="/htmx/results" hx-trigger="every {poll_ms}ms" hx-swap="outerHTML""#
        )
    } else {
        String::new()
    };

    let status_html = if view.loading {
        loading_indicator()
    } else {
        String::new()
    };
    let error_html = view.error.as_deref().map(error_banner).unwrap_or_default();
    let empty_html = if view.keyword.is_none() && view.error.is_none() {
        r#"<p class="text-gray-500 text-center py-12">Tell us how you feel and pick movie or series.</p>"#
            .to_string()
    } else {
        String::new()
    };

    format!(
        r#"<section id="{RESULTS_TARGET}" {poll_attrs}>
            {status_html}
            {error_html}
            {empty_html}
            {grid}
            {pagination}
        </section>"#,
        grid = results_grid(&view.results),
        pagination = pagination_controls(view),
    )
}

#[cfg(test)]
mod tests {
    use moodreel_core::ContentType;
    use moodreel_search::Phase;

    use super::*;

    fn movie(poster: &str) -> MovieSummary {
        MovieSummary {
            id: "tt0001".to_string(),
            title: "Up & Away".to_string(),
            year: "2009".to_string(),
            poster_url: poster.to_string(),
            kind: "movie".to_string(),
        }
    }

    fn ready_view(page: u32, total: u64) -> QueryView {
        let page_count = total.div_ceil(10);
        QueryView {
            keyword: Some("adventure".to_string()),
            content_type: ContentType::Movie,
            page,
            loading: false,
            phase: Phase::Ready,
            error: None,
            results: vec![movie("N/A")],
            total_count: total,
            page_count,
            has_next: total > u64::from(page) * 10,
            has_prev: page > 1,
        }
    }

    #[test]
    fn test_missing_poster_uses_placeholder() {
        let html = movie_card(&movie("N/A"));
        assert!(html.contains(POSTER_PLACEHOLDER));
        assert!(html.contains("Up &amp; Away"));
        assert!(html.contains("2009"));

        let html = movie_card(&movie("https://img.example/poster.jpg"));
        assert!(html.contains("https://img.example/poster.jpg"));
        assert!(!html.contains(POSTER_PLACEHOLDER));
    }

    #[test]
    fn test_pagination_shows_page_of_count() {
        let html = pagination_controls(&ready_view(2, 15));
        assert!(html.contains("Page 2 of 2"));
        assert!(html.contains("15 results"));
    }

    #[test]
    fn test_pagination_hidden_without_results() {
        assert!(pagination_controls(&QueryView::default()).is_empty());
    }

    #[test]
    fn test_loading_panel_polls() {
        let mut view = ready_view(1, 50);
        view.loading = true;
        view.phase = Phase::Loading;

        let html = results_panel(&view, 500);
        assert!(html.contains(r#"hx-trigger="every 500ms""#));
        assert!(html.contains("Searching..."));

        let html = results_panel(&ready_view(1, 50), 500);
        assert!(!html.contains("hx-trigger"));
    }

    #[test]
    fn test_error_is_escaped() {
        let mut view = ready_view(1, 50);
        view.error = Some("Mood not recognized: '<b>'".to_string());
        let html = results_panel(&view, 500);
        assert!(html.contains("Mood not recognized: &#39;&lt;b&gt;&#39;"));
    }
}
