//! Search session state machine.
//!
//! `QueryState` is plain data plus transitions. It never performs I/O: the
//! session actor asks it for a [`FetchTicket`], runs the request, and hands
//! the outcome back through [`QueryState::settle`]. Keeping it synchronous
//! makes every transition testable without a runtime.

use moodreel_core::types::{has_next_page, page_count};
use moodreel_core::{ContentType, MoodTable, MovieSummary, SearchRequest};
use serde::Serialize;

use crate::errors::{CatalogError, MissingField, SearchError};
use crate::types::{CatalogPage, ResponseKind};

/// Lifecycle phase of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No request issued yet
    Idle,
    /// A request is in flight
    Loading,
    /// Last request produced results
    Ready,
    /// Last request failed or found nothing
    Failed,
}

/// Identity of one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Sequence number compared at settlement time
    pub generation: u64,
    /// What to ask the catalog for
    pub request: SearchRequest,
}

/// What happened to a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// State now reflects the response
    Applied(Phase),
    /// A newer request superseded this one; state untouched
    StaleDiscarded,
}

/// State of one search session.
#[derive(Debug, Clone)]
pub struct QueryState {
    last_request: Option<SearchRequest>,
    in_flight: Option<FetchTicket>,
    results: Option<Vec<MovieSummary>>,
    total_count: u64,
    error: Option<SearchError>,
    validation_error: Option<SearchError>,
    last_response: Option<ResponseKind>,
    page: u32,
    generation: u64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    /// Fresh session state: idle on page 1.
    pub fn new() -> Self {
        Self {
            last_request: None,
            in_flight: None,
            results: None,
            total_count: 0,
            error: None,
            validation_error: None,
            last_response: None,
            page: 1,
            generation: 0,
        }
    }

    /// Validates a submission and, if it resolves, starts a page-1 fetch.
    ///
    /// On failure the error is recorded as the session's validation error and
    /// results are left as they were. On success the known total is dropped,
    /// so the new query cannot page forward until its first page settles.
    ///
    /// # Errors
    /// - `SearchError::MissingInput` - Mood text or content type absent
    /// - `SearchError::UnmappedMood` - Mood not in the table
    pub fn submit(
        &mut self,
        table: &MoodTable,
        mood: &str,
        content_type: ContentType,
    ) -> Result<FetchTicket, SearchError> {
        let keyword = match Self::validate(table, mood, content_type) {
            Ok(keyword) => keyword,
            Err(error) => {
                self.validation_error = Some(error.clone());
                return Err(error);
            }
        };

        self.validation_error = None;
        self.page = 1;
        self.total_count = 0;
        Ok(self.begin_fetch(SearchRequest::first_page(keyword, content_type)))
    }

    fn validate(
        table: &MoodTable,
        mood: &str,
        content_type: ContentType,
    ) -> Result<&'static str, SearchError> {
        let mood_missing = mood.trim().is_empty();
        let missing = match (mood_missing, content_type.is_selected()) {
            (true, false) => Some(MissingField::MoodAndContentType),
            (true, true) => Some(MissingField::Mood),
            (false, false) => Some(MissingField::ContentType),
            (false, true) => None,
        };
        if let Some(missing) = missing {
            return Err(SearchError::MissingInput { missing });
        }

        Ok(table.resolve(mood)?)
    }

    /// Moves `delta` pages and starts the fetch for the new page.
    ///
    /// Returns `None` without touching state when nothing has been searched
    /// yet, when the clamped target equals the current page, or when moving
    /// forward past the last known page.
    pub fn change_page(&mut self, delta: i64) -> Option<FetchTicket> {
        let request = self.last_request.as_ref()?;

        let target = (i64::from(self.page) + delta).clamp(1, i64::from(u32::MAX));
        let target = u32::try_from(target).ok()?;
        if target == self.page {
            return None;
        }
        if target > self.page && (!self.has_next_page() || u64::from(target) > self.page_count())
        {
            return None;
        }

        let request = request.with_page(target);
        self.validation_error = None;
        self.page = target;
        Some(self.begin_fetch(request))
    }

    /// Marks a request as the one in flight and returns its ticket.
    ///
    /// Any earlier in-flight request stops being current.
    pub fn begin_fetch(&mut self, request: SearchRequest) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.error = None;

        let ticket = FetchTicket {
            generation: self.generation,
            request: request.clone(),
        };
        self.last_request = Some(request);
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Applies a response if it belongs to the current in-flight request.
    pub fn settle(
        &mut self,
        generation: u64,
        outcome: Result<CatalogPage, CatalogError>,
    ) -> SettleOutcome {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|ticket| ticket.generation == generation);
        if !is_current {
            return SettleOutcome::StaleDiscarded;
        }

        self.in_flight = None;
        match outcome {
            Ok(page) => {
                self.results = Some(page.items);
                self.total_count = page.total_count;
                self.error = None;
                self.last_response = Some(ResponseKind::Ok);
            }
            Err(error) => {
                let not_found = !error.is_transport();
                self.results = None;
                self.error = Some(SearchError::from(error));
                if not_found {
                    self.total_count = 0;
                    self.last_response = Some(ResponseKind::NotFound);
                } else {
                    self.last_response = Some(ResponseKind::TransportError);
                }
            }
        }

        SettleOutcome::Applied(self.phase())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            return Phase::Loading;
        }
        match self.last_response {
            None => Phase::Idle,
            Some(ResponseKind::Ok) => Phase::Ready,
            Some(ResponseKind::NotFound | ResponseKind::TransportError) => Phase::Failed,
        }
    }

    /// Page the session is on, starting at 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Titles from the last successful page, if any.
    pub fn results(&self) -> Option<&[MovieSummary]> {
        self.results.as_deref()
    }

    /// Total matches reported for the current query.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Error from the last settled request.
    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    /// Error from the last rejected submission.
    pub fn validation_error(&self) -> Option<&SearchError> {
        self.validation_error.as_ref()
    }

    /// Most recently issued request.
    pub fn last_request(&self) -> Option<&SearchRequest> {
        self.last_request.as_ref()
    }

    /// Ticket of the request still awaiting settlement.
    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    /// How the last applied settlement ended.
    pub fn last_response(&self) -> Option<ResponseKind> {
        self.last_response
    }

    /// Number of pages for the known total.
    pub fn page_count(&self) -> u64 {
        page_count(self.total_count)
    }

    /// Whether paging forward would stay within the known total.
    pub fn has_next_page(&self) -> bool {
        has_next_page(self.total_count, self.page)
    }

    /// Whether a previous page exists.
    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Immutable snapshot for presentation.
    pub fn view(&self) -> QueryView {
        let error = self
            .validation_error
            .as_ref()
            .or(self.error.as_ref())
            .map(SearchError::user_message);

        QueryView {
            keyword: self.last_request.as_ref().map(|r| r.keyword.clone()),
            content_type: self
                .last_request
                .as_ref()
                .map(|r| r.content_type)
                .unwrap_or_default(),
            page: self.page,
            loading: self.is_loading(),
            phase: self.phase(),
            error,
            results: self.results.clone().unwrap_or_default(),
            total_count: self.total_count,
            page_count: self.page_count(),
            has_next: self.has_next_page(),
            has_prev: self.has_prev_page(),
        }
    }
}

/// Read-only snapshot of a session, as bound by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryView {
    /// Keyword of the most recent request
    pub keyword: Option<String>,
    /// Content type of the most recent request
    pub content_type: ContentType,
    /// Current page, starting at 1
    pub page: u32,
    /// True while a request is in flight
    pub loading: bool,
    /// Lifecycle phase
    pub phase: Phase,
    /// Message to show, validation errors first
    pub error: Option<String>,
    /// Titles on the current page
    pub results: Vec<MovieSummary>,
    /// Total matches for the query
    pub total_count: u64,
    /// Pages needed for `total_count`
    pub page_count: u64,
    /// Whether a next page exists
    pub has_next: bool,
    /// Whether a previous page exists
    pub has_prev: bool,
}

impl Default for QueryView {
    fn default() -> Self {
        QueryState::new().view()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn items(count: usize) -> Vec<MovieSummary> {
        (0..count)
            .map(|i| MovieSummary {
                id: format!("tt{i:07}"),
                title: format!("Title {i}"),
                year: "2001".to_string(),
                poster_url: "N/A".to_string(),
                kind: "movie".to_string(),
            })
            .collect()
    }

    fn ok_page(count: usize, total: u64) -> Result<CatalogPage, CatalogError> {
        Ok(CatalogPage {
            items: items(count),
            total_count: total,
        })
    }

    fn searched(total: u64) -> QueryState {
        let mut state = QueryState::new();
        let ticket = state
            .submit(&MoodTable::builtin(), "happy", ContentType::Movie)
            .unwrap();
        state.settle(ticket.generation, ok_page(10, total));
        state
    }

    #[test]
    fn test_new_state_is_idle_on_first_page() {
        let state = QueryState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.page(), 1);
        assert!(!state.is_loading());
        assert!(state.results().is_none());
        assert!(state.error().is_none());
        assert_eq!(QueryView::default().phase, Phase::Idle);
    }

    #[test]
    fn test_happy_movie_scenario() {
        let mut state = QueryState::new();
        let ticket = state
            .submit(&MoodTable::builtin(), "happy", ContentType::Movie)
            .unwrap();
        assert_eq!(ticket.request.keyword, "adventure");
        assert_eq!(ticket.request.page, 1);
        assert_eq!(state.phase(), Phase::Loading);

        let outcome = state.settle(ticket.generation, ok_page(5, 50));
        assert_eq!(outcome, SettleOutcome::Applied(Phase::Ready));

        let view = state.view();
        assert_eq!(view.results.len(), 5);
        assert_eq!(view.total_count, 50);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_count, 5);
        assert!(view.has_next);
        assert!(!view.has_prev);
        assert!(view.error.is_none());
    }

    #[test]
    fn test_unmapped_mood_keeps_results_and_issues_nothing() {
        let mut state = searched(50);
        let before = state.results().map(<[MovieSummary]>::to_vec);
        let generation = state.generation;

        let error = state
            .submit(&MoodTable::builtin(), "xyz", ContentType::Movie)
            .unwrap_err();

        assert_eq!(
            error,
            SearchError::UnmappedMood {
                input: "xyz".to_string()
            }
        );
        assert!(state.in_flight().is_none());
        assert_eq!(state.generation, generation);
        assert_eq!(state.results().map(<[MovieSummary]>::to_vec), before);
        assert_eq!(
            state.view().error.as_deref(),
            Some("Mood not recognized: 'xyz'")
        );
    }

    #[test]
    fn test_missing_inputs_are_reported_together() {
        let mut state = QueryState::new();
        let table = MoodTable::builtin();

        assert_eq!(
            state.submit(&table, "  ", ContentType::Unset),
            Err(SearchError::MissingInput {
                missing: MissingField::MoodAndContentType
            })
        );
        assert_eq!(
            state.submit(&table, "sad", ContentType::Unset),
            Err(SearchError::MissingInput {
                missing: MissingField::ContentType
            })
        );
        assert_eq!(
            state.submit(&table, "", ContentType::Series),
            Err(SearchError::MissingInput {
                missing: MissingField::Mood
            })
        );
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.last_request().is_none());
    }

    #[test]
    fn test_valid_submit_clears_validation_error() {
        let mut state = QueryState::new();
        let table = MoodTable::builtin();
        let _ = state.submit(&table, "xyz", ContentType::Movie);
        assert!(state.validation_error().is_some());

        state.submit(&table, "Sad ", ContentType::Series).unwrap();
        assert!(state.validation_error().is_none());
        assert_eq!(state.last_request().unwrap().keyword, "drama");
    }

    #[test]
    fn test_not_found_clears_results_and_total() {
        let mut state = searched(50);
        let ticket = state
            .submit(&MoodTable::builtin(), "gloomy", ContentType::Movie)
            .unwrap();

        state.settle(
            ticket.generation,
            Err(CatalogError::NotFound {
                reason: Some("Movie not found!".to_string()),
            }),
        );

        let view = state.view();
        assert!(view.results.is_empty());
        assert_eq!(view.total_count, 0);
        assert_eq!(view.error.as_deref(), Some("Movie not found!"));
        assert_eq!(view.phase, Phase::Failed);
        assert_eq!(state.last_response(), Some(ResponseKind::NotFound));
    }

    #[test]
    fn test_transport_failure_uses_generic_message() {
        let mut state = searched(50);
        let ticket = state.change_page(1).unwrap();

        state.settle(
            ticket.generation,
            Err(CatalogError::NetworkError {
                reason: "connection refused".to_string(),
            }),
        );

        assert!(state.results().is_none());
        assert_eq!(
            state.view().error.as_deref(),
            Some(crate::errors::TRANSPORT_FAILURE_MESSAGE)
        );
        assert_eq!(state.last_response(), Some(ResponseKind::TransportError));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_previous_at_first_page_is_noop() {
        let mut state = searched(50);
        let generation = state.generation;

        assert!(state.change_page(-1).is_none());
        assert_eq!(state.page(), 1);
        assert_eq!(state.generation, generation);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_paging_before_any_search_is_noop() {
        let mut state = QueryState::new();
        assert!(state.change_page(1).is_none());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_forward_past_last_page_is_rejected() {
        let mut state = searched(15);
        let ticket = state.change_page(1).unwrap();
        assert_eq!(ticket.request.page, 2);
        state.settle(ticket.generation, ok_page(5, 15));

        assert_eq!(state.page(), 2);
        assert_eq!(state.page_count(), 2);
        assert!(!state.has_next_page());
        assert!(state.change_page(1).is_none());
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_large_jumps_clamp_and_respect_page_count() {
        let mut state = searched(50);
        assert!(state.change_page(10).is_none());

        let ticket = state.change_page(4).unwrap();
        assert_eq!(ticket.request.page, 5);
        state.settle(ticket.generation, ok_page(10, 50));

        let back = state.change_page(-100).unwrap();
        assert_eq!(back.request.page, 1);
    }

    #[test]
    fn test_stale_settlement_is_discarded() {
        let mut state = QueryState::new();
        let table = MoodTable::builtin();
        let first = state.submit(&table, "happy", ContentType::Movie).unwrap();
        let second = state.submit(&table, "gloomy", ContentType::Movie).unwrap();

        assert_eq!(
            state.settle(second.generation, ok_page(3, 3)),
            SettleOutcome::Applied(Phase::Ready)
        );
        assert_eq!(
            state.settle(first.generation, ok_page(10, 99)),
            SettleOutcome::StaleDiscarded
        );

        assert_eq!(state.total_count(), 3);
        assert_eq!(state.last_request().unwrap().keyword, "horror");
    }

    #[test]
    fn test_slow_first_page_cannot_revert_second_page() {
        let mut state = searched(50);
        let ticket = state.change_page(1).unwrap();
        state.settle(ticket.generation, ok_page(10, 50));

        let first_page = state.change_page(-1).unwrap();
        assert_eq!(first_page.request.page, 1);
        let second_page = state.change_page(1).unwrap();
        assert_eq!(second_page.request.page, 2);

        state.settle(second_page.generation, ok_page(10, 50));
        assert_eq!(
            state.settle(first_page.generation, ok_page(10, 50)),
            SettleOutcome::StaleDiscarded
        );
        assert_eq!(state.page(), 2);
        assert_eq!(state.last_request().unwrap().page, 2);
    }

    #[test]
    fn test_new_search_cannot_page_on_previous_total() {
        let mut state = searched(50);
        assert!(state.has_next_page());

        let ticket = state
            .submit(&MoodTable::builtin(), "gloomy", ContentType::Movie)
            .unwrap();
        let view = state.view();
        assert_eq!(view.keyword.as_deref(), Some("horror"));
        assert_eq!(view.total_count, 0);
        assert_eq!(view.page_count, 0);
        assert!(!view.has_next);

        assert!(state.change_page(1).is_none());
        assert!(state.change_page(3).is_none());
        assert_eq!(state.in_flight().unwrap().generation, ticket.generation);

        state.settle(ticket.generation, ok_page(10, 30));
        let next = state.change_page(1).unwrap();
        assert_eq!(next.request.keyword, "horror");
        assert_eq!(next.request.page, 2);
    }

    #[test]
    fn test_settling_twice_is_ignored() {
        let mut state = QueryState::new();
        let ticket = state
            .submit(&MoodTable::builtin(), "tired", ContentType::Movie)
            .unwrap();
        state.settle(ticket.generation, ok_page(2, 2));

        assert_eq!(
            state.settle(
                ticket.generation,
                Err(CatalogError::HttpStatus { status: 500 })
            ),
            SettleOutcome::StaleDiscarded
        );
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Submit(bool),
        Page(i64),
        SettleLatest(u64, bool),
        SettleOld(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Submit),
            (-3i64..=3).prop_map(Op::Page),
            (0u64..120, any::<bool>()).prop_map(|(t, ok)| Op::SettleLatest(t, ok)),
            (0u64..120).prop_map(Op::SettleOld),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_in_every_reachable_state(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let table = MoodTable::builtin();
            let mut state = QueryState::new();
            let mut tickets: Vec<FetchTicket> = Vec::new();

            for op in ops {
                match op {
                    Op::Submit(valid) => {
                        let mood = if valid { "happy" } else { "xyz" };
                        if let Ok(ticket) = state.submit(&table, mood, ContentType::Movie) {
                            tickets.push(ticket);
                        }
                    }
                    Op::Page(delta) => {
                        if let Some(ticket) = state.change_page(delta) {
                            tickets.push(ticket);
                        }
                    }
                    Op::SettleLatest(total, ok) => {
                        if let Some(ticket) = tickets.last() {
                            let outcome = if ok {
                                ok_page(total.min(10) as usize, total)
                            } else {
                                Err(CatalogError::NotFound { reason: None })
                            };
                            state.settle(ticket.generation, outcome);
                        }
                    }
                    Op::SettleOld(total) => {
                        if tickets.len() > 1 {
                            let stale = tickets[0].generation;
                            let before = state.view();
                            prop_assert_eq!(
                                state.settle(stale, ok_page(1, total)),
                                SettleOutcome::StaleDiscarded
                            );
                            prop_assert_eq!(state.view(), before);
                        }
                    }
                }

                prop_assert!(state.page() >= 1);
                prop_assert_eq!(
                    state.has_next_page(),
                    state.total_count() > u64::from(state.page()) * moodreel_core::PAGE_SIZE
                );
                prop_assert!(!(state.results().is_some() && state.error().is_some()));
                prop_assert_eq!(state.is_loading(), state.phase() == Phase::Loading);
            }
        }
    }
}
