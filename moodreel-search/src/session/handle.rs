//! Handle for communicating with the search session actor.

use moodreel_core::{ContentType, SearchRequest};
use tokio::sync::{mpsc, oneshot, watch};

use super::commands::SessionCommand;
use super::state::QueryView;
use crate::errors::SearchError;

/// Handle for communicating with a search session actor.
///
/// Cheap to clone. All clones drive the same session; the actor stops once
/// every handle is dropped or [`SearchSessionHandle::shutdown`] is called.
#[derive(Debug, Clone)]
pub struct SearchSessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    view: watch::Receiver<QueryView>,
}

impl SearchSessionHandle {
    pub(crate) fn new(sender: mpsc::Sender<SessionCommand>, view: watch::Receiver<QueryView>) -> Self {
        Self { sender, view }
    }

    /// Submits a mood search for page 1.
    ///
    /// Returns the request that was issued. The request runs in the
    /// background; observe its settlement through [`Self::subscribe`] or
    /// [`Self::wait_until_settled`].
    ///
    /// # Errors
    /// - `SearchError::MissingInput` - Mood text or content type absent
    /// - `SearchError::UnmappedMood` - Mood not recognized
    /// - `SearchError::SessionClosed` - Actor is no longer running
    pub async fn submit_search(
        &self,
        mood: &str,
        content_type: ContentType,
    ) -> Result<SearchRequest, SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::SubmitSearch {
            mood: mood.to_string(),
            content_type,
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::SessionClosed)?;

        rx.await.map_err(|_| SearchError::SessionClosed)?
    }

    /// Moves `delta` pages from the current page.
    ///
    /// Returns the issued request, or `None` when the move was rejected
    /// (before page 1, past the last page, or no search yet).
    ///
    /// # Errors
    /// - `SearchError::SessionClosed` - Actor is no longer running
    pub async fn go_to_page(&self, delta: i64) -> Result<Option<SearchRequest>, SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::GoToPage { delta, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::SessionClosed)?;

        rx.await.map_err(|_| SearchError::SessionClosed)
    }

    /// Advances one page.
    ///
    /// # Errors
    /// - `SearchError::SessionClosed` - Actor is no longer running
    pub async fn next_page(&self) -> Result<Option<SearchRequest>, SearchError> {
        self.go_to_page(1).await
    }

    /// Goes back one page.
    ///
    /// # Errors
    /// - `SearchError::SessionClosed` - Actor is no longer running
    pub async fn previous_page(&self) -> Result<Option<SearchRequest>, SearchError> {
        self.go_to_page(-1).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> QueryView {
        self.view.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryView> {
        self.view.clone()
    }

    /// Waits until no request is in flight and returns that snapshot.
    ///
    /// # Errors
    /// - `SearchError::SessionClosed` - Actor stopped while a request was in flight
    pub async fn wait_until_settled(&self) -> Result<QueryView, SearchError> {
        let mut view = self.view.clone();
        let settled = view
            .wait_for(|current| !current.loading)
            .await
            .map_err(|_| SearchError::SessionClosed)?;
        Ok(QueryView::clone(&settled))
    }

    /// Stops the actor. In-flight responses are dropped.
    ///
    /// # Errors
    /// - `SearchError::SessionClosed` - Actor had already stopped
    pub async fn shutdown(&self) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();

        self.sender
            .send(SessionCommand::Shutdown { responder })
            .await
            .map_err(|_| SearchError::SessionClosed)?;

        rx.await.map_err(|_| SearchError::SessionClosed)
    }
}
