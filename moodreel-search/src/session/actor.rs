//! Actor implementation for the search session.

use std::sync::Arc;

use moodreel_core::MoodTable;
use tokio::sync::{mpsc, watch};

use super::commands::SessionCommand;
use super::handle::SearchSessionHandle;
use super::state::{FetchTicket, QueryState, QueryView, SettleOutcome};
use crate::providers::CatalogProvider;

/// Spawns a search session actor over the built-in mood table.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use std::sync::Arc;
///
/// use moodreel_core::ContentType;
/// use moodreel_search::providers::StaticCatalog;
/// use moodreel_search::session::spawn_search_session;
///
/// let session = spawn_search_session(Arc::new(StaticCatalog::new()));
/// session.submit_search("happy", ContentType::Movie).await.unwrap();
/// let view = session.wait_until_settled().await.unwrap();
/// assert_eq!(view.keyword.as_deref(), Some("adventure"));
/// # }
/// ```
pub fn spawn_search_session(provider: Arc<dyn CatalogProvider>) -> SearchSessionHandle {
    spawn_search_session_with_table(provider, MoodTable::builtin())
}

/// Spawns a search session actor with an explicit mood table.
///
/// The actor owns the session's [`QueryState`] and processes commands one
/// at a time. Fetches run as separate tasks and report back on an internal
/// channel, so the actor keeps accepting commands while a request is out.
pub fn spawn_search_session_with_table(
    provider: Arc<dyn CatalogProvider>,
    table: MoodTable,
) -> SearchSessionHandle {
    let (sender, receiver) = mpsc::channel(32);
    let (settle_sender, settle_receiver) = mpsc::unbounded_channel();
    let state = QueryState::new();
    let (view_sender, view_receiver) = watch::channel(state.view());

    let session = SearchSession {
        state,
        table,
        provider,
        view_sender,
        settle_sender,
    };

    tokio::spawn(async move {
        run_actor_loop(session, receiver, settle_receiver).await;
    });

    SearchSessionHandle::new(sender, view_receiver)
}

struct SearchSession {
    state: QueryState,
    table: MoodTable,
    provider: Arc<dyn CatalogProvider>,
    view_sender: watch::Sender<QueryView>,
    settle_sender: mpsc::UnboundedSender<SessionCommand>,
}

async fn run_actor_loop(
    mut session: SearchSession,
    mut receiver: mpsc::Receiver<SessionCommand>,
    mut settle_receiver: mpsc::UnboundedReceiver<SessionCommand>,
) {
    tracing::debug!("Search session actor started");

    loop {
        tokio::select! {
            command = receiver.recv() => {
                let Some(command) = command else { break };
                if !session.handle_command(command) {
                    break;
                }
            }
            Some(settlement) = settle_receiver.recv() => {
                session.handle_command(settlement);
            }
        }
    }

    tracing::debug!("Search session actor stopped");
}

impl SearchSession {
    /// Handles one command. Returns false to stop the actor.
    fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::SubmitSearch {
                mood,
                content_type,
                responder,
            } => {
                let result = self.state.submit(&self.table, &mood, content_type);
                let reply = match result {
                    Ok(ticket) => {
                        let request = ticket.request.clone();
                        self.dispatch(ticket);
                        Ok(request)
                    }
                    Err(error) => {
                        tracing::debug!(%mood, %error, "Search submission rejected");
                        Err(error)
                    }
                };
                self.publish();
                let _ = responder.send(reply);
            }

            SessionCommand::GoToPage { delta, responder } => {
                let reply = self.state.change_page(delta).map(|ticket| {
                    let request = ticket.request.clone();
                    self.dispatch(ticket);
                    request
                });
                if reply.is_some() {
                    self.publish();
                } else {
                    tracing::debug!(delta, page = self.state.page(), "Page change rejected");
                }
                let _ = responder.send(reply);
            }

            SessionCommand::FetchSettled {
                generation,
                outcome,
            } => {
                if let Err(ref error) = outcome {
                    if error.is_transport() {
                        tracing::warn!(generation, %error, "Catalog request failed");
                    }
                }
                match self.state.settle(generation, outcome) {
                    SettleOutcome::Applied(phase) => {
                        tracing::debug!(generation, ?phase, "Search settled");
                        self.publish();
                    }
                    SettleOutcome::StaleDiscarded => {
                        tracing::debug!(generation, "Discarded stale search response");
                    }
                }
            }

            SessionCommand::Shutdown { responder } => {
                let _ = responder.send(());
                return false;
            }
        }
        true
    }

    /// Runs the request on its own task and routes the outcome back.
    fn dispatch(&self, ticket: FetchTicket) {
        let provider = Arc::clone(&self.provider);
        let settle_sender = self.settle_sender.clone();

        tracing::debug!(
            generation = ticket.generation,
            keyword = %ticket.request.keyword,
            page = ticket.request.page,
            "Issuing catalog search"
        );

        tokio::spawn(async move {
            let outcome = provider.search_titles(&ticket.request).await;
            // The actor may already be gone; nothing left to update then.
            let _ = settle_sender.send(SessionCommand::FetchSettled {
                generation: ticket.generation,
                outcome,
            });
        });
    }

    fn publish(&self) {
        self.view_sender.send_replace(self.state.view());
    }
}
