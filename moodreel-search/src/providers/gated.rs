//! Gated provider for testing request ordering.
//!
//! Every call parks until the test releases it with an outcome, so tests can
//! settle requests in any order they like.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use moodreel_core::SearchRequest;
use tokio::sync::{oneshot, watch};

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::CatalogPage;

type Outcome = Result<CatalogPage, CatalogError>;

#[derive(Debug)]
struct Gate {
    request: SearchRequest,
    responder: Option<oneshot::Sender<Outcome>>,
}

#[derive(Debug)]
struct GateShared {
    gates: Mutex<Vec<Gate>>,
    call_count: watch::Sender<usize>,
}

/// Provider whose responses are released by hand.
#[derive(Debug, Clone)]
pub struct GatedCatalog {
    shared: Arc<GateShared>,
}

impl Default for GatedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GatedCatalog {
    /// Catalog with no calls yet.
    pub fn new() -> Self {
        let (call_count, _) = watch::channel(0);
        Self {
            shared: Arc::new(GateShared {
                gates: Mutex::new(Vec::new()),
                call_count,
            }),
        }
    }

    fn gates(&self) -> MutexGuard<'_, Vec<Gate>> {
        self.shared
            .gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<SearchRequest> {
        self.gates().iter().map(|gate| gate.request.clone()).collect()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        *self.shared.call_count.borrow()
    }

    /// Waits until at least `count` requests have arrived.
    pub async fn wait_for_calls(&self, count: usize) {
        let mut receiver = self.shared.call_count.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = receiver.wait_for(|current| *current >= count).await;
    }

    /// Settles call number `index` (0-based). Returns false if that call does
    /// not exist or was already released.
    pub fn release(&self, index: usize, outcome: Outcome) -> bool {
        let responder = self
            .gates()
            .get_mut(index)
            .and_then(|gate| gate.responder.take());

        match responder {
            Some(responder) => responder.send(outcome).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl CatalogProvider for GatedCatalog {
    async fn search_titles(&self, request: &SearchRequest) -> Result<CatalogPage, CatalogError> {
        let (responder, receiver) = oneshot::channel();
        self.gates().push(Gate {
            request: request.clone(),
            responder: Some(responder),
        });
        self.shared.call_count.send_modify(|count| *count += 1);

        receiver.await.map_err(|_| CatalogError::NetworkError {
            reason: "gate dropped without a response".to_string(),
        })?
    }
}
