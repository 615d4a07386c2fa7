//! Deferred option source
//!
//! Every fetch is parked until the host answers it through a
//! [`DeferredHandle`]. Requests can be answered in any order, which is how
//! hosts bridge the control to their own event loop and how the
//! last-resolved-wins race is reproduced deterministically.

use super::error::{Result, SourceError};
use super::{FetchPage, FetchQuery, OptionSource};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

type Responder = oneshot::Sender<Result<FetchPage>>;

#[derive(Debug, Default)]
struct Parked {
    requests: Vec<(FetchQuery, Responder)>,
    issued: Vec<FetchQuery>,
}

#[derive(Debug, Default)]
struct Shared {
    parked: Mutex<Parked>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Parked> {
        match self.parked.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Source whose fetches wait for an explicit answer
#[derive(Debug, Clone, Default)]
pub struct DeferredSource {
    shared: Arc<Shared>,
}

/// Host side of a [`DeferredSource`]
#[derive(Debug, Clone)]
pub struct DeferredHandle {
    shared: Arc<Shared>,
}

impl DeferredSource {
    /// Create a source and the handle that answers its requests
    #[must_use]
    pub fn new() -> (Self, DeferredHandle) {
        let shared = Arc::new(Shared::default());
        (
            Self {
                shared: Arc::clone(&shared),
            },
            DeferredHandle { shared },
        )
    }
}

#[async_trait]
impl OptionSource for DeferredSource {
    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage> {
        let (tx, rx) = oneshot::channel();
        {
            let mut parked = self.shared.lock();
            parked.issued.push(query.clone());
            parked.requests.push((query, tx));
        }
        rx.await.unwrap_or(Err(SourceError::Abandoned))
    }
}

impl DeferredHandle {
    /// Queries still waiting for an answer, oldest first
    #[must_use]
    pub fn pending(&self) -> Vec<FetchQuery> {
        self.shared
            .lock()
            .requests
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    /// Every query the source has received, in call order
    #[must_use]
    pub fn issued(&self) -> Vec<FetchQuery> {
        self.shared.lock().issued.clone()
    }

    /// Answer the oldest pending request matching `search` and `page`
    ///
    /// Returns `false` if no such request is waiting.
    pub fn resolve(&self, search: &str, page: u32, result: FetchPage) -> bool {
        self.answer(search, page, Ok(result))
    }

    /// Fail the oldest pending request matching `search` and `page`
    ///
    /// Returns `false` if no such request is waiting.
    pub fn reject(&self, search: &str, page: u32, error: SourceError) -> bool {
        self.answer(search, page, Err(error))
    }

    /// Drop every pending request unanswered
    pub fn abandon_all(&self) {
        self.shared.lock().requests.clear();
    }

    fn answer(&self, search: &str, page: u32, result: Result<FetchPage>) -> bool {
        let responder = {
            let mut parked = self.shared.lock();
            let Some(index) = parked
                .requests
                .iter()
                .position(|(q, _)| q.search == search && q.page == page)
            else {
                return false;
            };
            parked.requests.remove(index).1
        };
        // The receiving fetch may already be gone; that is not the host's problem.
        let _ = responder.send(result);
        true
    }
}
