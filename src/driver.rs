//! Fetch coordinator
//!
//! [`SelectDriver`] pairs a [`SelectControl`] with an [`OptionSource`]. Every
//! ticket the control hands out becomes a fetch future; futures run
//! concurrently and their results are applied in the order they resolve,
//! not the order they were issued. Nothing is cancelled: closing the list or
//! typing again leaves earlier fetches running, and their results still land.
//!
//! The driver is single-threaded. Hosts either await [`SelectDriver::next_event`]
//! from their async loop or call [`SelectDriver::poll_ready`] once per frame.
//!
//! ```no_run
//! use remote_select::{SelectConfig, SelectDriver, SelectionValue};
//! use remote_select::source::InMemorySource;
//!
//! # async fn demo() -> Result<(), remote_select::SelectError> {
//! let source = InMemorySource::new(vec![]);
//! let mut select = SelectDriver::new(
//!     source,
//!     &SelectConfig::default(),
//!     SelectionValue::Empty,
//!     |value| println!("changed: {value:?}"),
//! );
//!
//! select.open();
//! select.settle().await?;
//! println!("{} options", select.control().options().len());
//! # Ok(())
//! # }
//! ```

use crate::SelectError;
use crate::config::SelectConfig;
use crate::control::{FetchTicket, RequestId, ResolveOutcome, SelectControl, SyncOutcome};
use crate::model::{SelectOption, SelectionValue};
use crate::source::{self, FetchPage, OptionSource};
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error};

type InFlight = BoxFuture<'static, (FetchTicket, source::Result<FetchPage>)>;

/// Something the driver did on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// A fetch result was handed to the control
    Resolved {
        /// Request the result belongs to
        request: RequestId,
        /// What the control did with it
        outcome: ResolveOutcome,
    },
    /// The list closed because the blur delay ran out
    BlurClosed,
}

/// Runs a select control against an option source
pub struct SelectDriver<S> {
    control: SelectControl,
    source: Arc<S>,
    in_flight: FuturesUnordered<InFlight>,
    blur_delay: Duration,
    blur_deadline: Option<Instant>,
    carried: VecDeque<DriverEvent>,
}

impl<S: OptionSource + 'static> SelectDriver<S> {
    /// Create a driver with a closed control
    #[must_use]
    pub fn new(
        source: S,
        config: &SelectConfig,
        initial: SelectionValue,
        on_change: impl FnMut(SelectionValue) + 'static,
    ) -> Self {
        Self::with_shared_source(Arc::new(source), config, initial, on_change)
    }

    /// Create a driver over a source shared with other controls
    #[must_use]
    pub fn with_shared_source(
        source: Arc<S>,
        config: &SelectConfig,
        initial: SelectionValue,
        on_change: impl FnMut(SelectionValue) + 'static,
    ) -> Self {
        Self {
            control: SelectControl::new(config, initial, on_change),
            source,
            in_flight: FuturesUnordered::new(),
            blur_delay: config.blur_close_delay(),
            blur_deadline: None,
            carried: VecDeque::new(),
        }
    }

    /// The control being driven
    #[must_use]
    pub const fn control(&self) -> &SelectControl {
        &self.control
    }

    /// Number of fetches that have not resolved yet
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether no fetch is running, no blur close is scheduled and no event
    /// is waiting to be reported
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.blur_deadline.is_none() && self.carried.is_empty()
    }

    /// Open the list; returns whether a fetch was started
    ///
    /// Cancels a pending blur close.
    pub fn open(&mut self) -> bool {
        self.blur_deadline = None;
        let ticket = self.control.open();
        self.dispatch(ticket)
    }

    /// Close the list immediately
    pub fn close(&mut self) -> bool {
        self.blur_deadline = None;
        self.control.close()
    }

    /// Open when closed, close when open
    pub fn toggle(&mut self) -> bool {
        self.blur_deadline = None;
        let ticket = self.control.toggle();
        self.dispatch(ticket)
    }

    /// The input gained focus: cancel a pending blur close and open
    pub fn focus(&mut self) -> bool {
        self.open()
    }

    /// The input lost focus: close after the configured delay
    ///
    /// The delay lets a pointer-down pick inside the list land first.
    pub fn blur(&mut self) {
        if self.control.is_open() {
            self.blur_deadline = Some(Instant::now() + self.blur_delay);
            debug!(delay_ms = self.blur_delay.as_millis(), "close scheduled after blur");
        }
    }

    /// Replace the search text; returns whether a fetch was started
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let ticket = self.control.set_search(search);
        self.dispatch(ticket)
    }

    /// Request the next page; returns whether a fetch was started
    pub fn load_more(&mut self) -> bool {
        let ticket = self.control.load_more();
        self.dispatch(ticket)
    }

    /// Pick an option (see [`SelectControl::select`])
    ///
    /// A pick that closes the list also cancels a pending blur close.
    pub fn select(&mut self, option: SelectOption) -> bool {
        let picked = self.control.select(option);
        if !self.control.is_open() {
            self.blur_deadline = None;
        }
        picked
    }

    /// Clear the selection (see [`SelectControl::clear`])
    pub fn clear(&mut self) -> bool {
        self.control.clear()
    }

    /// Take the owner's value (see [`SelectControl::sync_value`])
    pub fn sync_value(&mut self, value: SelectionValue) -> SyncOutcome {
        self.control.sync_value(value)
    }

    /// Apply every result that is already available, without waiting
    ///
    /// Also closes the list if a blur delay has run out.
    ///
    /// # Errors
    ///
    /// Returns `SelectError::Fetch` for the first failed fetch found. The
    /// control's loading flags are left as they were. Events applied before
    /// the failure are reported by the next call; later results stay queued.
    pub fn poll_ready(&mut self) -> Result<Vec<DriverEvent>, SelectError> {
        let mut events: Vec<DriverEvent> = self.carried.drain(..).collect();

        while let Some(Some((ticket, result))) = self.in_flight.next().now_or_never() {
            match self.apply(ticket, result) {
                Ok(event) => events.push(event),
                Err(err) => {
                    self.carried.extend(events);
                    return Err(err);
                }
            }
        }
        if let Some(event) = self.expire_blur() {
            events.push(event);
        }

        Ok(events)
    }

    /// Wait for the next fetch result or blur close
    ///
    /// Returns `None` when nothing is in flight and no close is scheduled.
    pub async fn next_event(&mut self) -> Option<Result<DriverEvent, SelectError>> {
        if let Some(event) = self.carried.pop_front() {
            return Some(Ok(event));
        }
        if let Some(event) = self.expire_blur() {
            return Some(Ok(event));
        }

        match self.blur_deadline {
            None => {
                let (ticket, result) = self.in_flight.next().await?;
                Some(self.apply(ticket, result))
            }
            Some(deadline) if self.in_flight.is_empty() => {
                tokio::time::sleep_until(deadline).await;
                self.expire_blur().map(Ok)
            }
            Some(deadline) => {
                tokio::select! {
                    Some((ticket, result)) = self.in_flight.next() => Some(self.apply(ticket, result)),
                    () = tokio::time::sleep_until(deadline) => self.expire_blur().map(Ok),
                }
            }
        }
    }

    /// Run until nothing is in flight and no close is scheduled
    ///
    /// # Errors
    ///
    /// Returns the first `SelectError::Fetch` encountered; fetches still in
    /// flight at that point keep running.
    pub async fn settle(&mut self) -> Result<(), SelectError> {
        while let Some(event) = self.next_event().await {
            event?;
        }
        Ok(())
    }

    fn dispatch(&mut self, ticket: Option<FetchTicket>) -> bool {
        let Some(ticket) = ticket else {
            return false;
        };

        let source = Arc::clone(&self.source);
        self.in_flight.push(
            async move {
                let result = source.fetch(ticket.query.clone()).await;
                (ticket, result)
            }
            .boxed(),
        );
        true
    }

    fn apply(
        &mut self,
        ticket: FetchTicket,
        result: source::Result<FetchPage>,
    ) -> Result<DriverEvent, SelectError> {
        match result {
            Ok(page) => {
                let outcome = self.control.resolve(&ticket, page);
                Ok(DriverEvent::Resolved {
                    request: ticket.id,
                    outcome,
                })
            }
            Err(source) => {
                error!(
                    request = %ticket.id,
                    search = %ticket.query.search,
                    page = ticket.query.page,
                    error = %source,
                    "fetch failed"
                );
                Err(SelectError::Fetch {
                    request: ticket.id,
                    source,
                })
            }
        }
    }

    fn expire_blur(&mut self) -> Option<DriverEvent> {
        let deadline = self.blur_deadline?;
        if Instant::now() < deadline {
            return None;
        }

        self.blur_deadline = None;
        self.control.close();
        Some(DriverEvent::BlurClosed)
    }
}

impl<S> std::fmt::Debug for SelectDriver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectDriver")
            .field("control", &self.control)
            .field("in_flight", &self.in_flight.len())
            .field("blur_deadline", &self.blur_deadline)
            .field("carried", &self.carried.len())
            .finish_non_exhaustive()
    }
}
