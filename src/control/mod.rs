//! Select control state machine
//!
//! [`SelectControl`] holds everything one select instance knows: search
//! text, page counter, accumulated options, loading flags, visibility and
//! the selection. It never performs I/O. Transitions that need data return
//! a [`FetchTicket`]; whoever runs the fetch hands the result back through
//! [`SelectControl::resolve`]. `SelectDriver` does that with a real source.
//!
//! # Phases
//!
//! ```text
//!            open / toggle                    reset page resolved
//! Closed ─────────────────▶ LoadingFirstPage ───────────────────▶ Ready
//!   ▲                            ▲   set_search                    │  ▲
//!   │ close / single pick        └──────────────────────────────────┘  │
//!   └──────────────────────────── (any open phase)         load_more  │ page resolved
//!                                                           ▼          │
//!                                                         LoadingMore ─┘
//! ```
//!
//! Requests are never cancelled. Under the default
//! [`StalePolicy::LastResolvedWins`] every result is applied when it
//! arrives, so a slow response for an old search overwrites a fast one for
//! the new search. [`StalePolicy::DiscardStale`] applies only the most
//! recently issued request.

mod accumulator;
mod request;
mod selection;

pub use accumulator::OptionPage;
pub use request::{FetchKind, FetchTicket, RequestId, ResolveOutcome, StalePolicy};
pub use selection::{ControlledSelection, SyncOutcome, pick};

use crate::config::SelectConfig;
use crate::model::{SelectOption, SelectionMode, SelectionValue};
use crate::source::{FetchPage, FetchQuery};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};

/// Owner notification, called once per select, toggle or clear
pub type ChangeHandler = Box<dyn FnMut(SelectionValue)>;

/// Visible phase of the control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Option list hidden
    Closed,
    /// Waiting for the first page of the current search
    LoadingFirstPage,
    /// Options shown, nothing loading
    Ready,
    /// Options shown, a following page is loading
    LoadingMore,
}

/// Serializable view of the whole control state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlState {
    pub search: String,
    pub page: u32,
    pub options: Vec<SelectOption>,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub open: bool,
    pub selected: SelectionValue,
}

/// State machine of one select instance
pub struct SelectControl {
    mode: SelectionMode,
    disabled: bool,
    stale_policy: StalePolicy,
    search: String,
    page: u32,
    results: OptionPage,
    loading: bool,
    loading_more: bool,
    open: bool,
    selection: ControlledSelection,
    next_request: u64,
    latest_request: Option<RequestId>,
    on_change: ChangeHandler,
}

impl SelectControl {
    /// Create a closed control holding the owner's initial value
    #[must_use]
    pub fn new(
        config: &SelectConfig,
        initial: SelectionValue,
        on_change: impl FnMut(SelectionValue) + 'static,
    ) -> Self {
        Self {
            mode: config.mode(),
            disabled: config.disabled,
            stale_policy: config.stale_responses,
            search: String::new(),
            page: 1,
            results: OptionPage::new(),
            loading: false,
            loading_more: false,
            open: false,
            selection: ControlledSelection::new(initial),
            next_request: 0,
            latest_request: None,
            on_change: Box::new(on_change),
        }
    }

    // ---- visibility ----

    /// Show the option list and fetch the first page of the current search
    ///
    /// Returns `None` if already open or disabled.
    pub fn open(&mut self) -> Option<FetchTicket> {
        if self.disabled {
            debug!("open ignored: control is disabled");
            return None;
        }
        if self.open {
            return None;
        }

        self.open = true;
        Some(self.reset_and_fetch())
    }

    /// Hide the option list
    ///
    /// In-flight fetches keep running and still land when they resolve.
    /// Returns whether the control was open.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        debug!(search = %self.search, "closed");
        true
    }

    /// Open when closed, close when open
    pub fn toggle(&mut self) -> Option<FetchTicket> {
        if self.open {
            self.close();
            None
        } else {
            self.open()
        }
    }

    // ---- search and pagination ----

    /// Replace the search text
    ///
    /// A different text resets the page and clears the options; while open
    /// it also fetches the first page of the new search.
    pub fn set_search(&mut self, search: impl Into<String>) -> Option<FetchTicket> {
        let search = search.into();
        if search == self.search {
            return None;
        }

        self.search = search;
        if self.open {
            Some(self.reset_and_fetch())
        } else {
            self.page = 1;
            self.results.reset();
            None
        }
    }

    /// Fetch the page after the current one
    ///
    /// Requires an open list and a source that announced more data. A
    /// second call before the first resolves is not refused; both requests
    /// run and both results are appended.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.open || !self.results.has_more() {
            trace!(open = self.open, has_more = self.results.has_more(), "load more unavailable");
            return None;
        }

        self.loading_more = true;
        Some(self.issue(FetchKind::More, self.page + 1))
    }

    /// Whether a load-more affordance should be offered
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.open && self.results.has_more() && !self.loading && !self.loading_more
    }

    /// Apply the result of a fetch issued by this control
    pub fn resolve(&mut self, ticket: &FetchTicket, page: FetchPage) -> ResolveOutcome {
        if self.stale_policy == StalePolicy::DiscardStale
            && self.latest_request != Some(ticket.id)
        {
            debug!(request = %ticket.id, latest = ?self.latest_request, "discarding stale response");
            return ResolveOutcome::DiscardedStale;
        }

        let received = page.data.len();
        let outcome = match ticket.kind {
            FetchKind::Reset => {
                self.results.replace(page);
                self.loading = false;
                ResolveOutcome::Replaced
            }
            FetchKind::More => {
                let repeated = self.results.append(page);
                if !repeated.is_empty() {
                    warn!(request = %ticket.id, ?repeated, "page repeats ids already listed");
                }
                self.page += 1;
                self.loading_more = false;
                ResolveOutcome::Appended
            }
        };

        debug!(
            request = %ticket.id,
            search = %ticket.query.search,
            page = ticket.query.page,
            received,
            total = self.results.len(),
            has_more = self.results.has_more(),
            ?outcome,
            "fetch applied"
        );
        outcome
    }

    // ---- selection ----

    /// Pick an option
    ///
    /// Single mode selects it, notifies the owner and closes, even when it
    /// was already selected. Multi mode toggles it by id, notifies the
    /// owner with the whole list and stays open. Returns `false` when the
    /// control is disabled.
    pub fn select(&mut self, option: SelectOption) -> bool {
        if self.disabled {
            debug!("select ignored: control is disabled");
            return false;
        }

        let next = pick(self.mode, self.selection.current(), option);
        self.selection.set_local(next.clone());
        (self.on_change)(next);

        if self.mode == SelectionMode::Single {
            self.close();
        }
        true
    }

    /// Clear the selection and notify the owner with `Empty`
    ///
    /// Does not touch visibility and does not fetch. Returns `false` when
    /// the control is disabled.
    pub fn clear(&mut self) -> bool {
        if self.disabled {
            debug!("clear ignored: control is disabled");
            return false;
        }

        self.selection.set_local(SelectionValue::Empty);
        (self.on_change)(SelectionValue::Empty);
        true
    }

    /// Take the owner's value, overriding any local pick
    pub fn sync_value(&mut self, value: SelectionValue) -> SyncOutcome {
        let outcome = self.selection.sync(value);
        if outcome == SyncOutcome::Reverted {
            debug!("owner value differs from local pick; local pick reverted");
        }
        outcome
    }

    // ---- accessors ----

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if !self.open {
            Phase::Closed
        } else if self.loading {
            Phase::LoadingFirstPage
        } else if self.loading_more {
            Phase::LoadingMore
        } else {
            Phase::Ready
        }
    }

    /// Selection mode fixed at construction
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether interaction is disabled
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current search text
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Last page merged into the options (1-based)
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Accumulated options
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        self.results.options()
    }

    /// Whether the source announced another page
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.results.has_more()
    }

    /// Whether the first page is loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a following page is loading
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Whether the option list is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Selection in effect (local pick if any, otherwise the owner's value)
    #[must_use]
    pub fn selected(&self) -> &SelectionValue {
        self.selection.current()
    }

    /// Whether a local pick is waiting for the owner to re-supply it
    #[must_use]
    pub const fn has_pending_change(&self) -> bool {
        self.selection.has_pending()
    }

    /// Whether an option with the same id is selected
    #[must_use]
    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.selection.current().contains(&option.id)
    }

    /// Text describing the selection for the trigger, if anything is selected
    ///
    /// Single mode yields the label; multi mode joins the labels.
    #[must_use]
    pub fn selection_text(&self) -> Option<String> {
        let selected = self.selection.current();
        if selected.is_empty() {
            return None;
        }
        Some(selected.labels().join(", "))
    }

    /// Id of the most recently issued fetch
    #[must_use]
    pub const fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    /// Copy of the whole state
    #[must_use]
    pub fn snapshot(&self) -> ControlState {
        ControlState {
            search: self.search.clone(),
            page: self.page,
            options: self.results.options().to_vec(),
            has_more: self.results.has_more(),
            loading: self.loading,
            loading_more: self.loading_more,
            open: self.open,
            selected: self.selection.current().clone(),
        }
    }

    fn reset_and_fetch(&mut self) -> FetchTicket {
        self.page = 1;
        self.results.reset();
        self.loading = true;
        if self.stale_policy == StalePolicy::DiscardStale {
            // A pending "more" page is superseded and will be discarded
            self.loading_more = false;
        }
        self.issue(FetchKind::Reset, 1)
    }

    fn issue(&mut self, kind: FetchKind, page: u32) -> FetchTicket {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.latest_request = Some(id);

        let ticket = FetchTicket {
            id,
            kind,
            query: FetchQuery::page(self.search.clone(), page),
        };
        debug!(request = %id, ?kind, search = %ticket.query.search, page, "fetch issued");
        ticket
    }
}

impl fmt::Debug for SelectControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectControl")
            .field("mode", &self.mode)
            .field("phase", &self.phase())
            .field("search", &self.search)
            .field("page", &self.page)
            .field("options", &self.results.len())
            .field("has_more", &self.results.has_more())
            .field("selected", self.selection.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod control_tests;
