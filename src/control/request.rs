//! Fetch requests issued by the control

use crate::source::FetchQuery;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing id attached to every issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(pub(crate) u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a fetch result does to the accumulated options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchKind {
    /// First page after open or search change: replaces options
    Reset,
    /// Following page: appended to options
    More,
}

/// A fetch the control wants performed
///
/// The control never awaits anything itself. It hands tickets out and
/// takes results back through `SelectControl::resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Request id
    pub id: RequestId,
    /// Reset or load-more
    pub kind: FetchKind,
    /// Arguments for the source
    pub query: FetchQuery,
}

/// How results of superseded requests are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Every result is applied when it arrives; the last one to resolve
    /// determines what is shown, whatever the issue order
    #[default]
    LastResolvedWins,
    /// Only the most recently issued request is applied
    DiscardStale,
}

/// Effect of applying a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Options replaced by a first page
    Replaced,
    /// A page appended to the options
    Appended,
    /// Result ignored because a newer request was issued
    DiscardedStale,
}
