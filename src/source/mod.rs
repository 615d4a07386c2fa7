//! Option sources
//!
//! The control knows nothing about where options come from. Owners plug in
//! anything that implements [`OptionSource`]: an HTTP client, a database
//! query, or one of the sources shipped here.
//!
//! - **`InMemorySource`** - pages and fuzzy-filters a fixed option list
//! - **`DeferredSource`** - parks every request until the host answers it,
//!   in whatever order the host chooses
//!
//! ```
//! use remote_select::source::{FetchPage, FetchQuery, OptionSource, Result};
//! use remote_select::SelectOption;
//!
//! struct Regions;
//!
//! #[async_trait::async_trait]
//! impl OptionSource for Regions {
//!     async fn fetch(&self, query: FetchQuery) -> Result<FetchPage> {
//!         let data = vec![SelectOption::new(1, format!("{} (page {})", query.search, query.page))];
//!         Ok(FetchPage::new(data, false))
//!     }
//! }
//! ```

mod deferred;
mod error;
mod memory;

pub use deferred::{DeferredHandle, DeferredSource};
pub use error::{Result, SourceError};
pub use memory::InMemorySource;

use crate::model::SelectOption;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters of one fetch call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchQuery {
    /// Current search text
    pub search: String,
    /// 1-based page number; reset fetches always ask for page 1
    #[serde(default = "first_page")]
    pub page: u32,
}

const fn first_page() -> u32 {
    1
}

impl FetchQuery {
    /// Query for the first page of a search
    #[must_use]
    pub fn first(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
        }
    }

    /// Query for a specific page
    #[must_use]
    pub fn page(search: impl Into<String>, page: u32) -> Self {
        Self {
            search: search.into(),
            page,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FetchPage {
    /// Options of this page, in display order
    pub data: Vec<SelectOption>,
    /// Whether a following page exists
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl FetchPage {
    /// Create a page
    #[must_use]
    pub const fn new(data: Vec<SelectOption>, has_more: bool) -> Self {
        Self { data, has_more }
    }

    /// Page with no options and no continuation
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            has_more: false,
        }
    }
}

/// Remote data source behind a control
///
/// Implementations must tolerate repeated calls with identical arguments;
/// the control never memoizes. A returned error is not recovered by the
/// control: it is handed to the host and the loading flags stay set.
#[async_trait]
pub trait OptionSource: Send + Sync {
    /// Fetch one page of options for a search
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the page cannot be produced.
    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage>;
}
