//! remote-select - a searchable, paginated select control over an async source
//!
//! The crate provides the state machine behind a "select2"-style dropdown:
//! text search, first-page fetch on open, "load more" pagination, single or
//! multi selection, and synchronization with a value owned by the caller.
//! Rendering is delegated to a [`ui::RenderAdapter`]; plain-text and
//! ratatui adapters are included.
//!
//! # Layers
//!
//! - **`control`** - the synchronous state machine (`SelectControl`)
//! - **`driver`** - runs fetches against an `OptionSource` (`SelectDriver`)
//! - **`source`** - the data source trait and two implementations
//! - **`ui`** - rendering adapter trait and adapters
//! - **`config`** - static settings, loadable from TOML

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod control;
pub mod driver;
pub mod model;
pub mod source;
pub mod ui;

#[cfg(test)]
pub mod testing;

pub use crate::config::{ClassNames, SelectConfig};
pub use control::{Phase, SelectControl, StalePolicy};
pub use driver::{DriverEvent, SelectDriver};
pub use model::{OptionId, SelectOption, SelectionMode, SelectionValue};

/// Error enum, contains all failure states of the crate
#[derive(Debug, Error)]
pub enum SelectError {
    /// A fetch failed; the control's loading state was left untouched
    #[error("Fetch {request} failed: {source}")]
    Fetch {
        /// Request that failed
        request: control::RequestId,
        /// Error reported by the source
        #[source]
        source: source::SourceError,
    },
    /// Source error outside of a tracked fetch
    #[error("Source error: {0}")]
    Source(#[from] source::SourceError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_fetch_error_display_and_source() {
        let error = SelectError::Fetch {
            request: control::RequestId(3),
            source: source::SourceError::Rejected("HTTP 503".into()),
        };

        assert_eq!(error.to_string(), "Fetch #3 failed: Fetch rejected: HTTP 503");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_config_error_conversion() {
        let config_error = ::config::ConfigError::Message("bad".into());
        let error: SelectError = config_error.into();
        assert!(error.to_string().starts_with("Configuration error"));
    }
}
