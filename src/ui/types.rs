//! View types handed to rendering adapters

use crate::config::ClassNames;
use crate::model::{SelectOption, SelectionMode};

/// Everything needed to draw the trigger (input box or button)
#[derive(Debug, Clone)]
pub struct TriggerView<'a> {
    /// Optional label shown with the control
    pub label: Option<&'a str>,
    /// Selected options, in selection order
    pub selected: &'a [SelectOption],
    /// Selected labels joined for display, if anything is selected
    pub selection_text: Option<String>,
    /// Shown when nothing is selected
    pub placeholder: &'a str,
    /// Current search text
    pub search: &'a str,
    /// Whether the option list is shown
    pub open: bool,
    /// Whether interaction is disabled
    pub disabled: bool,
    /// Single or multi
    pub mode: SelectionMode,
    /// Style class identifiers
    pub classes: &'a ClassNames,
}

impl TriggerView<'_> {
    /// Selection text, or the placeholder when nothing is selected
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.selection_text.as_deref().unwrap_or(self.placeholder)
    }
}

/// One option row
#[derive(Debug, Clone)]
pub struct OptionView<'a> {
    /// The option
    pub option: &'a SelectOption,
    /// Position in the accumulated list
    pub index: usize,
    /// Whether an option with the same id is selected
    pub selected: bool,
    /// Single or multi
    pub mode: SelectionMode,
    /// Class string for the row (option class, plus selected class)
    pub class: String,
}

/// Body of the open dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropdown<T> {
    /// First page loading; no options shown
    Loading(T),
    /// Loaded, nothing matched
    Empty(T),
    /// Option rows plus an optional load-more affordance
    Options {
        /// One entry per accumulated option
        rows: Vec<T>,
        /// Present while the source announces more data
        load_more: Option<T>,
    },
}

impl<T> Dropdown<T> {
    /// Option rows, empty for loading and empty states
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Options { rows, .. } => rows,
            Self::Loading(_) | Self::Empty(_) => &[],
        }
    }

    /// Load-more affordance, if shown
    #[must_use]
    pub const fn load_more(&self) -> Option<&T> {
        match self {
            Self::Options { load_more, .. } => load_more.as_ref(),
            Self::Loading(_) | Self::Empty(_) => None,
        }
    }

    /// Whether the first page is loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

/// A full frame produced by a rendering adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<T> {
    /// The trigger
    pub trigger: T,
    /// Clear affordance, present when something is selected
    pub clear: Option<T>,
    /// The dropdown, present while open
    pub dropdown: Option<Dropdown<T>>,
}
