//! Core data types shared by the control, the sources and the renderers
//!
//! - **`OptionId`** - stable identity of an option (string or number)
//! - **`SelectOption`** - one selectable record with a label and free-form extras
//! - **`SelectionValue`** - `null`, one option, or an ordered list of options
//! - **`SelectionMode`** - fixed per control: single or multi

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identity of an option
///
/// Serialized untagged so that `1` and `"1"` stay distinct, matching
/// whatever the data source sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    /// Numeric identifier
    Number(i64),
    /// Textual identifier
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One selectable record
///
/// Identity is `id`. The label is what renderers show and is not
/// guaranteed to be unique. Any other attributes the source sends are
/// kept in `extra` and handed back untouched on selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stable identity
    pub id: OptionId,
    /// Display label
    pub label: String,
    /// Arbitrary extra attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectOption {
    /// Create an option without extra attributes
    #[must_use]
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra attribute
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extra attribute
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Whether a control holds one option or an ordered set of options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one selected option; picking closes the list
    #[default]
    Single,
    /// Ordered set of options toggled by id; picking keeps the list open
    Multi,
}

impl SelectionMode {
    /// Mode for the `is_multi` flag
    #[must_use]
    pub const fn from_multi(is_multi: bool) -> Self {
        if is_multi { Self::Multi } else { Self::Single }
    }

    /// Whether this is multi mode
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::Multi)
    }
}

/// Current selection as seen by the owner
///
/// Serializes to `null`, an option object, or an array of option objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    /// Nothing selected
    #[default]
    Empty,
    /// Single selected option
    One(SelectOption),
    /// Ordered selected options (multi mode)
    Many(Vec<SelectOption>),
}

impl SelectionValue {
    /// Whether nothing is selected (`null` or an empty list)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::One(_) => false,
            Self::Many(items) => items.is_empty(),
        }
    }

    /// Selected options as a slice, in selection order
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Empty => &[],
            Self::One(option) => std::slice::from_ref(option),
            Self::Many(items) => items,
        }
    }

    /// Whether an option with this id is selected
    #[must_use]
    pub fn contains(&self, id: &OptionId) -> bool {
        self.options().iter().any(|option| &option.id == id)
    }

    /// Labels of the selected options, in selection order
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.options().iter().map(|o| o.label.as_str()).collect()
    }
}

impl From<SelectOption> for SelectionValue {
    fn from(option: SelectOption) -> Self {
        Self::One(option)
    }
}

impl From<Vec<SelectOption>> for SelectionValue {
    fn from(options: Vec<SelectOption>) -> Self {
        Self::Many(options)
    }
}

impl From<Option<SelectOption>> for SelectionValue {
    fn from(option: Option<SelectOption>) -> Self {
        option.map_or(Self::Empty, Self::One)
    }
}
