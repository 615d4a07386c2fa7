//! Testing utilities
//!
//! Helpers shared by the unit tests: option and page builders and a
//! recorder for owner notifications.
//!
//! Only available when compiled with `cfg(test)`.

use crate::model::{SelectOption, SelectionValue};
use crate::source::FetchPage;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every value passed to the owner's change handler
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    calls: Rc<RefCell<Vec<SelectionValue>>>,
}

impl ChangeRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler to pass to a control
    pub fn handler(&self) -> impl FnMut(SelectionValue) + 'static {
        let calls = Rc::clone(&self.calls);
        move |value| calls.borrow_mut().push(value)
    }

    /// All recorded values, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<SelectionValue> {
        self.calls.borrow().clone()
    }

    /// Number of notifications received
    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

/// Option with a numeric id and a label derived from it
#[must_use]
pub fn option(id: i64) -> SelectOption {
    SelectOption::new(id, format!("Option {id}"))
}

/// Page of options with the given ids
#[must_use]
pub fn page(ids: &[i64], has_more: bool) -> FetchPage {
    FetchPage::new(ids.iter().map(|&id| option(id)).collect(), has_more)
}

/// Ids of a list of options, in order
#[must_use]
pub fn ids(options: &[SelectOption]) -> Vec<String> {
    options.iter().map(|o| o.id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_collects_calls() {
        let recorder = ChangeRecorder::new();
        let mut handler = recorder.handler();

        handler(SelectionValue::Empty);
        handler(SelectionValue::One(option(1)));

        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.calls()[1], SelectionValue::One(option(1)));
    }

    #[test]
    fn test_page_builder() {
        let built = page(&[3, 4], true);
        assert!(built.has_more);
        assert_eq!(ids(&built.data), vec!["3", "4"]);
    }
}
