//! Accumulated options for the current search

use crate::model::{OptionId, SelectOption};
use crate::source::FetchPage;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered options fetched since the last reset, plus the continuation flag
///
/// Pages are concatenated in arrival order. Ids are not deduplicated: a
/// source returning overlapping pages yields duplicate entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptionPage {
    options: Vec<SelectOption>,
    has_more: bool,
}

impl OptionPage {
    /// Empty accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: Vec::new(),
            has_more: false,
        }
    }

    /// Drop everything (search change or reopen)
    pub fn reset(&mut self) {
        self.options.clear();
        self.has_more = false;
    }

    /// Replace contents with a first page
    pub fn replace(&mut self, page: FetchPage) {
        self.options = page.data;
        self.has_more = page.has_more;
    }

    /// Append a following page
    ///
    /// Returns the ids of the page that were already present.
    pub fn append(&mut self, page: FetchPage) -> Vec<OptionId> {
        let seen: HashSet<&OptionId> = self.options.iter().map(|o| &o.id).collect();
        let repeated: Vec<OptionId> = page
            .data
            .iter()
            .filter(|o| seen.contains(&o.id))
            .map(|o| o.id.clone())
            .collect();

        self.options.extend(page.data);
        self.has_more = page.has_more;
        repeated
    }

    /// Options in display order
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Whether the source announced another page
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of accumulated options
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether nothing has been accumulated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(ids: &[i64], has_more: bool) -> FetchPage {
        FetchPage::new(
            ids.iter().map(|&id| SelectOption::new(id, format!("item {id}"))).collect(),
            has_more,
        )
    }

    fn ids(acc: &OptionPage) -> Vec<OptionId> {
        acc.options().iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_replace_then_append_concatenates() {
        let mut acc = OptionPage::new();
        acc.replace(page(&[1, 2], true));
        let repeated = acc.append(page(&[3], false));

        assert!(repeated.is_empty());
        assert_eq!(ids(&acc), vec![OptionId::Number(1), OptionId::Number(2), OptionId::Number(3)]);
        assert!(!acc.has_more());
    }

    #[test]
    fn test_overlapping_pages_keep_duplicates() {
        let mut acc = OptionPage::new();
        acc.replace(page(&[1, 2], true));
        let repeated = acc.append(page(&[2, 3], true));

        assert_eq!(repeated, vec![OptionId::Number(2)]);
        assert_eq!(acc.len(), 4);
        assert!(acc.has_more());
    }

    #[test]
    fn test_reset_clears_flag() {
        let mut acc = OptionPage::new();
        acc.replace(page(&[1], true));
        acc.reset();

        assert!(acc.is_empty());
        assert!(!acc.has_more());
    }
}
