//! In-memory option source with fuzzy filtering

use super::error::Result;
use super::{FetchPage, FetchQuery, OptionSource};
use crate::model::SelectOption;
use async_trait::async_trait;
use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher, Utf32Str};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Pages a fixed list of options, filtered by fuzzy match on the label
///
/// An empty search returns options in their original order. Otherwise
/// matches are ordered by score, best first, ties keeping original order.
pub struct InMemorySource {
    options: Vec<SelectOption>,
    page_size: usize,
    latency: Option<Duration>,
    matcher: Mutex<Matcher>,
}

impl InMemorySource {
    /// Default number of options per page
    pub const DEFAULT_PAGE_SIZE: usize = 20;

    /// Create a source over the given options
    #[must_use]
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            page_size: Self::DEFAULT_PAGE_SIZE,
            latency: None,
            matcher: Mutex::new(Matcher::new(Config::DEFAULT)),
        }
    }

    /// Load options from a JSON file holding an array of option objects
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the file cannot be read or decoded.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: Vec<SelectOption> = serde_json::from_str(&content)?;
        Ok(Self::new(options))
    }

    /// Set the page size (minimum 1)
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Delay every fetch to imitate a remote service
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Total number of options held
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the source holds no options
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn matching(&self, search: &str) -> Vec<&SelectOption> {
        let search = search.trim();
        if search.is_empty() {
            return self.options.iter().collect();
        }

        let pattern = Pattern::parse(search, CaseMatching::Smart, Normalization::Smart);
        let mut matcher = match self.matcher.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut buf = Vec::new();

        let mut scored: Vec<(u32, &SelectOption)> = self
            .options
            .iter()
            .filter_map(|option| {
                pattern
                    .score(Utf32Str::new(&option.label, &mut buf), &mut matcher)
                    .map(|score| (score, option))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, option)| option).collect()
    }

    fn page_of(&self, query: &FetchQuery) -> FetchPage {
        let matches = self.matching(&query.search);
        let page = query.page.max(1) as usize;
        let start = (page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(matches.len());

        if start >= matches.len() {
            return FetchPage::empty();
        }

        FetchPage::new(
            matches[start..end].iter().map(|&o| o.clone()).collect(),
            end < matches.len(),
        )
    }
}

impl std::fmt::Debug for InMemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySource")
            .field("options", &self.options.len())
            .field("page_size", &self.page_size)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OptionSource for InMemorySource {
    async fn fetch(&self, query: FetchQuery) -> Result<FetchPage> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let page = self.page_of(&query);
        tracing::trace!(
            search = %query.search,
            page = query.page,
            returned = page.data.len(),
            has_more = page.has_more,
            "in-memory fetch"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn cities() -> Vec<SelectOption> {
        ["Bandung", "Bekasi", "Bogor", "Jakarta", "Surabaya"]
            .iter()
            .enumerate()
            .map(|(i, name)| SelectOption::new(i as i64 + 1, *name))
            .collect()
    }

    fn fetch_now(source: &InMemorySource, query: FetchQuery) -> FetchPage {
        source.fetch(query).now_or_never().unwrap().unwrap()
    }

    fn labels(page: &FetchPage) -> Vec<&str> {
        page.data.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_empty_search_pages_in_order() {
        let source = InMemorySource::new(cities()).with_page_size(2);

        let first = fetch_now(&source, FetchQuery::first(""));
        assert_eq!(labels(&first), vec!["Bandung", "Bekasi"]);
        assert!(first.has_more);

        let last = fetch_now(&source, FetchQuery::page("", 3));
        assert_eq!(labels(&last), vec!["Surabaya"]);
        assert!(!last.has_more);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let source = InMemorySource::new(cities()).with_page_size(2);
        assert_eq!(fetch_now(&source, FetchQuery::page("", 9)), FetchPage::empty());
    }

    #[test]
    fn test_search_filters_by_label() {
        let source = InMemorySource::new(cities());

        let page = fetch_now(&source, FetchQuery::first("jkt"));
        assert_eq!(labels(&page), vec!["Jakarta"]);
        assert!(!page.has_more);

        let none = fetch_now(&source, FetchQuery::first("zzz"));
        assert!(none.data.is_empty());
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        let source = InMemorySource::new(cities()).with_page_size(0);
        let page = fetch_now(&source, FetchQuery::first(""));
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "id-1", "label": "Medan", "province": "Sumut"}}]"#).unwrap();

        let source = InMemorySource::from_json_file(file.path()).unwrap();
        assert_eq!(source.len(), 1);

        let page = fetch_now(&source, FetchQuery::first(""));
        assert_eq!(page.data[0].attr("province"), Some(&serde_json::json!("Sumut")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let source = InMemorySource::new(cities()).with_latency(Duration::from_millis(300));
        let started = tokio::time::Instant::now();

        let page = source.fetch(FetchQuery::first("")).await.unwrap();

        assert_eq!(page.data.len(), 5);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
