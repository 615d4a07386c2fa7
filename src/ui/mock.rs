//! Mock renderer for testing

use super::traits::RenderAdapter;
use super::types::{OptionView, TriggerView};

/// What the recording renderer produced for one hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Trigger with its display text
    Trigger(String),
    /// Option row
    Row { id: String, selected: bool },
    /// Empty state with its text
    Empty(String),
    /// Loading state with its text
    Loading(String),
    /// Clear affordance
    Clear,
    /// Load-more affordance
    LoadMore { loading: bool },
}

/// Renderer that turns every hook call into a comparable value
///
/// Useful for asserting on what is visible without any formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingRenderer;

impl RenderAdapter for RecordingRenderer {
    type Output = Part;

    fn render_trigger(&mut self, trigger: &TriggerView<'_>) -> Part {
        Part::Trigger(trigger.display_text().to_string())
    }

    fn render_option(&mut self, option: &OptionView<'_>) -> Part {
        Part::Row {
            id: option.option.id.to_string(),
            selected: option.selected,
        }
    }

    fn render_empty(&mut self, text: &str, _search: &str, _class: &str) -> Part {
        Part::Empty(text.to_string())
    }

    fn render_loading(&mut self, text: &str, _class: &str) -> Part {
        Part::Loading(text.to_string())
    }

    fn render_clear(&mut self) -> Part {
        Part::Clear
    }

    fn render_load_more(&mut self, loading: bool) -> Part {
        Part::LoadMore { loading }
    }
}
