//! Rendering adapter trait

use super::types::{OptionView, TriggerView};

/// Presentation hooks a renderer implements
///
/// The control decides *what* is visible; an adapter decides how each
/// piece looks. `Output` is whatever the host draws with: a string, a
/// ratatui `Line`, a DOM node description.
pub trait RenderAdapter {
    /// One rendered piece
    type Output;

    /// Draw the trigger, including the current selection or placeholder
    fn render_trigger(&mut self, trigger: &TriggerView<'_>) -> Self::Output;

    /// Draw one option row
    fn render_option(&mut self, option: &OptionView<'_>) -> Self::Output;

    /// Draw the empty state
    ///
    /// `text` already has the search substituted; `search` is passed for
    /// adapters that build their own message.
    fn render_empty(&mut self, text: &str, search: &str, class: &str) -> Self::Output;

    /// Draw the first-page loading state
    fn render_loading(&mut self, text: &str, class: &str) -> Self::Output;

    /// Draw the clear affordance
    fn render_clear(&mut self) -> Self::Output;

    /// Draw the load-more affordance; `loading` is set while a page is on its way
    fn render_load_more(&mut self, loading: bool) -> Self::Output;
}
