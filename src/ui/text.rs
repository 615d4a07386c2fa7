//! Plain-text renderer
//!
//! Produces one line per piece, optionally colored. Handy for logs,
//! snapshots and non-interactive output.

use super::traits::RenderAdapter;
use super::types::{OptionView, TriggerView};
use crate::model::SelectionMode;
use colored::Colorize;

/// Renders every piece as a single line of text
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    /// Renderer without ANSI colors
    #[must_use]
    pub const fn plain() -> Self {
        Self { color: false }
    }

    /// Renderer with ANSI colors
    #[must_use]
    pub const fn colored() -> Self {
        Self { color: true }
    }

    fn marker(mode: SelectionMode, selected: bool) -> &'static str {
        match (mode, selected) {
            (SelectionMode::Single, true) => "(•)",
            (SelectionMode::Single, false) => "( )",
            (SelectionMode::Multi, true) => "[x]",
            (SelectionMode::Multi, false) => "[ ]",
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::plain()
    }
}

impl RenderAdapter for TextRenderer {
    type Output = String;

    fn render_trigger(&mut self, trigger: &TriggerView<'_>) -> String {
        let arrow = if trigger.open { "▴" } else { "▾" };
        let text = match (&trigger.selection_text, self.color) {
            (Some(text), true) => text.bold().to_string(),
            (Some(text), false) => text.clone(),
            (None, true) => trigger.placeholder.dimmed().to_string(),
            (None, false) => trigger.placeholder.to_string(),
        };

        let mut line = match trigger.label {
            Some(label) => format!("{label}: [{text} {arrow}]"),
            None => format!("[{text} {arrow}]"),
        };
        if trigger.open {
            line.push_str(&format!(" search: \"{}\"", trigger.search));
        }
        if trigger.disabled {
            line.push_str(" (disabled)");
        }
        line
    }

    fn render_option(&mut self, option: &OptionView<'_>) -> String {
        let marker = Self::marker(option.mode, option.selected);
        let label = &option.option.label;

        if self.color && option.selected {
            format!("{} {}", marker.green(), label.green().bold())
        } else {
            format!("{marker} {label}")
        }
    }

    fn render_empty(&mut self, text: &str, _search: &str, _class: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_loading(&mut self, text: &str, _class: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_clear(&mut self) -> String {
        "[clear]".to_string()
    }

    fn render_load_more(&mut self, loading: bool) -> String {
        let text = if loading { "Loading more..." } else { "Load more" };
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}
