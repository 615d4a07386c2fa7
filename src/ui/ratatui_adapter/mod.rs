//! Ratatui rendering adapter
//!
//! [`RatatuiRenderer`] turns each piece of the control into a styled
//! [`Line`]; [`SelectWidget`] lays a rendered frame out in a terminal
//! area; [`app::run`] drives a [`crate::SelectDriver`] interactively with
//! crossterm input.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   render()   ┌──────────────────┐
//! │  SelectDriver  │ ───────────► │ RatatuiRenderer  │
//! └───────▲────────┘              └────────┬─────────┘
//!         │ keys                           │ Rendered<Line>
//! ┌───────┴────────┐              ┌────────▼─────────┐
//! │   Crossterm    │              │   SelectWidget   │
//! └────────────────┘              └──────────────────┘
//! ```

pub mod app;
mod theme;
mod widget;

pub use theme::Theme;
pub use widget::SelectWidget;

use super::traits::RenderAdapter;
use super::types::{OptionView, TriggerView};
use crate::model::SelectionMode;
use ratatui::text::{Line, Span};

/// Renders every piece as a styled ratatui line
#[derive(Debug, Clone, Default)]
pub struct RatatuiRenderer {
    theme: Theme,
}

impl RatatuiRenderer {
    /// Create a renderer with the default theme
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Theme in use
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl RenderAdapter for RatatuiRenderer {
    type Output = Line<'static>;

    fn render_trigger(&mut self, trigger: &TriggerView<'_>) -> Line<'static> {
        let mut spans = Vec::new();

        if let Some(label) = trigger.label {
            spans.push(Span::styled(format!("{label}: "), self.theme.label_style()));
        }

        match &trigger.selection_text {
            Some(text) => spans.push(Span::styled(text.clone(), self.theme.selected_style())),
            None => spans.push(Span::styled(
                trigger.placeholder.to_string(),
                self.theme.dimmed_style(),
            )),
        }

        if trigger.disabled {
            spans.push(Span::styled(" (disabled)", self.theme.dimmed_style()));
        } else {
            spans.push(Span::raw(if trigger.open { " ▴" } else { " ▾" }));
        }

        Line::from(spans)
    }

    fn render_option(&mut self, option: &OptionView<'_>) -> Line<'static> {
        let marker = match (option.mode, option.selected) {
            (SelectionMode::Single, true) => "● ",
            (SelectionMode::Multi, true) => "✓ ",
            (_, false) => "  ",
        };
        let style = if option.selected {
            self.theme.selected_style()
        } else {
            ratatui::style::Style::default()
        };

        Line::from(vec![
            Span::styled(marker, self.theme.selected_style()),
            Span::styled(option.option.label.clone(), style),
        ])
    }

    fn render_empty(&mut self, text: &str, _search: &str, _class: &str) -> Line<'static> {
        Line::from(Span::styled(text.to_string(), self.theme.dimmed_style()))
    }

    fn render_loading(&mut self, text: &str, _class: &str) -> Line<'static> {
        Line::from(Span::styled(text.to_string(), self.theme.loading_style()))
    }

    fn render_clear(&mut self) -> Line<'static> {
        Line::from(Span::styled("✕ clear", self.theme.action_style()))
    }

    fn render_load_more(&mut self, loading: bool) -> Line<'static> {
        if loading {
            Line::from(Span::styled("Loading more...", self.theme.loading_style()))
        } else {
            Line::from(Span::styled("↓ Load more", self.theme.action_style()))
        }
    }
}
