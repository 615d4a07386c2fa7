//! Widget that lays out a rendered select frame

use super::theme::Theme;
use crate::ui::{Dropdown, Rendered};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Trigger box with the dropdown underneath
///
/// The cursor indexes option rows first, then the load-more row.
pub struct SelectWidget<'a> {
    frame: &'a Rendered<Line<'static>>,
    theme: &'a Theme,
    cursor: usize,
    search: &'a str,
    status: Option<&'a str>,
}

impl<'a> SelectWidget<'a> {
    /// Create a widget over a rendered frame
    #[must_use]
    pub const fn new(frame: &'a Rendered<Line<'static>>, theme: &'a Theme) -> Self {
        Self {
            frame,
            theme,
            cursor: 0,
            search: "",
            status: None,
        }
    }

    /// Highlight a row
    #[must_use]
    pub const fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// Show the search text in the trigger box title
    #[must_use]
    pub const fn search(mut self, search: &'a str) -> Self {
        self.search = search;
        self
    }

    /// Show a status or error message under the dropdown
    #[must_use]
    pub const fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    fn render_trigger(&self, area: Rect, buf: &mut Buffer) {
        let open = self.frame.dropdown.is_some();
        let title = if open {
            format!(" Search: {}│ ", self.search)
        } else {
            " Select ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if open {
                self.theme.focused_border_style()
            } else {
                self.theme.border_style()
            })
            .title(title);

        let mut spans = self.frame.trigger.spans.clone();
        if let Some(clear) = &self.frame.clear {
            spans.push(Span::raw("  "));
            spans.extend(clear.spans.iter().cloned());
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }

    fn render_dropdown(&self, dropdown: &Dropdown<Line<'static>>, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let lines: Vec<&Line<'static>> = match dropdown {
            Dropdown::Loading(line) | Dropdown::Empty(line) => {
                Paragraph::new(line.clone()).render(inner, buf);
                return;
            }
            Dropdown::Options { rows, load_more } => rows.iter().chain(load_more).collect(),
        };

        // Keep the cursor row visible
        let visible = inner.height as usize;
        let start = self.cursor.saturating_sub(visible.saturating_sub(1));
        let items: Vec<ListItem> = lines
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(index, line)| {
                let item = ListItem::new((*line).clone());
                if index == self.cursor {
                    item.style(self.theme.cursor_style())
                } else {
                    item
                }
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Trigger
                Constraint::Min(0),    // Dropdown
                Constraint::Length(1), // Status
            ])
            .split(area);

        self.render_trigger(chunks[0], buf);

        if let Some(dropdown) = &self.frame.dropdown {
            self.render_dropdown(dropdown, chunks[1], buf);
        }

        if let Some(status) = self.status {
            Paragraph::new(Span::styled(status.to_string(), self.theme.error_style()))
                .render(chunks[2], buf);
        }
    }
}
