//! Color theme for the terminal renderer

use ratatui::style::{Color, Modifier, Style};

/// Colors used by [`super::RatatuiRenderer`] and [`super::SelectWidget`]
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background of the row under the cursor
    pub cursor_bg: Color,
    /// Foreground of the row under the cursor
    pub cursor_fg: Color,
    /// Selection marker and selected labels
    pub selected: Color,
    /// Borders
    pub border: Color,
    /// Placeholder and empty-state text
    pub dimmed: Color,
    /// Loading indicators
    pub loading: Color,
    /// Field label
    pub label: Color,
    /// Load-more row and clear affordance
    pub action: Color,
    /// Error messages
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,
            selected: Color::Green,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            loading: Color::Yellow,
            label: Color::Cyan,
            action: Color::Cyan,
            error: Color::Red,
        }
    }

    /// Style for the row under the cursor
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.cursor_bg)
            .fg(self.cursor_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected options and their marker
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for borders of the focused box
    #[must_use]
    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for loading indicators
    #[must_use]
    pub fn loading_style(&self) -> Style {
        Style::default()
            .fg(self.loading)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for the field label
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::default()
            .fg(self.label)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for action rows
    #[must_use]
    pub fn action_style(&self) -> Style {
        Style::default().fg(self.action)
    }

    /// Style for error messages
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }
}
