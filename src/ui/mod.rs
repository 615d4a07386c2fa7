//! Rendering layer
//!
//! The control knows nothing about how it looks. [`render`] walks the
//! current state and asks a [`RenderAdapter`] for each visible piece:
//!
//! ```text
//! ┌─────────────────────────────┐
//! │ SelectControl (state)       │
//! └──────────────┬──────────────┘
//!                │ render()
//!                ▼
//! ┌─────────────────────────────┐
//! │ RenderAdapter               │
//! │  render_trigger             │
//! │  render_option / _empty     │
//! │  render_loading / _clear    │
//! │  render_load_more           │
//! └──────────────┬──────────────┘
//!        ┌───────┴────────┐
//!        ▼                ▼
//!  TextRenderer    RatatuiRenderer
//! ```
//!
//! Visibility rules:
//!
//! - the trigger is always drawn
//! - the clear affordance is drawn when something is selected and the
//!   control is enabled
//! - while open: the loading state replaces the list while the first page
//!   is loading; the empty state is drawn when nothing was found; otherwise
//!   every accumulated option is drawn, followed by load-more while the
//!   source announces more data
//!
//! A failed first-page fetch therefore keeps the loading state on screen.
//!
//! ```
//! use remote_select::{SelectConfig, SelectControl, SelectionValue};
//! use remote_select::ui::{TextRenderer, render};
//!
//! let config = SelectConfig::default().with_placeholder("Pick one");
//! let control = SelectControl::new(&config, SelectionValue::Empty, |_| {});
//!
//! let frame = render(&control, &config, &mut TextRenderer::plain());
//! assert!(frame.trigger.contains("Pick one"));
//! assert!(frame.dropdown.is_none());
//! ```

mod text;
mod traits;
mod types;

pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use text::TextRenderer;
pub use traits::RenderAdapter;
pub use types::{Dropdown, OptionView, Rendered, TriggerView};

use crate::config::SelectConfig;
use crate::control::SelectControl;

/// Render the current state of a control through an adapter
pub fn render<A: RenderAdapter>(
    control: &SelectControl,
    config: &SelectConfig,
    adapter: &mut A,
) -> Rendered<A::Output> {
    let selected = control.selected();
    let trigger = adapter.render_trigger(&TriggerView {
        label: config.label.as_deref(),
        selected: selected.options(),
        selection_text: control.selection_text(),
        placeholder: &config.placeholder,
        search: control.search(),
        open: control.is_open(),
        disabled: control.is_disabled(),
        mode: control.mode(),
        classes: &config.classes,
    });

    let clear = (!selected.is_empty() && !control.is_disabled()).then(|| adapter.render_clear());

    let dropdown = control
        .is_open()
        .then(|| render_dropdown(control, config, adapter));

    Rendered {
        trigger,
        clear,
        dropdown,
    }
}

fn render_dropdown<A: RenderAdapter>(
    control: &SelectControl,
    config: &SelectConfig,
    adapter: &mut A,
) -> Dropdown<A::Output> {
    let classes = &config.classes;

    if control.is_loading() {
        return Dropdown::Loading(adapter.render_loading(&config.loading_text, &classes.loading));
    }

    if control.options().is_empty() {
        let search = control.search();
        return Dropdown::Empty(adapter.render_empty(
            &config.empty_text_for(search),
            search,
            &classes.empty,
        ));
    }

    let rows = control
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let selected = control.is_selected(option);
            adapter.render_option(&OptionView {
                option,
                index,
                selected,
                mode: control.mode(),
                class: classes.option_classes(selected),
            })
        })
        .collect();

    let load_more = control
        .has_more()
        .then(|| adapter.render_load_more(control.is_loading_more()));

    Dropdown::Options { rows, load_more }
}
