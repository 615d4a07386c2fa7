//! Interactive terminal select
//!
//! Keys:
//!
//! | Key              | Action                                   |
//! |------------------|------------------------------------------|
//! | text, Backspace  | edit the search (opens the list)         |
//! | Up / Down        | move the cursor                          |
//! | Enter            | open, pick the row, or load more         |
//! | Tab              | open or close the list                   |
//! | Ctrl-L           | load the next page                       |
//! | Ctrl-U, Delete   | clear the selection                      |
//! | Esc              | close the list, or quit when closed      |
//! | Ctrl-C           | quit                                     |
//!
//! The selected value is owned here, outside the control: the change
//! callback writes it and every frame hands it back through
//! [`SelectDriver::sync_value`].

use super::{RatatuiRenderer, SelectWidget};
use crate::SelectError;
use crate::config::SelectConfig;
use crate::driver::SelectDriver;
use crate::model::SelectionValue;
use crate::source::OptionSource;
use crate::ui::render;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

const FETCH_TICK: Duration = Duration::from_millis(30);
const IDLE_TICK: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// What the loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the select until the user quits; returns the final value
///
/// # Errors
///
/// Returns `SelectError::Io` if the terminal cannot be set up or drawn.
/// Fetch failures are shown in the status line and do not end the loop.
pub async fn run<S: OptionSource + 'static>(
    source: S,
    config: &SelectConfig,
    initial: SelectionValue,
) -> Result<SelectionValue, SelectError> {
    let owner = Rc::new(RefCell::new(initial.clone()));
    let on_change = {
        let owner = Rc::clone(&owner);
        move |value: SelectionValue| {
            info!(value = ?value, "selection changed");
            *owner.borrow_mut() = value;
        }
    };
    let mut driver = SelectDriver::new(source, config, initial, on_change);
    let mut app = App::new(config.clone());

    let mut terminal = setup_terminal()?;
    let result = app.event_loop(&mut terminal, &mut driver, &owner).await;
    cleanup_terminal()?;
    result?;

    let value = owner.borrow().clone();
    Ok(value)
}

fn setup_terminal() -> Result<Term, SelectError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn cleanup_terminal() -> Result<(), SelectError> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

struct App {
    config: SelectConfig,
    renderer: RatatuiRenderer,
    search: String,
    cursor: usize,
    status: Option<String>,
}

impl App {
    fn new(config: SelectConfig) -> Self {
        Self {
            config,
            renderer: RatatuiRenderer::new(),
            search: String::new(),
            cursor: 0,
            status: None,
        }
    }

    async fn event_loop<S: OptionSource + 'static>(
        &mut self,
        terminal: &mut Term,
        driver: &mut SelectDriver<S>,
        owner: &Rc<RefCell<SelectionValue>>,
    ) -> Result<(), SelectError> {
        loop {
            self.draw(terminal, driver)?;

            if driver.is_idle() {
                // Nothing to wait for but the keyboard
                event::poll(IDLE_TICK)?;
            } else if let Ok(Some(Err(err))) =
                tokio::time::timeout(FETCH_TICK, driver.next_event()).await
            {
                self.status = Some(err.to_string());
            }

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                    && self.handle_key(driver, key) == Flow::Quit
                {
                    return Ok(());
                }
            }

            let value = owner.borrow().clone();
            driver.sync_value(value);
            self.clamp_cursor(driver);
        }
    }

    fn draw<S: OptionSource + 'static>(
        &mut self,
        terminal: &mut Term,
        driver: &SelectDriver<S>,
    ) -> Result<(), SelectError> {
        let frame = render(driver.control(), &self.config, &mut self.renderer);
        let theme = self.renderer.theme();
        let widget = SelectWidget::new(&frame, theme)
            .cursor(self.cursor)
            .search(&self.search)
            .status(self.status.as_deref());

        terminal.draw(|f| f.render_widget(widget, f.area()))?;
        Ok(())
    }

    fn handle_key<S: OptionSource + 'static>(
        &mut self,
        driver: &mut SelectDriver<S>,
        key: KeyEvent,
    ) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('l') if ctrl => Self::request_more(driver),
            KeyCode::Char('u') if ctrl => {
                driver.clear();
            }
            KeyCode::Delete => {
                driver.clear();
            }
            KeyCode::Char(c) if !ctrl => {
                self.search.push(c);
                self.search_changed(driver);
            }
            KeyCode::Backspace => {
                if self.search.pop().is_some() {
                    self.search_changed(driver);
                }
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor += 1,
            KeyCode::Tab => {
                driver.toggle();
                self.cursor = 0;
            }
            KeyCode::Enter => self.activate(driver),
            KeyCode::Esc => {
                if !driver.close() {
                    return Flow::Quit;
                }
            }
            _ => {}
        }

        Flow::Continue
    }

    fn search_changed<S: OptionSource + 'static>(&mut self, driver: &mut SelectDriver<S>) {
        self.cursor = 0;
        self.status = None;
        driver.set_search(self.search.clone());
        driver.open();
    }

    fn activate<S: OptionSource + 'static>(&mut self, driver: &mut SelectDriver<S>) {
        let control = driver.control();
        if !control.is_open() {
            driver.open();
            self.cursor = 0;
            return;
        }

        if let Some(option) = control.options().get(self.cursor).cloned() {
            debug!(id = %option.id, "picked from list");
            driver.select(option);
        } else if self.cursor == control.options().len() {
            Self::request_more(driver);
        }
    }

    /// Load the next page unless one is already on its way
    fn request_more<S: OptionSource + 'static>(driver: &mut SelectDriver<S>) {
        if driver.control().can_load_more() {
            driver.load_more();
        } else {
            debug!("load more not offered");
        }
    }

    fn clamp_cursor<S: OptionSource + 'static>(&mut self, driver: &SelectDriver<S>) {
        let control = driver.control();
        let rows = control.options().len() + usize::from(control.has_more());
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}
