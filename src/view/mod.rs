//! Live terminal log and terminal management (impure shell)

pub mod constants;
pub mod header;
pub mod log_list;
mod styles;

pub use header::{render_header, stats_line, HeaderInfo};
pub use log_list::{format_row, render_log};
pub use styles::{ColorConfig, Palette};

use crate::config::KeyBindings;
use crate::coordination::{CoordinationCore, NavigationOutcome, UiEvent};
use crate::model::AppError;
use crate::platform::TerminalFocus;
use constants::{log_area_height, HEADER_HEIGHT, TICK_INTERVAL};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Constraint, Layout};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::Receiver;
use std::sync::Once;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
        }
    }
}

/// Raw mode, alternate screen, focus reporting and hidden cursor for as long
/// as the guard lives.
///
/// Dropping the guard restores the terminal; a panic hook does the same for
/// panics on any thread.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Switch the terminal into live-log mode.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the terminal cannot be switched; anything
    /// already changed is rolled back.
    pub fn acquire() -> Result<Self, TuiError> {
        install_panic_hook();
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableFocusChange, Hide) {
            let _ = restore_terminal();
            return Err(e.into());
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            debug!(error = %e, "Terminal restore failed");
        }
    }
}

/// Undo everything [`TerminalGuard::acquire`] did. Safe to call repeatedly.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen, Show);
    raw.and(screen)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous(info);
        }));
    });
}

/// What the event loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Quit,
    Redraw,
    Idle,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    core: CoordinationCore,
    header: HeaderInfo,
    palette: Palette,
    key_bindings: KeyBindings,
    focus: TerminalFocus,
    ui_events: Receiver<UiEvent>,
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Bind a terminal to the shared capture state.
    pub fn new(
        terminal: Terminal<B>,
        core: CoordinationCore,
        header: HeaderInfo,
        focus: TerminalFocus,
        ui_events: Receiver<UiEvent>,
    ) -> Self {
        Self {
            terminal,
            core,
            header,
            palette: Palette::default(),
            key_bindings: KeyBindings::default(),
            focus,
            ui_events,
        }
    }

    /// Run the event loop until quit or shutdown.
    ///
    /// Redraws on key presses, resizes and new captures; otherwise wakes every
    /// [`TICK_INTERVAL`] to notice captures and shutdown.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        while !self.core.is_shutting_down() {
            let mut redraw = false;

            if event::poll(TICK_INTERVAL)? {
                match self.handle_event(event::read()?) {
                    Step::Quit => return Ok(()),
                    Step::Redraw => redraw = true,
                    Step::Idle => {}
                }
            }

            redraw |= self.drain_ui_events();

            if redraw {
                self.draw()?;
            }
        }

        Ok(())
    }

    /// Apply one terminal event.
    fn handle_event(&mut self, event: Event) -> Step {
        match event {
            Event::Key(key) => {
                if self.handle_key(key) {
                    Step::Quit
                } else {
                    Step::Redraw
                }
            }
            Event::Resize(..) => Step::Redraw,
            Event::FocusGained => {
                self.focus.set_focused(true);
                Step::Idle
            }
            Event::FocusLost => {
                self.focus.set_focused(false);
                Step::Idle
            }
            _ => Step::Idle,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        let outcome = self.core.on_navigation_key(action);
        debug!(?action, ?outcome, "Key handled");
        outcome == NavigationOutcome::Quit
    }

    /// Consume pending capture notifications. Returns whether any arrived.
    fn drain_ui_events(&mut self) -> bool {
        let mut any = false;
        while let Ok(UiEvent::CaptureRecorded { .. }) = self.ui_events.try_recv() {
            any = true;
        }
        any
    }

    /// Render the current frame
    ///
    /// The viewport height is pushed into the shared state first so the
    /// snapshot is clamped for the size actually drawn.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.core.resize(log_area_height(size.height));
        let snapshot = self.core.snapshot();

        let header = &self.header;
        let palette = &self.palette;
        self.terminal.draw(|frame| {
            let [header_area, log_area] =
                Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                    .areas(frame.area());
            render_header(frame, header_area, header, &snapshot.statistics, palette);
            render_log(frame, log_area, &snapshot, palette);
        })?;

        Ok(())
    }

    /// Replace the palette (defaults to the `NO_COLOR`-aware one).
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_event_test(&mut self, event: Event) {
        self.handle_event(event);
    }

    pub(crate) fn drain_ui_events_test(&mut self) -> bool {
        self.drain_ui_events()
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

/// Take over the terminal and run the live log until quit or shutdown.
///
/// The terminal is restored on every exit path, including errors.
pub fn run(
    core: CoordinationCore,
    header: HeaderInfo,
    focus: TerminalFocus,
    ui_events: Receiver<UiEvent>,
) -> Result<(), TuiError> {
    let _guard = TerminalGuard::acquire()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = TuiApp::new(terminal, core, header, focus, ui_events);
    app.run()
}
