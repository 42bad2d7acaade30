//! Test doubles for the platform capabilities and a TUI harness.
//!
//! Every fake records what it was asked to do and shares that record between
//! clones, so a test can keep one clone while the core owns another.

use crate::coordination::{
    CopyTiming, CoordinationCore, ExportHandle, Platform, ResponderCommand, ShutdownSignal,
    UiEvent,
};
use crate::integration::initial_focus;
use crate::model::PlatformError;
use crate::output::CaptureOutputs;
use crate::platform::{ClipboardOwner, ClipboardReader, KeystrokeInjector, TerminalFocus};
use crate::state::CaptureState;
use crate::view::constants::log_area_height;
use crate::view::{ColorConfig, HeaderInfo, Palette, TuiApp};
use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};

/// Clipboard reader returning a programmable value.
#[derive(Debug, Clone)]
pub struct FakeClipboard {
    content: Arc<Mutex<Result<Option<String>, PlatformError>>>,
    reads: Arc<AtomicUsize>,
}

impl FakeClipboard {
    /// Clipboard holding `text`.
    pub fn with_text(text: &str) -> Self {
        Self::with_result(Ok(Some(text.to_string())))
    }

    /// Clipboard with no text.
    pub fn empty() -> Self {
        Self::with_result(Ok(None))
    }

    /// Clipboard whose reads fail.
    pub fn failing() -> Self {
        Self::with_result(Err(PlatformError::ClipboardRead("fake".to_string())))
    }

    fn with_result(result: Result<Option<String>, PlatformError>) -> Self {
        Self {
            content: Arc::new(Mutex::new(result)),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Change what subsequent reads return.
    pub fn set_text(&self, text: &str) {
        *self.content.lock().unwrap() = Ok(Some(text.to_string()));
    }

    /// Number of reads so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ClipboardReader for FakeClipboard {
    fn read_text(&self) -> Result<Option<String>, PlatformError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.content.lock().unwrap().clone()
    }
}

/// Keystroke injector counting copy chords.
#[derive(Debug, Clone, Default)]
pub struct RecordingInjector {
    chords: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingInjector {
    /// Injector that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injector that always fails (after counting the attempt).
    pub fn failing() -> Self {
        Self {
            chords: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }

    /// Chords sent so far.
    pub fn chords(&self) -> usize {
        self.chords.load(Ordering::SeqCst)
    }
}

impl KeystrokeInjector for RecordingInjector {
    fn send_copy_chord(&self) -> Result<(), PlatformError> {
        self.chords.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PlatformError::KeystrokeInjection("fake".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
struct OwnerLog {
    claims: Vec<String>,
    attempts: usize,
    releases: usize,
}

/// Clipboard owner recording claims and releases.
#[derive(Debug, Clone, Default)]
pub struct RecordingOwner {
    log: Arc<Mutex<OwnerLog>>,
    fail: bool,
}

impl RecordingOwner {
    /// Owner whose claims succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Owner whose claims fail.
    pub fn failing() -> Self {
        Self {
            log: Arc::default(),
            fail: true,
        }
    }

    /// Successfully claimed texts, in order.
    pub fn claims(&self) -> Vec<String> {
        self.log.lock().unwrap().claims.clone()
    }

    /// Claim attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.log.lock().unwrap().attempts
    }

    /// Number of `release` calls.
    pub fn release_count(&self) -> usize {
        self.log.lock().unwrap().releases
    }
}

impl ClipboardOwner for RecordingOwner {
    fn claim(&mut self, text: &str) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.attempts += 1;
        if self.fail {
            return Err(PlatformError::ClipboardWrite("fake".to_string()));
        }
        log.claims.push(text.to_string());
        Ok(())
    }

    fn release(&mut self) {
        self.log.lock().unwrap().releases += 1;
    }
}

/// Outputs with only the live log enabled.
pub fn tui_outputs() -> CaptureOutputs {
    CaptureOutputs {
        tui: true,
        ..Default::default()
    }
}

/// A core wired to fakes, with the responder channel left for the test to read.
pub struct CoreFixture {
    /// Core under test.
    pub core: CoordinationCore,
    /// Clipboard the copy task reads.
    pub clipboard: FakeClipboard,
    /// Records copy chords.
    pub injector: RecordingInjector,
    /// Self-trigger guard.
    pub focus: TerminalFocus,
    /// Commands the core sent to the clipboard responder.
    pub exports: Receiver<ResponderCommand>,
    /// Redraw notifications.
    pub ui_events: Receiver<UiEvent>,
}

impl CoreFixture {
    /// Fixture with a roomy store and no copy delays.
    pub fn new(outputs: CaptureOutputs) -> Self {
        Self::with_state(CaptureState::new(100, 4096, 10), outputs)
    }

    /// Fixture around an explicit state.
    pub fn with_state(state: CaptureState, outputs: CaptureOutputs) -> Self {
        Self::build(state, outputs, FakeClipboard::with_text("copied"), RecordingInjector::new())
    }

    /// Fixture with explicit fakes.
    pub fn build(
        state: CaptureState,
        outputs: CaptureOutputs,
        clipboard: FakeClipboard,
        injector: RecordingInjector,
    ) -> Self {
        Self::assemble(state, outputs, clipboard, injector, TerminalFocus::new())
    }

    fn assemble(
        state: CaptureState,
        outputs: CaptureOutputs,
        clipboard: FakeClipboard,
        injector: RecordingInjector,
        focus: TerminalFocus,
    ) -> Self {
        let (export_tx, exports) = mpsc::channel();
        let (ui_tx, ui_events) = mpsc::channel();
        let platform = Platform {
            reader: Arc::new(clipboard.clone()),
            injector: Arc::new(injector.clone()),
            foreground: Arc::new(focus.clone()),
        };
        let core = CoordinationCore::new(
            state,
            outputs,
            platform,
            ExportHandle::new(export_tx),
            ShutdownSignal::new(),
        )
        .with_timing(CopyTiming::IMMEDIATE)
        .with_ui_events(ui_tx);

        Self {
            core,
            clipboard,
            injector,
            focus,
            exports,
            ui_events,
        }
    }

    /// Texts claimed through the responder channel so far.
    pub fn exported(&self) -> Vec<String> {
        self.exports
            .try_iter()
            .filter_map(|command| match command {
                ResponderCommand::Claim(text) => Some(text),
                ResponderCommand::Shutdown => None,
            })
            .collect()
    }
}

/// Convert a ratatui buffer to one string per row, trailing spaces trimmed.
fn buffer_lines(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buffer.area();
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            for x in area.left()..area.right() {
                line.push_str(buffer[(x, y)].symbol());
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Drives a `TuiApp<TestBackend>` wired to a [`CoreFixture`].
pub struct TuiHarness {
    app: TuiApp<TestBackend>,
    fixture: CoreFixture,
    exported: Vec<String>,
}

impl TuiHarness {
    /// Harness with a `width` x `height` terminal, focused as at launch.
    pub fn new(width: u16, height: u16) -> Self {
        let state = CaptureState::new(100, 4096, log_area_height(height));
        let mut fixture = CoreFixture::assemble(
            state,
            tui_outputs(),
            FakeClipboard::with_text("copied"),
            RecordingInjector::new(),
            initial_focus(true),
        );

        // The app consumes the fixture's redraw notifications.
        let (_, detached) = mpsc::channel();
        let ui_events = std::mem::replace(&mut fixture.ui_events, detached);

        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let app = TuiApp::new(
            terminal,
            fixture.core.clone(),
            HeaderInfo::new(Local::now(), &["--tui".to_string()]),
            fixture.focus.clone(),
            ui_events,
        )
        .with_palette(Palette::new(ColorConfig::new(true)));

        Self {
            app,
            fixture,
            exported: Vec::new(),
        }
    }

    /// The fixture behind the app.
    pub fn fixture(&self) -> &CoreFixture {
        &self.fixture
    }

    /// Record a capture as the copy task would.
    pub fn capture(&mut self, text: &str) {
        self.fixture.core.on_capture_complete(text);
    }

    /// Press a key. Returns true if the app wants to quit.
    pub fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.app.handle_key_test(KeyEvent::new(code, modifiers))
    }

    /// Feed a terminal event to the app's event loop.
    pub fn send_event(&mut self, event: Event) {
        self.app.handle_event_test(event);
    }

    /// Consume redraw notifications.
    pub fn drain_ui_events(&mut self) -> bool {
        self.app.drain_ui_events_test()
    }

    /// Resize the test terminal.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.terminal_mut().backend_mut().resize(width, height);
    }

    /// Render and return the screen as one string.
    pub fn render(&mut self) -> String {
        self.render_lines().join("\n")
    }

    /// Render and return the screen rows.
    pub fn render_lines(&mut self) -> Vec<String> {
        self.app.render_test().unwrap();
        buffer_lines(self.app.terminal().backend().buffer())
    }

    /// Whether row `y` carries the selection background (last render).
    pub fn row_is_highlighted(&self, y: u16) -> bool {
        let buffer = self.app.terminal().backend().buffer();
        buffer[(0, y)].bg == Color::White
    }

    /// Texts exported to the clipboard responder so far.
    pub fn exported(&mut self) -> Vec<String> {
        self.exported.extend(self.fixture.exported());
        self.exported.clone()
    }

    /// Whether quit/shutdown was requested.
    pub fn is_shutting_down(&self) -> bool {
        self.fixture.core.is_shutting_down()
    }
}
