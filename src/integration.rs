//! Startup wiring.
//!
//! Turns a [`ResolvedConfig`] into running tasks: signal handler, clipboard
//! responder, input hook, and either the live terminal log or a console wait.
//! The helpers that derive pieces of the wiring from configuration are pure
//! and tested here; [`run`] itself needs a real desktop session.

use crate::config::ResolvedConfig;
use crate::coordination::{
    spawn_responder, CoordinationCore, CopyTiming, InputDispatcher, Platform, ShutdownSignal,
};
use crate::model::{AppError, PlatformError};
use crate::output::{CaptureLog, CaptureOutputs};
use crate::platform::{
    spawn_input_hook, ArboardOwner, ArboardReader, EnigoInjector, TerminalFocus,
};
use crate::state::CaptureState;
use crate::view::{self, constants::log_area_height, HeaderInfo};
use chrono::Local;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{info, warn};

/// Viewport height assumed before the terminal has been measured.
const FALLBACK_VISIBLE_HEIGHT: usize = 20;

/// Console banner printed at startup outside TUI and batch mode.
pub fn banner_lines(config: &ResolvedConfig) -> Vec<String> {
    let gesture = &config.gesture;
    vec![
        "autocopy started. Press Ctrl+C to exit.".to_string(),
        format!(
            "Settings: {} click(s){}{}",
            gesture.required_clicks,
            if gesture.require_alt { " + Alt" } else { "" },
            if gesture.require_ctrl && !gesture.require_alt {
                " + Ctrl"
            } else {
                ""
            },
        ),
        format!(
            "Timing: Min {} ms, Max {} ms",
            gesture.min_inter_click_ms, gesture.max_inter_click_ms
        ),
    ]
}

/// Output switches for the configuration.
pub fn capture_outputs(config: &ResolvedConfig) -> CaptureOutputs {
    CaptureOutputs {
        tui: config.tui,
        show_text: config.show_text,
        batch: config.batch,
        capture_log: config.capture_log.clone().map(CaptureLog::new),
    }
}

/// Copy task delays for the configuration.
pub fn copy_timing(config: &ResolvedConfig) -> CopyTiming {
    CopyTiming {
        click_settle: Duration::from_millis(config.click_settle_ms),
        copy_settle: Duration::from_millis(config.copy_settle_ms),
    }
}

/// Self-trigger guard for the mode.
///
/// The live log runs in the terminal it was launched from, which is in front
/// at that point; focus events keep it current afterwards. The console mode
/// gets no focus events and stays unfocused.
pub fn initial_focus(tui: bool) -> TerminalFocus {
    if tui {
        TerminalFocus::focused()
    } else {
        TerminalFocus::new()
    }
}

fn initial_visible_height(tui: bool) -> usize {
    if !tui {
        return FALLBACK_VISIBLE_HEIGHT;
    }
    crossterm::terminal::size()
        .map(|(_, rows)| log_area_height(rows))
        .unwrap_or(FALLBACK_VISIBLE_HEIGHT)
}

/// Run until Ctrl+C, SIGTERM or (in TUI mode) a quit key.
///
/// `args` are the command-line arguments without the program name, shown in
/// the TUI header.
///
/// # Errors
///
/// Fails when the signal handler, clipboard session, responder thread or input
/// hook cannot be set up, or when the terminal cannot be driven.
pub fn run(config: ResolvedConfig, args: Vec<String>) -> Result<(), AppError> {
    let shutdown = ShutdownSignal::new();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.trigger())
            .map_err(|e| PlatformError::SignalHandler(e.to_string()))?;
    }

    let owner = ArboardOwner::open()?;
    let (exporter, responder) = spawn_responder(owner, shutdown.clone())?;

    let focus = initial_focus(config.tui);
    let platform = Platform {
        reader: Arc::new(ArboardReader::new()),
        injector: Arc::new(EnigoInjector::new()),
        foreground: Arc::new(focus.clone()),
    };

    let state = CaptureState::new(
        config.max_lines,
        config.max_line_bytes,
        initial_visible_height(config.tui),
    );
    let (ui_tx, ui_rx) = mpsc::channel();
    let mut core = CoordinationCore::new(
        state,
        capture_outputs(&config),
        platform,
        exporter,
        shutdown.clone(),
    )
    .with_timing(copy_timing(&config));
    if config.tui {
        core = core.with_ui_events(ui_tx);
    }

    let mut dispatcher = InputDispatcher::new(config.gesture, core.clone());
    if let Err(e) = spawn_input_hook(move |event| {
        dispatcher.handle(event);
    }) {
        stop(&core, responder);
        return Err(e.into());
    }
    info!(gesture = ?config.gesture, tui = config.tui, "Capture running");

    let result = if config.tui {
        let header = HeaderInfo::new(Local::now(), &args);
        view::run(core.clone(), header, focus, ui_rx).map_err(AppError::from)
    } else {
        if !config.batch {
            for line in banner_lines(&config) {
                println!("{line}");
            }
        }
        shutdown.wait();
        Ok(())
    };

    stop(&core, responder);
    result
}

fn stop(core: &CoordinationCore, responder: JoinHandle<()>) {
    core.shutdown();
    if responder.join().is_err() {
        warn!("Clipboard responder panicked");
    }
    info!("Stopped");
}
