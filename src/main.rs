//! autocopy - Entry Point

use autocopy::config::{CliOverrides, ModifierRequirement};
use autocopy::model::AppError;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Copy the selection on mouse gestures and keep a live log of captures.
///
/// Exit: press Ctrl+C in the terminal.
#[derive(Parser, Debug)]
#[command(name = "autocopy")]
#[command(version)]
#[command(allow_negative_numbers = true, args_override_self = true)]
pub struct Args {
    /// Print each copied text to the console
    #[arg(long)]
    pub showtext: bool,

    /// Copy after a single click (default)
    #[arg(long = "1click", overrides_with_all = ["two_click", "three_click"])]
    pub one_click: bool,

    /// Copy after a double click
    #[arg(long = "2click", overrides_with_all = ["one_click", "three_click"])]
    pub two_click: bool,

    /// Copy after a triple click
    #[arg(long = "3click", overrides_with_all = ["one_click", "two_click"])]
    pub three_click: bool,

    /// Only copy while Alt is held
    #[arg(long, overrides_with = "ctrl")]
    pub alt: bool,

    /// Only copy while Ctrl is held
    #[arg(long, overrides_with = "alt")]
    pub ctrl: bool,

    /// Always copy on Ctrl + single click
    #[arg(long)]
    pub ctrl1: bool,

    /// Always copy on Ctrl + double click
    #[arg(long)]
    pub ctrl2: bool,

    /// Show the live, scrollable capture log
    ///
    /// Up/Down or k/j select, u/d scroll, End or G jumps to the newest entry,
    /// Ctrl+Enter or y copies the selected entry back to the clipboard, q quits.
    #[arg(long)]
    pub tui: bool,

    /// Append every copied text to FILE
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Entries kept in memory for the live log (10-100000, default 200)
    #[arg(long, value_name = "N")]
    pub logbuffer: Option<i64>,

    /// Bytes stored per entry (256-1048576, default 4096)
    #[arg(long, value_name = "M")]
    pub linesize: Option<i64>,

    /// Minimum milliseconds between clicks of one gesture (default 0)
    #[arg(long, value_name = "MS")]
    pub mintime: Option<i64>,

    /// Maximum milliseconds between clicks of one gesture (default 500)
    #[arg(long, value_name = "MS")]
    pub maxtime: Option<i64>,

    /// No console output
    #[arg(short, long)]
    pub batch: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// The command-line layer of the configuration precedence chain.
    pub fn overrides(&self) -> CliOverrides {
        // Mutually overriding flags leave at most one of each group set.
        let required_clicks = if self.three_click {
            Some(3)
        } else if self.two_click {
            Some(2)
        } else if self.one_click {
            Some(1)
        } else {
            None
        };
        let modifier = if self.alt {
            Some(ModifierRequirement::Alt)
        } else if self.ctrl {
            Some(ModifierRequirement::Ctrl)
        } else {
            None
        };

        CliOverrides {
            required_clicks,
            modifier,
            allow_ctrl1: self.ctrl1,
            allow_ctrl2: self.ctrl2,
            tui: self.tui,
            show_text: self.showtext,
            batch: self.batch,
            capture_log: self.log.clone(),
            max_lines: self.logbuffer,
            max_line_bytes: self.linesize,
            min_inter_click_ms: self.mintime,
            max_inter_click_ms: self.maxtime,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = autocopy::config::load_config_with_precedence(args.config.clone())?;
        let merged = autocopy::config::merge_config(config_file);
        let with_env = autocopy::config::apply_env_overrides(merged);
        autocopy::config::apply_cli_overrides(with_env, &args.overrides())
    };

    // Diagnostics are optional; the guard flushes the file writer on exit.
    let _log_guard = autocopy::logging::init_or_warn(&config.diagnostics_log);

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    autocopy::integration::run(config, raw_args)
}
