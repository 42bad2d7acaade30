//! Configuration file loading with precedence handling.
//!
//! Defaults → config file → environment → CLI flags (highest).
//! Numeric values are clamped into their supported ranges rather than
//! rejected.

use crate::state::{platform_double_click_ms, GestureConfig};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "AUTOCOPY_CONFIG";

/// Environment variable naming the capture log file.
pub const CAPTURE_LOG_ENV_VAR: &str = "AUTOCOPY_CAPTURE_LOG";

/// Smallest accepted log capacity.
pub const MIN_MAX_LINES: usize = 10;
/// Largest accepted log capacity.
pub const MAX_MAX_LINES: usize = 100_000;
/// Default log capacity.
pub const DEFAULT_MAX_LINES: usize = 200;

/// Smallest accepted per-entry byte cap.
pub const MIN_LINE_BYTES: usize = 256;
/// Largest accepted per-entry byte cap.
pub const MAX_LINE_BYTES: usize = 1_048_576;
/// Default per-entry byte cap.
pub const DEFAULT_LINE_BYTES: usize = 4096;

/// Default settle time after the gesture, in ms.
pub const DEFAULT_CLICK_SETTLE_MS: u64 = 200;
/// Default settle time after the copy chord, in ms.
pub const DEFAULT_COPY_SETTLE_MS: u64 = 100;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// Every field is optional. Corresponds to `~/.config/autocopy/config.toml`.
/// Integers are signed so out-of-range values clamp instead of failing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Clicks completing the primary gesture (1-3).
    #[serde(default)]
    pub required_clicks: Option<i64>,

    /// Primary gesture requires Alt.
    #[serde(default)]
    pub require_alt: Option<bool>,

    /// Primary gesture requires Ctrl.
    #[serde(default)]
    pub require_ctrl: Option<bool>,

    /// Ctrl + single click always triggers.
    #[serde(default)]
    pub allow_ctrl1: Option<bool>,

    /// Ctrl + double click always triggers.
    #[serde(default)]
    pub allow_ctrl2: Option<bool>,

    /// Lower bound of the timing window.
    #[serde(default)]
    pub min_inter_click_ms: Option<i64>,

    /// Upper bound of the timing window.
    #[serde(default)]
    pub max_inter_click_ms: Option<i64>,

    /// Log capacity in entries.
    #[serde(default)]
    pub max_lines: Option<i64>,

    /// Per-entry byte cap.
    #[serde(default)]
    pub max_line_bytes: Option<i64>,

    /// Echo captures to stdout.
    #[serde(default)]
    pub show_text: Option<bool>,

    /// Capture log file.
    #[serde(default)]
    pub capture_log: Option<PathBuf>,

    /// Diagnostics (tracing) log file.
    #[serde(default)]
    pub diagnostics_log: Option<PathBuf>,

    /// Settle time after the gesture.
    #[serde(default)]
    pub click_settle_ms: Option<i64>,

    /// Settle time after the copy chord.
    #[serde(default)]
    pub copy_settle_ms: Option<i64>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Gesture rules.
    pub gesture: GestureConfig,
    /// Log capacity, within [`MIN_MAX_LINES`, `MAX_MAX_LINES`].
    pub max_lines: usize,
    /// Per-entry byte cap, within [`MIN_LINE_BYTES`, `MAX_LINE_BYTES`].
    pub max_line_bytes: usize,
    /// Echo captures to stdout.
    pub show_text: bool,
    /// Run the live terminal log.
    pub tui: bool,
    /// No console output.
    pub batch: bool,
    /// Capture log file, if any.
    pub capture_log: Option<PathBuf>,
    /// Diagnostics log file.
    pub diagnostics_log: PathBuf,
    /// Settle time after the gesture.
    pub click_settle_ms: u64,
    /// Settle time after the copy chord.
    pub copy_settle_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            max_lines: DEFAULT_MAX_LINES,
            max_line_bytes: DEFAULT_LINE_BYTES,
            show_text: false,
            tui: false,
            batch: false,
            capture_log: None,
            diagnostics_log: default_log_path(),
            click_settle_ms: DEFAULT_CLICK_SETTLE_MS,
            copy_settle_ms: DEFAULT_COPY_SETTLE_MS,
        }
    }
}

/// Modifier the primary gesture requires (`--alt` / `--ctrl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierRequirement {
    /// Alt must be held.
    Alt,
    /// Ctrl must be held.
    Ctrl,
}

/// Values given on the command line. `None`/`false` leaves lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--1click` / `--2click` / `--3click`.
    pub required_clicks: Option<i64>,
    /// `--alt` / `--ctrl`, whichever came last.
    pub modifier: Option<ModifierRequirement>,
    /// `--ctrl1`.
    pub allow_ctrl1: bool,
    /// `--ctrl2`.
    pub allow_ctrl2: bool,
    /// `--tui`.
    pub tui: bool,
    /// `--showtext`.
    pub show_text: bool,
    /// `-b` / `--batch`.
    pub batch: bool,
    /// `--log <file>`.
    pub capture_log: Option<PathBuf>,
    /// `--logbuffer N`.
    pub max_lines: Option<i64>,
    /// `--linesize M`.
    pub max_line_bytes: Option<i64>,
    /// `--mintime <ms>`.
    pub min_inter_click_ms: Option<i64>,
    /// `--maxtime <ms>`.
    pub max_inter_click_ms: Option<i64>,
}

/// Resolve default diagnostics log path.
///
/// `~/.local/state/autocopy/autocopy.log` on Linux; falls back to the current
/// directory where the platform has no state directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("autocopy").join("autocopy.log")
    } else {
        PathBuf::from("autocopy.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/autocopy/config.toml` on Unix, appropriate path on
/// other platforms. `None` if no config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("autocopy").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `AUTOCOPY_CONFIG` environment variable
/// 3. Default path `~/.config/autocopy/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let gesture = GestureConfig {
        required_clicks: config
            .required_clicks
            .map_or(defaults.gesture.required_clicks, clamp_required_clicks),
        require_alt: config.require_alt.unwrap_or(defaults.gesture.require_alt),
        require_ctrl: config.require_ctrl.unwrap_or(defaults.gesture.require_ctrl),
        allow_ctrl1: config.allow_ctrl1.unwrap_or(defaults.gesture.allow_ctrl1),
        allow_ctrl2: config.allow_ctrl2.unwrap_or(defaults.gesture.allow_ctrl2),
        min_inter_click_ms: config
            .min_inter_click_ms
            .map_or(defaults.gesture.min_inter_click_ms, non_negative_ms),
        max_inter_click_ms: config
            .max_inter_click_ms
            .map_or(platform_double_click_ms(), non_negative_ms),
    };

    ResolvedConfig {
        gesture,
        max_lines: config
            .max_lines
            .map_or(defaults.max_lines, clamp_max_lines),
        max_line_bytes: config
            .max_line_bytes
            .map_or(defaults.max_line_bytes, clamp_line_bytes),
        show_text: config.show_text.unwrap_or(defaults.show_text),
        tui: defaults.tui,
        batch: defaults.batch,
        capture_log: config.capture_log.or(defaults.capture_log),
        diagnostics_log: config.diagnostics_log.unwrap_or(defaults.diagnostics_log),
        click_settle_ms: config
            .click_settle_ms
            .map_or(defaults.click_settle_ms, non_negative_ms),
        copy_settle_ms: config
            .copy_settle_ms
            .map_or(defaults.copy_settle_ms, non_negative_ms),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `AUTOCOPY_CAPTURE_LOG`: capture log path (ignored when empty)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(CAPTURE_LOG_ENV_VAR) {
        if !path.is_empty() {
            config.capture_log = Some(PathBuf::from(path));
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually gave are applied.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    if let Some(clicks) = cli.required_clicks {
        config.gesture.required_clicks = clamp_required_clicks(clicks);
    }

    match cli.modifier {
        Some(ModifierRequirement::Alt) => {
            config.gesture.require_alt = true;
            config.gesture.require_ctrl = false;
        }
        Some(ModifierRequirement::Ctrl) => {
            config.gesture.require_ctrl = true;
            config.gesture.require_alt = false;
        }
        None => {}
    }

    config.gesture.allow_ctrl1 |= cli.allow_ctrl1;
    config.gesture.allow_ctrl2 |= cli.allow_ctrl2;
    config.tui |= cli.tui;
    config.show_text |= cli.show_text;
    config.batch |= cli.batch;

    if let Some(path) = &cli.capture_log {
        config.capture_log = Some(path.clone());
    }
    if let Some(lines) = cli.max_lines {
        config.max_lines = clamp_max_lines(lines);
    }
    if let Some(bytes) = cli.max_line_bytes {
        config.max_line_bytes = clamp_line_bytes(bytes);
    }
    if let Some(ms) = cli.min_inter_click_ms {
        config.gesture.min_inter_click_ms = non_negative_ms(ms);
    }
    if let Some(ms) = cli.max_inter_click_ms {
        config.gesture.max_inter_click_ms = non_negative_ms(ms);
    }

    config
}

/// Clamp a click count into 1..=3.
pub fn clamp_required_clicks(value: i64) -> u8 {
    value.clamp(1, 3) as u8
}

/// Clamp a log capacity into [`MIN_MAX_LINES`, `MAX_MAX_LINES`].
pub fn clamp_max_lines(value: i64) -> usize {
    value.clamp(MIN_MAX_LINES as i64, MAX_MAX_LINES as i64) as usize
}

/// Clamp a byte cap into [`MIN_LINE_BYTES`, `MAX_LINE_BYTES`].
pub fn clamp_line_bytes(value: i64) -> usize {
    value.clamp(MIN_LINE_BYTES as i64, MAX_LINE_BYTES as i64) as usize
}

/// Negative durations become zero.
pub fn non_negative_ms(value: i64) -> u64 {
    value.max(0) as u64
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
