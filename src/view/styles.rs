//! Colors of the live log.

use ratatui::style::{Color, Style};

/// Whether colors are enabled.
///
/// Disabled when `NO_COLOR` is set (any value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR`.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Styles of the header bands and the selected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Title band.
    pub title: Style,
    /// Arguments and statistics bands.
    pub info: Style,
    /// Selected log row.
    pub selected: Style,
    /// Other log rows.
    pub row: Style,
}

impl Palette {
    /// Palette for the given color setting.
    ///
    /// Without colors the bands and the selection fall back to reverse video
    /// so they stay distinguishable.
    pub fn new(colors: ColorConfig) -> Self {
        if colors.colors_enabled() {
            Self {
                title: Style::default().bg(Color::Blue).fg(Color::White),
                info: Style::default().bg(Color::Green).fg(Color::White),
                selected: Style::default().bg(Color::White).fg(Color::Black),
                row: Style::default(),
            }
        } else {
            let reversed = Style::default().add_modifier(ratatui::style::Modifier::REVERSED);
            Self {
                title: reversed,
                info: reversed,
                selected: reversed,
                row: Style::default(),
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::from_env())
    }
}
