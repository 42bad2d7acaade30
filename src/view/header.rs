//! Three-band header: title, arguments, statistics.

use super::constants::START_TIME_FORMAT;
use super::styles::Palette;
use crate::model::Statistics;
use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Static header content fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    title: String,
    arguments: String,
}

impl HeaderInfo {
    /// Header for a run started at `started` with command-line `args`
    /// (program name excluded).
    pub fn new(started: DateTime<Local>, args: &[String]) -> Self {
        Self {
            title: format!(
                " autocopy v{} | Started: {} (CTRL-C to stop)",
                env!("CARGO_PKG_VERSION"),
                started.format(START_TIME_FORMAT)
            ),
            arguments: format!(" Arguments: {}", args.join(" ")),
        }
    }

    /// Title band text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Arguments band text.
    pub fn arguments(&self) -> &str {
        &self.arguments
    }
}

/// Statistics band text.
pub fn stats_line(stats: &Statistics) -> String {
    format!(
        " Copied: {} | Total Chars: {} | Avg Len: {:.2}",
        stats.total_captures,
        stats.total_chars,
        stats.average_len()
    )
}

/// Draw the header into `area` (three rows).
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    info: &HeaderInfo,
    stats: &Statistics,
    palette: &Palette,
) {
    let [title, arguments, statistics] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(info.title()).style(palette.title), title);
    frame.render_widget(
        Paragraph::new(info.arguments()).style(palette.info),
        arguments,
    );
    frame.render_widget(
        Paragraph::new(stats_line(stats)).style(palette.info),
        statistics,
    );
}
