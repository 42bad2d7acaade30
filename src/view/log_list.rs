//! Log area: one row per visible entry, newest at the bottom.

use super::styles::Palette;
use crate::state::CaptureSnapshot;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Row text: `[<index+1>]: <text>` with control characters shown as spaces.
pub fn format_row(index: usize, text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    format!("[{}]: {}", index + 1, flattened)
}

/// Draw the snapshot's rows into `area`, top-aligned.
pub fn render_log(frame: &mut Frame, area: Rect, snapshot: &CaptureSnapshot, palette: &Palette) {
    for (offset, row) in snapshot.rows.iter().enumerate() {
        let Ok(dy) = u16::try_from(offset) else {
            break;
        };
        if dy >= area.height {
            break;
        }
        let style = if row.selected {
            palette.selected
        } else {
            palette.row
        };
        let line_area = Rect::new(area.x, area.y + dy, area.width, 1);
        frame.render_widget(
            Paragraph::new(format_row(row.index, &row.text)).style(style),
            line_area,
        );
    }
}
