pub mod board_view;
pub mod dashboard_view;
pub mod editor_popup;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, View};

/// Top-level render dispatch.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    status_row::render_header(frame, app, chunks[0]);

    match app.view {
        View::Board => board_view::render_board(frame, app, chunks[1]),
        View::Dashboard => dashboard_view::render_dashboard(frame, app, chunks[1]),
    }

    // Column editor popup, on top of the content
    if let Some(state) = &app.editor {
        editor_popup::render_editor(frame, app, state, chunks[1]);
    }

    status_row::render_status(frame, app, chunks[2]);
}

/// Truncate to a display width, appending an ellipsis when cut.
pub(super) fn truncate_to_width(text: &str, max: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max {
        return text.to_string();
    }
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::truncate_to_width;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_to_width("one char too long", 10), "one char …");
    }
}


