use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::super::app::{App, EditorState};
use super::truncate_to_width;

/// Render the column editor as a centered popup over the board.
pub fn render_editor(frame: &mut Frame, app: &App, state: &EditorState, area: Rect) {
    let popup = centered(area, 44, (state.editor.columns().len() as u16 + 6).min(area.height));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(" columns ")
        .title_style(Style::default().fg(app.theme.text_bright));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    for (i, col) in state.editor.columns().iter().enumerate() {
        let selected = i == state.cursor;
        let marker = if selected { "> " } else { "  " };
        let title = if col.title.is_empty() {
            Span::styled("(untitled)", Style::default().fg(app.theme.dim))
        } else {
            Span::raw(truncate_to_width(
                &col.title,
                (inner.width as usize).saturating_sub(8),
            ))
        };
        let mut spans = vec![Span::raw(marker), title];
        if col.terminal {
            spans.push(Span::styled(
                "  [done]",
                Style::default().fg(app.theme.green),
            ));
        }
        if col.id.is_draft() {
            spans.push(Span::styled("  *", Style::default().fg(app.theme.yellow)));
        }
        let style = if selected {
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(spans).style(style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "+ add  Del delete  PgUp/PgDn move  Enter save  Esc cancel",
        Style::default().fg(app.theme.dim),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}


