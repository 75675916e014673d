use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::board::SortMode;

use super::super::app::{App, View};

/// Top row: project name, active view, sort mode.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let project = app
        .selected_project()
        .and_then(|id| app.board.project(&id).map(|p| p.name.clone()))
        .unwrap_or_else(|| "no project".to_string());

    let view = match app.view {
        View::Board => "board",
        View::Dashboard => "dashboard",
    };

    let mut spans = vec![
        Span::styled(
            format!(" {project} "),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{view}]"), Style::default().fg(app.theme.highlight)),
    ];
    if app.sort != SortMode::Off {
        spans.push(Span::styled(
            format!("  sort: {}", app.sort.label()),
            Style::default().fg(app.theme.yellow),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background)),
        area,
    );
}

/// Bottom row: latest notice on the left, key hints on the right.
pub fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let hints = "q quit  Tab project  s sort  ] view  e columns";
    let notice = app.notice.as_deref().unwrap_or("");

    let pad = (area.width as usize)
        .saturating_sub(notice.len() + hints.len() + 2)
        .max(1);
    let line = Line::from(vec![
        Span::styled(format!(" {notice}"), Style::default().fg(app.theme.yellow)),
        Span::raw(" ".repeat(pad)),
        Span::styled(hints, Style::default().fg(app.theme.dim)),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.background)),
        area,
    );
}


