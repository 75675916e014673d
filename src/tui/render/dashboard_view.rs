use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Paragraph};

use crate::board::{DashboardStats, dashboard_stats};

use super::super::app::App;

/// Render the aggregate dashboard for the selected project.
pub fn render_dashboard(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(project) = app.selected_project() else {
        let msg = Paragraph::new("No project selected.")
            .style(Style::default().fg(app.theme.dim));
        frame.render_widget(msg, area);
        return;
    };
    let Some(registry) = app.board.registry(&project) else {
        return;
    };

    let today = Local::now().date_naive();
    let stats = dashboard_stats(&app.board.store, registry, &project, today);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    render_counters(frame, app, &stats, rows[0]);
    render_completion(frame, app, &stats, rows[1]);
    render_column_chart(frame, app, &stats, rows[2]);
}

fn render_counters(frame: &mut Frame, app: &App, stats: &DashboardStats, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let boxes = [
        ("completed", stats.completed_tasks, app.theme.green),
        ("incomplete", stats.incomplete_tasks, app.theme.yellow),
        ("overdue", stats.overdue_tasks, app.theme.red),
        ("total", stats.total_tasks, app.theme.text_bright),
    ];
    for (cell, (label, value, color)) in cells.iter().zip(boxes) {
        render_counter(frame, app, label, value, color, *cell);
    }
}

fn render_counter(
    frame: &mut Frame,
    app: &App,
    label: &str,
    value: usize,
    color: Color,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.lane_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Line::styled(label.to_string(), Style::default().fg(app.theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        inner,
    );
}

fn render_completion(frame: &mut Frame, app: &App, stats: &DashboardStats, area: Rect) {
    let ratio = if stats.total_tasks == 0 {
        0.0
    } else {
        stats.completed_tasks as f64 / stats.total_tasks as f64
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.lane_border))
                .title(" completion ")
                .title_style(Style::default().fg(app.theme.dim)),
        )
        .gauge_style(Style::default().fg(app.theme.green).bg(app.theme.background))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}

fn render_column_chart(frame: &mut Frame, app: &App, stats: &DashboardStats, area: Rect) {
    let bars: Vec<Bar> = stats
        .columns
        .iter()
        .map(|(title, count)| {
            Bar::default()
                .label(Line::from(title.as_str()))
                .value(*count as u64)
                .style(Style::default().fg(app.theme.highlight))
                .value_style(
                    Style::default()
                        .fg(app.theme.background)
                        .bg(app.theme.highlight),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.lane_border))
                .title(" tasks per column ")
                .title_style(Style::default().fg(app.theme.dim)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2);
    frame.render_widget(chart, area);
}


