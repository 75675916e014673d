use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::board::sorted_view;
use crate::model::Task;

use super::super::app::{App, BoardLayout, LaneLayout};
use super::truncate_to_width;

/// Lane width in cells, including borders
const LANE_WIDTH: u16 = 32;
/// Card height in cells, including borders
const CARD_HEIGHT: u16 = 4;

/// Render the lane-per-column board and rebuild the hit-test layout.
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(project) = app.selected_project() else {
        let msg = Paragraph::new("No project selected.")
            .style(Style::default().fg(app.theme.dim));
        frame.render_widget(msg, area);
        return;
    };

    let mut layout = BoardLayout {
        container: area,
        lanes: Vec::new(),
    };

    let registry = app.board.registry(&project).unwrap_or(&[]).to_vec();
    let today = Local::now().date_naive();

    for (i, col) in registry.iter().enumerate() {
        // Lanes scroll horizontally as one container.
        let lane_x = area.x as i32 + i as i32 * (LANE_WIDTH as i32 + 1) - app.scroll_x as i32;
        if lane_x + LANE_WIDTH as i32 <= area.x as i32
            || lane_x >= (area.x + area.width) as i32
        {
            continue;
        }
        let lane_x = lane_x.max(area.x as i32) as u16;
        let width = LANE_WIDTH.min(area.x + area.width - lane_x);
        let lane_area = Rect::new(lane_x, area.y, width, area.height);

        let tasks = app.board.store.tasks_in(&project, &col.id);
        let view = sorted_view(&tasks, app.sort);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.lane_border))
            .title(format!(" {} ({}) ", col.title, col.count))
            .title_style(Style::default().fg(app.theme.dim));
        let inner = block.inner(lane_area);
        frame.render_widget(block, lane_area);

        let mut lane_layout = LaneLayout {
            column: col.id.clone(),
            area: lane_area,
            cards: Vec::new(),
        };

        let dragging_id = app.drag.session().map(|s| s.task.id.clone());
        let mut y = inner.y;
        for &task in &view {
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            // The lifted card stays in layout (its slot is its resting
            // position) but renders dimmed beneath the proxy.
            let lifted = dragging_id.as_deref() == Some(task.id.as_str());
            render_card(frame, app, task, card_area, today, lifted);
            lane_layout.cards.push((task.id.clone(), card_area));
            y += CARD_HEIGHT;
        }

        layout.lanes.push(lane_layout);
    }

    app.layout = layout;

    // Drag proxy renders last, above every lane.
    render_drag_proxy(frame, app, area);
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    task: &Task,
    area: Rect,
    today: chrono::NaiveDate,
    lifted: bool,
) {
    let border = if lifted {
        Style::default().fg(app.theme.dim)
    } else {
        Style::default().fg(app.theme.card_border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_style = if lifted {
        Style::default().fg(app.theme.dim)
    } else {
        Style::default().fg(app.theme.text_bright)
    };
    let title = truncate_to_width(&task.title, inner.width as usize);
    let progress = format!(
        "{}/{}",
        task.completed_milestones.len(),
        task.milestones.len()
    );
    let date = match task.assigned_date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => String::new(),
    };
    let date_style = if task.is_overdue(today) {
        Style::default().fg(app.theme.red)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let meta = Line::from(vec![
        Span::styled(progress, Style::default().fg(app.theme.green)),
        Span::raw("  "),
        Span::styled(date, date_style),
    ]);

    let lines = vec![Line::styled(title, text_style), meta];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// The visual stand-in for the dragged card, following the pointer with the
/// grab offset recorded at drag start.
fn render_drag_proxy(frame: &mut Frame, app: &App, container: Rect) {
    let Some(session) = app.drag.session() else {
        return;
    };
    let Some(origin) = app.drag.proxy_origin(app.pointer) else {
        return;
    };

    let width = LANE_WIDTH.saturating_sub(2);
    let max_x = (container.x + container.width).saturating_sub(width) as i32;
    let max_y = (container.y + container.height).saturating_sub(CARD_HEIGHT) as i32;
    let x = origin.x.min(max_x).max(container.x as i32) as u16;
    let y = origin.y.min(max_y).max(container.y as i32) as u16;
    let area = Rect::new(x, y, width, CARD_HEIGHT);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(
            Style::default()
                .fg(app.theme.drag_border)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = truncate_to_width(&session.task.title, inner.width as usize);
    let lines = vec![Line::styled(
        title,
        Style::default().fg(app.theme.text_bright),
    )];
    frame.render_widget(Paragraph::new(lines), inner);
}


