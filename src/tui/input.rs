use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::board::columns::{ColumnEditor, SaveOutcome};
use crate::board::drag::Point;

use super::app::{App, EditorState, View};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.editor.is_some() {
        handle_editor_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => {
            app.view = match app.view {
                View::Board => View::Dashboard,
                View::Dashboard => View::Board,
            };
        }
        KeyCode::Char('s') => {
            app.sort = app.sort.next();
        }
        KeyCode::Char(']') => app.cycle_project(1),
        KeyCode::Char('[') => app.cycle_project(-1),
        KeyCode::Char('e') => {
            if let Some(project) = app.selected_project()
                && let Some(editor) = ColumnEditor::open(&app.board, &project)
            {
                app.editor = Some(EditorState { editor, cursor: 0 });
            }
        }
        KeyCode::Left => app.scroll_x = app.scroll_x.saturating_sub(4),
        KeyCode::Right => app.scroll_x = app.scroll_x.saturating_add(4),
        _ => {}
    }
}

/// Keys while the column editor popup is open. Typing edits the cursored
/// column's title in place on the working copy.
fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let Some(state) = app.editor.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            // Working copy discarded, nothing was committed.
            app.editor = None;
        }
        KeyCode::Up => state.cursor = state.cursor.saturating_sub(1),
        KeyCode::Down => {
            if state.cursor + 1 < state.editor.columns().len() {
                state.cursor += 1;
            }
        }
        KeyCode::Char('+') => {
            state.editor.add_column();
            state.cursor = state.editor.columns().len() - 1;
        }
        KeyCode::Delete => {
            // Guarded: floor and terminal columns survive this silently.
            state.editor.delete_column(state.cursor);
            if state.cursor >= state.editor.columns().len() {
                state.cursor = state.editor.columns().len().saturating_sub(1);
            }
        }
        KeyCode::PageUp => {
            if state.editor.move_up(state.cursor) {
                state.cursor -= 1;
            }
        }
        KeyCode::PageDown => {
            if state.editor.move_down(state.cursor) {
                state.cursor += 1;
            }
        }
        KeyCode::Backspace => {
            let title = current_title(state);
            let mut chars = title.chars().collect::<Vec<_>>();
            chars.pop();
            let title: String = chars.into_iter().collect();
            state.editor.rename(state.cursor, title);
        }
        KeyCode::Char(c) => {
            let mut title = current_title(state);
            title.push(c);
            state.editor.rename(state.cursor, title);
        }
        KeyCode::Enter => {
            // The one blocking operation: the editor is consumed and the
            // board rebuilt from server-confirmed state, or left untouched.
            let Some(state) = app.editor.take() else {
                return;
            };
            match state.editor.save(&mut app.board, app.remote.as_ref()) {
                Ok(SaveOutcome::Saved) => app.notice = Some("project updated".into()),
                Ok(SaveOutcome::Rejected) => {
                    app.notice = Some("column titles cannot be empty".into());
                }
                Err(_) => {
                    // The failure notice arrives through the board channel.
                }
            }
        }
        _ => {}
    }
}

fn current_title(state: &EditorState) -> String {
    state
        .editor
        .columns()
        .get(state.cursor)
        .map(|c| c.title.clone())
        .unwrap_or_default()
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.view != View::Board || app.editor.is_some() {
        return;
    }
    let Some(project) = app.selected_project() else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((lane, task_id, card)) = app.layout.card_at(mouse.column, mouse.row) {
                let source = Some(lane.column.clone());
                if let Some(task) = app.board.store.task(&project, task_id) {
                    let pointer = Point::new(mouse.column as i32, mouse.row as i32);
                    let origin = Point::new(card.x as i32, card.y as i32);
                    app.drag.start(task, source, pointer, origin);
                    app.pointer = pointer;
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.drag.is_dragging() {
                app.pointer = Point::new(mouse.column as i32, mouse.row as i32);
                let container = app.layout.container;
                let bounds = crate::board::drag::Bounds {
                    left: container.x as i32,
                    top: container.y as i32,
                    right: (container.x + container.width) as i32,
                    bottom: (container.y + container.height) as i32,
                };
                let delta = app.drag.autoscroll.delta(bounds, app.pointer);
                if delta.dx > 0 {
                    app.scroll_x = app.scroll_x.saturating_add(delta.dx as u16);
                } else if delta.dx < 0 {
                    app.scroll_x = app.scroll_x.saturating_sub((-delta.dx) as u16);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.drag.is_dragging() {
                match app.layout.drop_at(mouse.column, mouse.row) {
                    Some((target, pos)) => {
                        if let Some(cmd) = app.drag.drop(target, pos) {
                            app.board.drop_task(app.remote.as_ref(), &project, cmd);
                        }
                    }
                    // Released outside any drop target: session discarded,
                    // store untouched, proxy snaps back on the next frame.
                    None => app.drag.cancel(),
                }
            }
        }
        MouseEventKind::ScrollRight => app.scroll_x = app.scroll_x.saturating_add(2),
        MouseEventKind::ScrollLeft => app.scroll_x = app.scroll_x.saturating_sub(2),
        _ => {}
    }
}
