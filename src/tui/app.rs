use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::board::columns::ColumnEditor;
use crate::board::drag::{Autoscroll, DragEngine, Point};
use crate::board::{Board, DropPosition, Notice, SortMode};
use crate::io::config_io;
use crate::model::ColumnId;
use crate::remote::{HttpRemote, Remote};

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Dashboard,
}

/// The column editor popup's working state
pub struct EditorState {
    pub editor: ColumnEditor,
    /// Cursor index into the working columns
    pub cursor: usize,
}

/// One lane's screen geometry from the last render, for mouse hit-testing
#[derive(Debug, Clone)]
pub struct LaneLayout {
    pub column: ColumnId,
    pub area: Rect,
    /// Card rects in display order, absolute coordinates
    pub cards: Vec<(String, Rect)>,
}

/// Screen geometry of the board view, rebuilt every frame
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    pub container: Rect,
    pub lanes: Vec<LaneLayout>,
}

impl BoardLayout {
    fn contains(area: Rect, x: u16, y: u16) -> bool {
        x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
    }

    pub fn lane_at(&self, x: u16, y: u16) -> Option<&LaneLayout> {
        self.lanes.iter().find(|l| Self::contains(l.area, x, y))
    }

    /// The card under the pointer, with its lane.
    pub fn card_at(&self, x: u16, y: u16) -> Option<(&LaneLayout, &str, Rect)> {
        let lane = self.lane_at(x, y)?;
        lane.cards
            .iter()
            .find(|(_, rect)| Self::contains(*rect, x, y))
            .map(|(id, rect)| (lane, id.as_str(), *rect))
    }

    /// Resolve a pointer release to a drop target: over a card means insert
    /// at that card's position, below the cards means append.
    pub fn drop_at(&self, x: u16, y: u16) -> Option<(ColumnId, DropPosition)> {
        let lane = self.lane_at(x, y)?;
        for (idx, (_, rect)) in lane.cards.iter().enumerate() {
            if y < rect.y + rect.height {
                return Some((lane.column.clone(), DropPosition::At(idx)));
            }
        }
        Some((lane.column.clone(), DropPosition::Append))
    }
}

/// Main application state
pub struct App {
    pub board: Board,
    pub remote: Box<dyn Remote>,
    pub view: View,
    pub sort: SortMode,
    pub drag: DragEngine,
    pub editor: Option<EditorState>,
    pub layout: BoardLayout,
    /// Horizontal scroll offset of the lane container, in cells
    pub scroll_x: u16,
    /// Last pointer position while a drag is live
    pub pointer: Point,
    /// Most recent notice, shown in the status row
    pub notice: Option<String>,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: Board, remote: Box<dyn Remote>) -> App {
        let mut drag = DragEngine::new();
        // Pointer coordinates are terminal cells here, not pixels; scale the
        // edge autoscroll down accordingly.
        drag.autoscroll = Autoscroll {
            threshold: 8,
            step: 2,
        };
        App {
            board,
            remote,
            view: View::Board,
            sort: SortMode::Off,
            drag,
            editor: None,
            layout: BoardLayout::default(),
            scroll_x: 0,
            pointer: Point::default(),
            notice: None,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    pub fn selected_project(&self) -> Option<String> {
        self.board.selected.clone()
    }

    /// Move selection to the next/previous project, lazily loading its tasks.
    pub fn cycle_project(&mut self, step: isize) {
        if self.board.projects.is_empty() {
            return;
        }
        let len = self.board.projects.len() as isize;
        let current = self
            .board
            .selected
            .as_ref()
            .and_then(|id| self.board.projects.iter().position(|p| &p.id == id))
            .map_or(0, |i| i as isize);
        let next = (current + step).rem_euclid(len) as usize;
        let id = self.board.projects[next].id.clone();
        if let Err(err) = self.board.select_project(self.remote.as_ref(), &id) {
            self.notice = Some(format!("cannot load tasks: {err}"));
        }
        self.scroll_x = 0;
    }

    /// Drain board notices into the status row.
    pub fn absorb_notices(&mut self) {
        for notice in self.board.poll_notices() {
            match notice {
                Notice::RemoteFailed(msg) => self.notice = Some(msg),
                Notice::Info(msg) => self.notice = Some(msg),
                Notice::TasksChanged(_) | Notice::ColumnsChanged(_) => {}
            }
        }
    }
}

/// Entry point: load config, connect, and run the terminal UI.
pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config(config_path)?;
    let remote = HttpRemote::new(config.api_url, config.token);

    let mut board = Board::new();
    board.load_projects(&remote)?;
    if let Some(first) = board.projects.first().map(|p| p.id.clone()) {
        board.select_project(&remote, &first)?;
    }

    let mut app = App::new(board, Box::new(remote));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse);
                }
                _ => {}
            }
        }

        app.absorb_notices();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
