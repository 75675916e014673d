use crate::model::{ColumnId, Task};

use super::store::DropPosition;

/// Distance from a container edge within which dragging triggers autoscroll.
pub const EDGE_THRESHOLD: i32 = 100;
/// How far the container scrolls per move event near an edge.
pub const SCROLL_STEP: i32 = 10;

/// The column key used when a dragged task has no resolvable source status.
/// Nothing guarantees a project actually has a column with this id; a drop
/// resolved against it lands on the store's existence check and no-ops.
pub const FALLBACK_STATUS_KEY: &str = "todo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

/// A container's bounds in the same coordinate space as pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollDelta {
    pub dx: i32,
    pub dy: i32,
}

/// Edge-driven autoscroll. Continuous: applied once per move event, with no
/// timer, so scroll speed follows event frequency.
#[derive(Debug, Clone, Copy)]
pub struct Autoscroll {
    pub threshold: i32,
    pub step: i32,
}

impl Default for Autoscroll {
    fn default() -> Self {
        Autoscroll {
            threshold: EDGE_THRESHOLD,
            step: SCROLL_STEP,
        }
    }
}

impl Autoscroll {
    /// How far the container should scroll for a pointer at `pointer`.
    pub fn delta(&self, container: Bounds, pointer: Point) -> ScrollDelta {
        let mut delta = ScrollDelta::default();
        if pointer.x > container.right - self.threshold {
            delta.dx += self.step;
        } else if pointer.x < container.left + self.threshold {
            delta.dx -= self.step;
        }
        if pointer.y < container.top + self.threshold {
            delta.dy -= self.step;
        }
        if pointer.y > container.bottom - self.threshold {
            delta.dy += self.step;
        }
        delta
    }
}

/// The transient record of a task being relocated. Alive only between
/// pointer-down on a card and its drop or cancellation.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Snapshot of the task taken at drag start.
    pub task: Task,
    /// The column the task was lifted from, when resolvable.
    pub source: Option<ColumnId>,
    /// Pointer offset within the card at grab time, so the proxy tracks the
    /// pointer without jumping.
    grab: Point,
}

/// The parameters of a committed drop, ready for `TaskStore::move_task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropCommand {
    pub task_id: String,
    pub from: ColumnId,
    pub to: ColumnId,
    pub pos: DropPosition,
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// The drag/drop state machine: `Idle → Dragging → {drop, cancel} → Idle`.
/// At most one session exists at a time; drag initiation is tied to a single
/// pointer's down/up lifecycle.
#[derive(Debug, Default)]
pub struct DragEngine {
    state: DragState,
    pub autoscroll: Autoscroll,
}

impl DragEngine {
    pub fn new() -> DragEngine {
        DragEngine::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Begin a drag: snapshot the task and its source column, and record the
    /// grab offset of the pointer relative to the card origin. Returns false
    /// if a session is already active.
    pub fn start(
        &mut self,
        task: &Task,
        source: Option<ColumnId>,
        pointer: Point,
        card_origin: Point,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging(DragSession {
            task: task.clone(),
            source,
            grab: Point::new(pointer.x - card_origin.x, pointer.y - card_origin.y),
        });
        true
    }

    /// Where the visual proxy's top-left corner sits for the given pointer.
    pub fn proxy_origin(&self, pointer: Point) -> Option<Point> {
        self.session()
            .map(|s| Point::new(pointer.x - s.grab.x, pointer.y - s.grab.y))
    }

    /// Commit the drag over a drop target. Consumes the session and yields
    /// the move parameters; the caller applies them to the store and fires
    /// the remote status update. A session without a resolvable source falls
    /// back to [`FALLBACK_STATUS_KEY`].
    pub fn drop(&mut self, target: ColumnId, pos: DropPosition) -> Option<DropCommand> {
        let state = std::mem::take(&mut self.state);
        match state {
            DragState::Dragging(session) => {
                let from = session
                    .source
                    .unwrap_or_else(|| ColumnId::committed(FALLBACK_STATUS_KEY));
                Some(DropCommand {
                    task_id: session.task.id,
                    from,
                    to: target,
                    pos,
                })
            }
            DragState::Idle => None,
        }
    }

    /// End the drag without a valid drop target. The session is discarded
    /// and the store is left untouched; the renderer resets the proxy to its
    /// resting layout.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task() -> Task {
        Task::new("t1", "First", ColumnId::committed("todo"))
    }

    fn container() -> Bounds {
        Bounds {
            left: 0,
            top: 0,
            right: 800,
            bottom: 600,
        }
    }

    #[test]
    fn test_start_drop_round_trip() {
        let mut engine = DragEngine::new();
        let started = engine.start(
            &task(),
            Some(ColumnId::committed("todo")),
            Point::new(110, 45),
            Point::new(100, 40),
        );
        assert!(started);
        assert!(engine.is_dragging());

        let cmd = engine
            .drop(ColumnId::committed("done"), DropPosition::Append)
            .unwrap();
        assert_eq!(cmd.task_id, "t1");
        assert_eq!(cmd.from, ColumnId::committed("todo"));
        assert_eq!(cmd.to, ColumnId::committed("done"));
        assert_eq!(cmd.pos, DropPosition::Append);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_only_one_session_at_a_time() {
        let mut engine = DragEngine::new();
        assert!(engine.start(&task(), None, Point::default(), Point::default()));
        assert!(!engine.start(&task(), None, Point::default(), Point::default()));
    }

    #[test]
    fn test_cancel_discards_session() {
        let mut engine = DragEngine::new();
        engine.start(&task(), None, Point::default(), Point::default());
        engine.cancel();
        assert!(!engine.is_dragging());
        assert!(
            engine
                .drop(ColumnId::committed("done"), DropPosition::Append)
                .is_none()
        );
    }

    #[test]
    fn test_proxy_tracks_grab_offset() {
        let mut engine = DragEngine::new();
        engine.start(
            &task(),
            None,
            Point::new(110, 45),
            Point::new(100, 40),
        );
        assert_eq!(
            engine.proxy_origin(Point::new(300, 200)),
            Some(Point::new(290, 195))
        );
    }

    #[test]
    fn test_unresolved_source_falls_back() {
        let mut engine = DragEngine::new();
        engine.start(&task(), None, Point::default(), Point::default());
        let cmd = engine
            .drop(ColumnId::committed("done"), DropPosition::At(0))
            .unwrap();
        assert_eq!(cmd.from, ColumnId::committed(FALLBACK_STATUS_KEY));
    }

    #[test]
    fn test_autoscroll_idle_in_the_middle() {
        let scroll = Autoscroll::default();
        assert_eq!(
            scroll.delta(container(), Point::new(400, 300)),
            ScrollDelta::default()
        );
    }

    #[test]
    fn test_autoscroll_edges() {
        let scroll = Autoscroll::default();
        assert_eq!(
            scroll.delta(container(), Point::new(750, 300)),
            ScrollDelta { dx: 10, dy: 0 }
        );
        assert_eq!(
            scroll.delta(container(), Point::new(50, 300)),
            ScrollDelta { dx: -10, dy: 0 }
        );
        assert_eq!(
            scroll.delta(container(), Point::new(400, 50)),
            ScrollDelta { dx: 0, dy: -10 }
        );
        assert_eq!(
            scroll.delta(container(), Point::new(400, 550)),
            ScrollDelta { dx: 0, dy: 10 }
        );
        // Corner: both axes scroll on the same event.
        assert_eq!(
            scroll.delta(container(), Point::new(750, 550)),
            ScrollDelta { dx: 10, dy: 10 }
        );
    }
}
