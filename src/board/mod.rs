pub mod columns;
pub mod drag;
pub mod sort;
pub mod stats;
pub mod store;

pub use columns::{ColumnEditor, SaveOutcome};
pub use drag::{Autoscroll, DragEngine, DropCommand};
pub use sort::{SortMode, sorted_view};
pub use stats::{DashboardStats, dashboard_stats};
pub use store::{DropPosition, TaskStore};

use std::sync::mpsc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{Column, ColumnId, Project, Task, TaskPatch};
use crate::remote::Remote;

/// A change notification posted by the board. The UI drains these each tick;
/// there is no ambient reactivity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TasksChanged(String),
    ColumnsChanged(String),
    /// A remote call was rejected. Local state is already committed for
    /// optimistic operations and is not rolled back.
    RemoteFailed(String),
    Info(String),
}

/// Fields collected by the add-task form.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub note: String,
    pub milestones: Vec<String>,
    pub assigned_date: Option<NaiveDate>,
    pub status: ColumnId,
}

impl NewTask {
    /// Submission-time validation: every field is required. A failure aborts
    /// the submit silently, with no store mutation and no remote call.
    fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.note.trim().is_empty()
            && self.milestones.iter().any(|m| !m.trim().is_empty())
            && self.assigned_date.is_some()
    }
}

/// The board coordinator: exclusive owner of the task store and every
/// project's column registry. The drag engine, column editor, and read-only
/// views all borrow from here; mutation handlers run to completion one event
/// at a time.
///
/// Every operation except a column save is optimistic: local state commits
/// first, then the remote call is issued, and a rejection only raises a
/// notice.
pub struct Board {
    pub store: TaskStore,
    pub projects: Vec<Project>,
    pub selected: Option<String>,
    notices_tx: mpsc::Sender<Notice>,
    notices_rx: mpsc::Receiver<Notice>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    pub fn new() -> Board {
        let (notices_tx, notices_rx) = mpsc::channel();
        Board {
            store: TaskStore::new(),
            projects: Vec::new(),
            selected: None,
            notices_tx,
            notices_rx,
        }
    }

    /// Drain pending notices. Called once per UI tick.
    pub fn poll_notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.notices_rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    pub(crate) fn notify(&self, notice: Notice) {
        let _ = self.notices_tx.send(notice);
    }

    // --- Projects and registries ---

    /// Fetch the project listing (with embedded columns) from the remote.
    pub fn load_projects(&mut self, remote: &dyn Remote) -> Result<(), crate::remote::RemoteError> {
        self.projects = remote.list_projects()?;
        Ok(())
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// A project's column registry, in display order.
    pub fn registry(&self, project: &str) -> Option<&[Column]> {
        self.project(project).map(|p| p.columns.as_slice())
    }

    pub(crate) fn replace_registry(&mut self, project: &str, columns: Vec<Column>) {
        if let Some(p) = self.projects.iter_mut().find(|p| p.id == project) {
            p.columns = columns;
        }
    }

    /// Re-derive every cached column count from the task store. Runs after
    /// each mutation; the cached value is display-only.
    pub fn sync_counts(&mut self, project: &str) {
        let counts: Vec<usize> = match self.registry(project) {
            Some(registry) => registry
                .iter()
                .map(|c| self.store.column_count(project, &c.id))
                .collect(),
            None => return,
        };
        if let Some(p) = self.projects.iter_mut().find(|p| p.id == project) {
            for (col, count) in p.columns.iter_mut().zip(counts) {
                col.count = count;
            }
        }
    }

    /// Select a project, lazily loading its tasks on first selection.
    pub fn select_project(
        &mut self,
        remote: &dyn Remote,
        project: &str,
    ) -> Result<(), crate::remote::RemoteError> {
        self.selected = Some(project.to_string());
        if self.store.is_loaded(project) {
            return Ok(());
        }
        let tasks = remote.list_tasks(project)?;
        let registry = self.registry(project).unwrap_or(&[]).to_vec();
        self.store.rebuild_project(project, &registry, tasks);
        self.sync_counts(project);
        self.notify(Notice::TasksChanged(project.to_string()));
        Ok(())
    }

    // --- Task operations (optimistic) ---

    /// Create a task from the add form. Invalid input aborts silently.
    /// The task commits locally with a fresh id, then the create call is
    /// issued; a remote rejection keeps the local commit and raises a notice.
    pub fn create_task(&mut self, remote: &dyn Remote, project: &str, draft: NewTask) -> bool {
        if !draft.is_valid() {
            return false;
        }
        let mut task = Task::new(Uuid::new_v4().to_string(), draft.title, draft.status.clone());
        task.note = draft.note;
        task.milestones = draft.milestones;
        task.assigned_date = draft.assigned_date;

        if !self.store.insert_task(project, &draft.status, task.clone()) {
            return false;
        }
        self.sync_counts(project);
        self.notify(Notice::TasksChanged(project.to_string()));

        if let Err(err) = remote.create_task(project, &task) {
            self.notify(Notice::RemoteFailed(format!("cannot create task: {err}")));
        }
        true
    }

    /// Apply the edit form: merge the patch, and if `new_status` names a
    /// different column, move the task there (appended at the end). The
    /// terminal auto-complete rule applies to the move, as it does for any
    /// entry into a terminal column.
    pub fn edit_task(
        &mut self,
        remote: &dyn Remote,
        project: &str,
        column: &ColumnId,
        task_id: &str,
        patch: TaskPatch,
        new_status: ColumnId,
    ) -> bool {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return false;
        }
        if !self.store.update_task_fields(project, column, task_id, &patch) {
            return false;
        }
        if new_status != *column {
            let terminal = self.column_is_terminal(project, &new_status);
            self.store.move_task(
                project,
                task_id,
                column,
                &new_status,
                DropPosition::Append,
                terminal,
            );
        }
        self.sync_counts(project);
        self.notify(Notice::TasksChanged(project.to_string()));

        if let Some(task) = self.store.task(project, task_id)
            && let Err(err) = remote.update_task(task)
        {
            self.notify(Notice::RemoteFailed(format!("cannot update task: {err}")));
        }
        true
    }

    /// Delete a task. Local removal commits first; the remote delete follows.
    pub fn delete_task(
        &mut self,
        remote: &dyn Remote,
        project: &str,
        column: &ColumnId,
        task_id: &str,
    ) -> bool {
        if !self.store.remove_task(project, column, task_id) {
            return false;
        }
        self.sync_counts(project);
        self.notify(Notice::TasksChanged(project.to_string()));

        if let Err(err) = remote.delete_task(task_id) {
            self.notify(Notice::RemoteFailed(format!("cannot delete task: {err}")));
        }
        true
    }

    /// Commit a drag-drop. The store moves the task (auto-completing
    /// milestones when the target is terminal), then the status update is
    /// fired at the remote. A rejection does not roll the move back.
    pub fn drop_task(&mut self, remote: &dyn Remote, project: &str, cmd: DropCommand) -> bool {
        let terminal = self.column_is_terminal(project, &cmd.to);
        let moved = self
            .store
            .move_task(project, &cmd.task_id, &cmd.from, &cmd.to, cmd.pos, terminal);
        if !moved {
            return false;
        }
        self.sync_counts(project);
        self.notify(Notice::TasksChanged(project.to_string()));

        if let Err(err) = remote.update_status(project, &cmd.task_id, &cmd.to) {
            self.notify(Notice::RemoteFailed(format!("cannot update task: {err}")));
        }
        true
    }

    fn column_is_terminal(&self, project: &str, column: &ColumnId) -> bool {
        self.project(project)
            .and_then(|p| p.column(column))
            .is_some_and(|c| c.terminal)
    }
}
