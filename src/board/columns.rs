use crate::model::{COLUMN_FLOOR, Column};
use crate::remote::{Remote, RemoteError};

use super::{Board, Notice};

/// Result of a column save attempt that reached a decision locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Validation rejected the working copy; no remote call was made.
    Rejected,
}

/// Edits a project's column registry on a working copy. Nothing is durable
/// until [`ColumnEditor::save`], the one operation in the system that is not
/// optimistic.
#[derive(Debug, Clone)]
pub struct ColumnEditor {
    project: String,
    working: Vec<Column>,
}

impl ColumnEditor {
    /// Clone the project's current registry into a working copy.
    pub fn open(board: &Board, project: &str) -> Option<ColumnEditor> {
        let registry = board.registry(project)?;
        Some(ColumnEditor {
            project: project.to_string(),
            working: registry.to_vec(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn columns(&self) -> &[Column] {
        &self.working
    }

    /// Append a blank column with a fresh draft id.
    pub fn add_column(&mut self) {
        self.working.push(Column::draft());
    }

    /// Remove the column at `index`. Guarded: a registry never shrinks below
    /// the floor, and terminal columns cannot be deleted. Violations are
    /// silent no-ops.
    pub fn delete_column(&mut self, index: usize) -> bool {
        if self.working.len() <= COLUMN_FLOOR {
            return false;
        }
        match self.working.get(index) {
            Some(col) if !col.terminal => {
                self.working.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Swap with the previous column; no-op at index 0.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.working.len() {
            return false;
        }
        self.working.swap(index - 1, index);
        true
    }

    /// Swap with the next column; no-op at the last index.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.working.len() {
            return false;
        }
        self.working.swap(index, index + 1);
        true
    }

    pub fn rename(&mut self, index: usize, title: impl Into<String>) {
        if let Some(col) = self.working.get_mut(index) {
            col.title = title.into();
        }
    }

    /// Persist the working registry. Blocks until the remote resolves.
    ///
    /// On success the project's task store is rebuilt from a fresh task
    /// fetch, keyed by the server-confirmed column ids: tasks of deleted
    /// columns are dropped, new columns get empty buckets, drafts pick up
    /// their server ids, and cached counts are recomputed. On any failure
    /// the working copy is discarded and no partial state is committed.
    pub fn save(self, board: &mut Board, remote: &dyn Remote) -> Result<SaveOutcome, RemoteError> {
        if self.working.iter().any(|c| c.title.trim().is_empty()) {
            return Ok(SaveOutcome::Rejected);
        }

        let confirmed = match remote.update_columns(&self.project, &self.working) {
            Ok(columns) => columns,
            Err(err) => {
                board.notify(Notice::RemoteFailed(format!("cannot update project: {err}")));
                return Err(err);
            }
        };
        let tasks = match remote.list_tasks(&self.project) {
            Ok(tasks) => tasks,
            Err(err) => {
                board.notify(Notice::RemoteFailed(format!("cannot reload tasks: {err}")));
                return Err(err);
            }
        };

        board.store.rebuild_project(&self.project, &confirmed, tasks);
        board.replace_registry(&self.project, confirmed);
        board.sync_counts(&self.project);
        board.notify(Notice::ColumnsChanged(self.project));
        Ok(SaveOutcome::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnId;

    fn column(id: &str, terminal: bool) -> Column {
        Column {
            id: ColumnId::committed(id),
            title: id.to_string(),
            terminal,
            count: 0,
        }
    }

    fn editor(columns: Vec<Column>) -> ColumnEditor {
        ColumnEditor {
            project: "p1".into(),
            working: columns,
        }
    }

    fn floor_registry() -> Vec<Column> {
        vec![
            column("todo", false),
            column("doing", false),
            column("done", true),
        ]
    }

    #[test]
    fn test_add_column_is_blank_draft() {
        let mut ed = editor(floor_registry());
        ed.add_column();
        let added = ed.columns().last().unwrap();
        assert!(added.id.is_draft());
        assert!(added.title.is_empty());
        assert!(!added.terminal);
        assert_eq!(added.count, 0);
    }

    #[test]
    fn test_delete_at_floor_is_noop_on_every_index() {
        let mut ed = editor(floor_registry());
        for i in 0..3 {
            assert!(!ed.delete_column(i));
        }
        assert_eq!(ed.columns().len(), 3);
    }

    #[test]
    fn test_delete_terminal_is_noop_above_floor() {
        let mut ed = editor(floor_registry());
        ed.add_column();
        // index 2 is the terminal column
        assert!(!ed.delete_column(2));
        assert_eq!(ed.columns().len(), 4);
        assert!(ed.delete_column(3));
        assert_eq!(ed.columns().len(), 3);
    }

    #[test]
    fn test_delete_out_of_bounds_is_noop() {
        let mut ed = editor(floor_registry());
        ed.add_column();
        assert!(!ed.delete_column(9));
    }

    #[test]
    fn test_repeated_deletes_never_break_floor() {
        let mut ed = editor(floor_registry());
        ed.add_column();
        ed.add_column();
        for _ in 0..10 {
            let _ = ed.delete_column(0);
        }
        assert!(ed.columns().len() >= 3);
    }

    #[test]
    fn test_move_up_down_boundaries() {
        let mut ed = editor(floor_registry());
        assert!(!ed.move_up(0));
        assert!(!ed.move_down(2));

        assert!(ed.move_up(1));
        assert_eq!(ed.columns()[0].title, "doing");
        assert!(ed.move_down(0));
        assert_eq!(ed.columns()[0].title, "todo");
    }

    #[test]
    fn test_rename() {
        let mut ed = editor(floor_registry());
        ed.rename(0, "Inbox");
        assert_eq!(ed.columns()[0].title, "Inbox");
        // Out of bounds is a no-op, not a panic.
        ed.rename(9, "nope");
    }
}
