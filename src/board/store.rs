use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::{Column, ColumnId, Task, TaskPatch};

/// Where a dropped task lands in the target column's sequence.
///
/// The wire protocol uses `-1` for "append at the end"; any other index is an
/// insertion position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Append,
    At(usize),
}

impl DropPosition {
    /// Map a wire index (`-1` = append) to a position.
    pub fn from_index(idx: isize) -> DropPosition {
        if idx < 0 {
            DropPosition::Append
        } else {
            DropPosition::At(idx as usize)
        }
    }
}

/// One project's slice of the store: a task arena addressed by stable id,
/// and per-column ordered id lists. Moving a task is an id splice, not a
/// structural copy.
#[derive(Debug, Clone, Default)]
struct Partition {
    tasks: HashMap<String, Task>,
    /// Column id → ordered task ids (display order, top to bottom).
    buckets: IndexMap<ColumnId, Vec<String>>,
}

/// The board's canonical task data: project id → column id → ordered tasks.
///
/// A task exists in exactly one column of exactly one project at any
/// committed instant. Every mutation keeps `task.status` equal to the bucket
/// the task is stored under. Stale references are silent no-ops (`false`),
/// never a panic.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    projects: HashMap<String, Partition>,
}

impl TaskStore {
    pub fn new() -> TaskStore {
        TaskStore::default()
    }

    /// Whether tasks for this project have been loaded yet. Projects are
    /// populated lazily, on first selection.
    pub fn is_loaded(&self, project: &str) -> bool {
        self.projects.contains_key(project)
    }

    /// Rebuild a project's partition from scratch: one empty bucket per
    /// column, then each task distributed by its status. A task whose status
    /// matches no bucket is dropped (its column no longer exists).
    pub fn rebuild_project(&mut self, project: &str, columns: &[Column], tasks: Vec<Task>) {
        let mut partition = Partition::default();
        for col in columns {
            partition.buckets.insert(col.id.clone(), Vec::new());
        }
        for task in tasks {
            if let Some(bucket) = partition.buckets.get_mut(&task.status) {
                bucket.push(task.id.clone());
                partition.tasks.insert(task.id.clone(), task);
            }
        }
        self.projects.insert(project.to_string(), partition);
    }

    /// Relocate a task from one column to another (or within one), setting
    /// its status to the destination and inserting at `pos`. When
    /// `auto_complete` is set (destination is terminal), the task's
    /// milestones are all marked complete as part of the same mutation.
    ///
    /// No-op if either column bucket is absent or the task is not in `from`.
    pub fn move_task(
        &mut self,
        project: &str,
        task_id: &str,
        from: &ColumnId,
        to: &ColumnId,
        pos: DropPosition,
        auto_complete: bool,
    ) -> bool {
        let Some(partition) = self.projects.get_mut(project) else {
            return false;
        };
        if !partition.buckets.contains_key(from) || !partition.buckets.contains_key(to) {
            return false;
        }
        let Some(source) = partition.buckets.get_mut(from) else {
            return false;
        };
        let Some(idx) = source.iter().position(|id| id == task_id) else {
            return false;
        };
        source.remove(idx);

        if let Some(task) = partition.tasks.get_mut(task_id) {
            task.status = to.clone();
            if auto_complete {
                task.completed_milestones = task.milestones.clone();
            }
        }

        // Bucket presence was checked above.
        let target = partition.buckets.get_mut(to).unwrap();
        match pos {
            DropPosition::Append => target.push(task_id.to_string()),
            DropPosition::At(i) => {
                let i = i.min(target.len());
                target.insert(i, task_id.to_string());
            }
        }
        true
    }

    /// Append a newly created task to a column. No-op if the bucket is
    /// absent or the id is already present in this project.
    pub fn insert_task(&mut self, project: &str, column: &ColumnId, mut task: Task) -> bool {
        let Some(partition) = self.projects.get_mut(project) else {
            return false;
        };
        if partition.tasks.contains_key(&task.id) {
            return false;
        }
        let Some(bucket) = partition.buckets.get_mut(column) else {
            return false;
        };
        task.status = column.clone();
        bucket.push(task.id.clone());
        partition.tasks.insert(task.id.clone(), task);
        true
    }

    /// Delete a task by id. No-op if absent.
    pub fn remove_task(&mut self, project: &str, column: &ColumnId, task_id: &str) -> bool {
        let Some(partition) = self.projects.get_mut(project) else {
            return false;
        };
        let Some(bucket) = partition.buckets.get_mut(column) else {
            return false;
        };
        let Some(idx) = bucket.iter().position(|id| id == task_id) else {
            return false;
        };
        bucket.remove(idx);
        partition.tasks.remove(task_id);
        true
    }

    /// Merge partial fields into a task. Does not alter status/location;
    /// moves go through [`TaskStore::move_task`].
    pub fn update_task_fields(
        &mut self,
        project: &str,
        column: &ColumnId,
        task_id: &str,
        patch: &TaskPatch,
    ) -> bool {
        let Some(partition) = self.projects.get_mut(project) else {
            return false;
        };
        let in_bucket = partition
            .buckets
            .get(column)
            .is_some_and(|b| b.iter().any(|id| id == task_id));
        if !in_bucket {
            return false;
        }
        match partition.tasks.get_mut(task_id) {
            Some(task) => {
                patch.apply(task);
                true
            }
            None => false,
        }
    }

    // --- Read access ---

    pub fn task(&self, project: &str, task_id: &str) -> Option<&Task> {
        self.projects.get(project)?.tasks.get(task_id)
    }

    /// Tasks in a column, in display order.
    pub fn tasks_in(&self, project: &str, column: &ColumnId) -> Vec<&Task> {
        let Some(partition) = self.projects.get(project) else {
            return Vec::new();
        };
        let Some(bucket) = partition.buckets.get(column) else {
            return Vec::new();
        };
        bucket
            .iter()
            .filter_map(|id| partition.tasks.get(id))
            .collect()
    }

    pub fn column_count(&self, project: &str, column: &ColumnId) -> usize {
        self.projects
            .get(project)
            .and_then(|p| p.buckets.get(column))
            .map_or(0, Vec::len)
    }

    /// Total tasks across all of a project's columns.
    pub fn project_total(&self, project: &str) -> usize {
        self.projects
            .get(project)
            .map_or(0, |p| p.buckets.values().map(Vec::len).sum())
    }

    /// Check the status/location invariant: every task's `status` equals the
    /// column bucket it is stored under, and no id appears in two buckets.
    pub fn is_consistent(&self, project: &str) -> bool {
        let Some(partition) = self.projects.get(project) else {
            return true;
        };
        let mut seen = std::collections::HashSet::new();
        for (col, bucket) in &partition.buckets {
            for id in bucket {
                if !seen.insert(id.as_str()) {
                    return false;
                }
                match partition.tasks.get(id) {
                    Some(task) if &task.status == col => {}
                    _ => return false,
                }
            }
        }
        seen.len() == partition.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(id: &str) -> ColumnId {
        ColumnId::committed(id)
    }

    fn sample_columns() -> Vec<Column> {
        vec![
            Column {
                id: col("todo"),
                title: "To Do".into(),
                terminal: false,
                count: 0,
            },
            Column {
                id: col("doing"),
                title: "In Progress".into(),
                terminal: false,
                count: 0,
            },
            Column {
                id: col("done"),
                title: "Done".into(),
                terminal: true,
                count: 0,
            },
        ]
    }

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        let mut t1 = Task::new("t1", "First", col("todo"));
        t1.milestones = vec!["a".into(), "b".into()];
        let t2 = Task::new("t2", "Second", col("todo"));
        let t3 = Task::new("t3", "Third", col("doing"));
        store.rebuild_project("p1", &sample_columns(), vec![t1, t2, t3]);
        store
    }

    fn ids(store: &TaskStore, column: &str) -> Vec<String> {
        store
            .tasks_in("p1", &col(column))
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    #[test]
    fn test_rebuild_distributes_by_status() {
        let store = sample_store();
        assert_eq!(ids(&store, "todo"), vec!["t1", "t2"]);
        assert_eq!(ids(&store, "doing"), vec!["t3"]);
        assert_eq!(ids(&store, "done"), Vec::<String>::new());
        assert!(store.is_consistent("p1"));
    }

    #[test]
    fn test_rebuild_drops_orphaned_tasks() {
        let mut store = TaskStore::new();
        let orphan = Task::new("tx", "Orphan", col("gone"));
        store.rebuild_project("p1", &sample_columns(), vec![orphan]);
        assert_eq!(store.project_total("p1"), 0);
        assert!(store.task("p1", "tx").is_none());
    }

    #[test]
    fn test_move_task_append() {
        let mut store = sample_store();
        let moved = store.move_task(
            "p1",
            "t1",
            &col("todo"),
            &col("doing"),
            DropPosition::Append,
            false,
        );
        assert!(moved);
        assert_eq!(ids(&store, "todo"), vec!["t2"]);
        assert_eq!(ids(&store, "doing"), vec!["t3", "t1"]);
        assert_eq!(store.task("p1", "t1").unwrap().status, col("doing"));
        assert!(store.is_consistent("p1"));
    }

    #[test]
    fn test_move_task_at_index() {
        let mut store = sample_store();
        store.move_task(
            "p1",
            "t3",
            &col("doing"),
            &col("todo"),
            DropPosition::At(0),
            false,
        );
        assert_eq!(ids(&store, "todo"), vec!["t3", "t1", "t2"]);
    }

    #[test]
    fn test_move_task_index_clamped_to_len() {
        let mut store = sample_store();
        store.move_task(
            "p1",
            "t3",
            &col("doing"),
            &col("todo"),
            DropPosition::At(99),
            false,
        );
        assert_eq!(ids(&store, "todo"), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_move_within_same_column_reorders() {
        let mut store = sample_store();
        store.move_task(
            "p1",
            "t2",
            &col("todo"),
            &col("todo"),
            DropPosition::At(0),
            false,
        );
        assert_eq!(ids(&store, "todo"), vec!["t2", "t1"]);
        assert!(store.is_consistent("p1"));
    }

    #[test]
    fn test_move_into_terminal_auto_completes() {
        let mut store = sample_store();
        store.move_task(
            "p1",
            "t1",
            &col("todo"),
            &col("done"),
            DropPosition::Append,
            true,
        );
        let t1 = store.task("p1", "t1").unwrap();
        assert_eq!(t1.completed_milestones, vec!["a", "b"]);
        assert_eq!(t1.status, col("done"));
    }

    #[test]
    fn test_move_conserves_total() {
        let mut store = sample_store();
        let before = store.project_total("p1");
        store.move_task(
            "p1",
            "t2",
            &col("todo"),
            &col("done"),
            DropPosition::Append,
            true,
        );
        assert_eq!(store.project_total("p1"), before);
    }

    #[test]
    fn test_move_missing_column_is_noop() {
        let mut store = sample_store();
        let moved = store.move_task(
            "p1",
            "t1",
            &col("todo"),
            &col("nope"),
            DropPosition::Append,
            false,
        );
        assert!(!moved);
        assert_eq!(ids(&store, "todo"), vec!["t1", "t2"]);

        let moved = store.move_task(
            "p1",
            "t1",
            &col("nope"),
            &col("doing"),
            DropPosition::Append,
            false,
        );
        assert!(!moved);
        assert!(store.is_consistent("p1"));
    }

    #[test]
    fn test_move_missing_task_is_noop() {
        let mut store = sample_store();
        let moved = store.move_task(
            "p1",
            "zzz",
            &col("todo"),
            &col("doing"),
            DropPosition::Append,
            false,
        );
        assert!(!moved);
    }

    #[test]
    fn test_insert_task_appends() {
        let mut store = sample_store();
        let inserted = store.insert_task("p1", &col("doing"), Task::new("t4", "Fourth", col("todo")));
        assert!(inserted);
        assert_eq!(ids(&store, "doing"), vec!["t3", "t4"]);
        // Status forced to the insertion column.
        assert_eq!(store.task("p1", "t4").unwrap().status, col("doing"));
    }

    #[test]
    fn test_insert_duplicate_id_is_noop() {
        let mut store = sample_store();
        let inserted = store.insert_task("p1", &col("doing"), Task::new("t1", "Dup", col("doing")));
        assert!(!inserted);
        assert_eq!(store.project_total("p1"), 3);
    }

    #[test]
    fn test_remove_task() {
        let mut store = sample_store();
        assert!(store.remove_task("p1", &col("todo"), "t2"));
        assert_eq!(ids(&store, "todo"), vec!["t1"]);
        assert!(store.task("p1", "t2").is_none());
        assert!(!store.remove_task("p1", &col("todo"), "t2"));
    }

    #[test]
    fn test_update_fields_in_wrong_column_is_noop() {
        let mut store = sample_store();
        let patch = TaskPatch {
            title: Some("Renamed".into()),
            ..TaskPatch::default()
        };
        assert!(!store.update_task_fields("p1", &col("doing"), "t1", &patch));
        assert_eq!(store.task("p1", "t1").unwrap().title, "First");

        assert!(store.update_task_fields("p1", &col("todo"), "t1", &patch));
        assert_eq!(store.task("p1", "t1").unwrap().title, "Renamed");
    }

    #[test]
    fn test_drop_position_from_index() {
        assert_eq!(DropPosition::from_index(-1), DropPosition::Append);
        assert_eq!(DropPosition::from_index(0), DropPosition::At(0));
        assert_eq!(DropPosition::from_index(3), DropPosition::At(3));
    }
}
