use chrono::NaiveDate;

use crate::model::Column;

use super::store::TaskStore;

/// Dashboard aggregates derived from a project's task store. Disposable:
/// recomputed on demand, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_tasks: usize,
    /// Tasks with every milestone completed (zero milestones counts,
    /// vacuously).
    pub completed_tasks: usize,
    pub incomplete_tasks: usize,
    /// Tasks dated strictly before today, regardless of completion.
    pub overdue_tasks: usize,
    /// Per-column `(title, cached count)` pairs, in registry order; feeds the
    /// bar chart.
    pub columns: Vec<(String, usize)>,
}

/// Compute the dashboard numbers for one project. `today` is date-only; the
/// per-column counts come from the registry's cached `count` field, which the
/// board re-syncs after every mutation.
pub fn dashboard_stats(
    store: &TaskStore,
    registry: &[Column],
    project: &str,
    today: NaiveDate,
) -> DashboardStats {
    let mut stats = DashboardStats::default();
    for col in registry {
        for task in store.tasks_in(project, &col.id) {
            stats.total_tasks += 1;
            if task.is_complete() {
                stats.completed_tasks += 1;
            }
            if task.is_overdue(today) {
                stats.overdue_tasks += 1;
            }
        }
        stats.columns.push((col.title.clone(), col.count));
    }
    stats.incomplete_tasks = stats.total_tasks - stats.completed_tasks;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnId, Task};
    use pretty_assertions::assert_eq;

    fn registry() -> Vec<Column> {
        vec![
            Column {
                id: ColumnId::committed("todo"),
                title: "To Do".into(),
                terminal: false,
                count: 2,
            },
            Column {
                id: ColumnId::committed("done"),
                title: "Done".into(),
                terminal: true,
                count: 1,
            },
        ]
    }

    fn store() -> TaskStore {
        let mut open = Task::new("t1", "Open", ColumnId::committed("todo"));
        open.milestones = vec!["a".into(), "b".into()];
        open.assigned_date = NaiveDate::from_ymd_opt(2020, 1, 1);

        // No milestones: counts as completed.
        let mut empty = Task::new("t2", "Empty", ColumnId::committed("todo"));
        empty.assigned_date = NaiveDate::from_ymd_opt(2099, 1, 1);

        let mut closed = Task::new("t3", "Closed", ColumnId::committed("done"));
        closed.milestones = vec!["a".into()];
        closed.completed_milestones = vec!["a".into()];

        let mut s = TaskStore::new();
        s.rebuild_project("p1", &registry(), vec![open, empty, closed]);
        s
    }

    #[test]
    fn test_counts_and_identity() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stats = dashboard_stats(&store(), &registry(), "p1", today);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.incomplete_tasks, 1);
        assert_eq!(stats.completed_tasks + stats.incomplete_tasks, stats.total_tasks);
    }

    #[test]
    fn test_overdue_is_date_only_and_strict() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stats = dashboard_stats(&store(), &registry(), "p1", today);
        // 2020-01-01 is overdue; 2099-01-01 and undated are not.
        assert_eq!(stats.overdue_tasks, 1);
    }

    #[test]
    fn test_columns_read_cached_counts_in_registry_order() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stats = dashboard_stats(&store(), &registry(), "p1", today);
        assert_eq!(
            stats.columns,
            vec![("To Do".to_string(), 2), ("Done".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_project() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stats = dashboard_stats(&TaskStore::new(), &[], "p1", today);
        assert_eq!(stats, DashboardStats::default());
    }
}
