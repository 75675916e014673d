use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::column::ColumnId;

/// A work item on the board.
///
/// `status` must always equal the id of the column bucket the task is stored
/// under; every mutation goes through the store primitives to keep the two in
/// agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the owning project.
    pub id: String,
    pub title: String,
    /// Free-text note.
    pub note: String,
    /// Subtask labels, order-significant; duplicates permitted.
    pub milestones: Vec<String>,
    /// Intended subset of `milestones`, enforced only by construction.
    pub completed_milestones: Vec<String>,
    pub assigned_date: Option<NaiveDate>,
    /// The column this task currently lives in.
    pub status: ColumnId,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: ColumnId) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            note: String::new(),
            milestones: Vec::new(),
            completed_milestones: Vec::new(),
            assigned_date: None,
            status,
        }
    }

    /// Whether every milestone is completed. A task with no milestones counts
    /// as complete, vacuously.
    pub fn is_complete(&self) -> bool {
        self.completed_milestones.len() == self.milestones.len()
    }

    /// Whether the assigned date is strictly before `today` (date-only),
    /// regardless of completion state.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.assigned_date {
            Some(date) => date < today,
            None => false,
        }
    }
}

/// A partial update to a task's fields, as produced by the edit form.
/// Never carries status/location; moves go through `move_task`.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub note: Option<String>,
    pub milestones: Option<Vec<String>>,
    pub completed_milestones: Option<Vec<String>>,
    pub assigned_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Merge the populated fields into `task`.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(note) = &self.note {
            task.note = note.clone();
        }
        if let Some(milestones) = &self.milestones {
            task.milestones = milestones.clone();
        }
        if let Some(completed) = &self.completed_milestones {
            task.completed_milestones = completed.clone();
        }
        if let Some(date) = self.assigned_date {
            task.assigned_date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task::new("t1", "Write docs", ColumnId::committed("todo"))
    }

    #[test]
    fn test_zero_milestones_is_complete() {
        assert!(task().is_complete());
    }

    #[test]
    fn test_partial_milestones_incomplete() {
        let mut t = task();
        t.milestones = vec!["a".into(), "b".into()];
        t.completed_milestones = vec!["a".into()];
        assert!(!t.is_complete());
        t.completed_milestones.push("b".into());
        assert!(t.is_complete());
    }

    #[test]
    fn test_overdue_is_strict() {
        let mut t = task();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!t.is_overdue(today));

        t.assigned_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(t.is_overdue(today));

        t.assigned_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(!t.is_overdue(today));

        t.assigned_date = NaiveDate::from_ymd_opt(2099, 1, 1);
        assert!(!t.is_overdue(today));
    }

    #[test]
    fn test_patch_leaves_status_alone() {
        let mut t = task();
        let patch = TaskPatch {
            title: Some("Rewrite docs".into()),
            assigned_date: Some(NaiveDate::from_ymd_opt(2025, 6, 1)),
            ..TaskPatch::default()
        };
        patch.apply(&mut t);
        assert_eq!(t.title, "Rewrite docs");
        assert_eq!(t.assigned_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(t.status, ColumnId::committed("todo"));
        assert_eq!(t.note, "");
    }

    #[test]
    fn test_patch_can_clear_date() {
        let mut t = task();
        t.assigned_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        let patch = TaskPatch {
            assigned_date: Some(None),
            ..TaskPatch::default()
        };
        patch.apply(&mut t);
        assert_eq!(t.assigned_date, None);
    }
}
