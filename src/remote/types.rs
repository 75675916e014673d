use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Column, ColumnId, Project, Task};

/// Every API response wraps its payload in `{ status, data }`; a `status` of
/// `"error"` is an application-level failure even on HTTP 200.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProject {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub columns: Vec<ApiColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiColumn {
    /// Absent on columns the server has not seen yet.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub complete_task: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTask {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub completed_milestones: Vec<String>,
    /// Date string, possibly with a time suffix; only the date part matters.
    #[serde(default)]
    pub assigned_date: Option<String>,
    pub status: String,
}

impl From<ApiProject> for Project {
    fn from(p: ApiProject) -> Project {
        Project {
            id: p.id,
            name: p.title,
            columns: p.columns.into_iter().map(Column::from).collect(),
        }
    }
}

impl From<ApiColumn> for Column {
    fn from(c: ApiColumn) -> Column {
        let id = match c.id {
            Some(id) => ColumnId::Committed(id),
            None => ColumnId::new_draft(),
        };
        Column {
            id,
            title: c.title,
            terminal: c.complete_task,
            count: c.count,
        }
    }
}

impl From<&Column> for ApiColumn {
    fn from(c: &Column) -> ApiColumn {
        let id = match &c.id {
            ColumnId::Committed(id) => Some(id.clone()),
            // Drafts have no server identity yet; the server assigns one.
            ColumnId::Draft(_) => None,
        };
        ApiColumn {
            id,
            title: c.title.clone(),
            count: c.count,
            complete_task: c.terminal,
        }
    }
}

impl From<ApiTask> for Task {
    fn from(t: ApiTask) -> Task {
        Task {
            id: t.id,
            title: t.title,
            note: t.note,
            milestones: t.milestones,
            completed_milestones: t.completed_milestones,
            assigned_date: t.assigned_date.as_deref().and_then(parse_wire_date),
            status: ColumnId::Committed(t.status),
        }
    }
}

impl From<&Task> for ApiTask {
    fn from(t: &Task) -> ApiTask {
        ApiTask {
            id: t.id.clone(),
            title: t.title.clone(),
            note: t.note.clone(),
            milestones: t.milestones.clone(),
            completed_milestones: t.completed_milestones.clone(),
            assigned_date: t.assigned_date.map(|d| d.format("%Y-%m-%d").to_string()),
            status: t.status.as_str().to_string(),
        }
    }
}

/// Parse `YYYY-MM-DD`, tolerating a trailing `T…` time component.
fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_date_tolerates_time_suffix() {
        assert_eq!(
            parse_wire_date("2025-06-01T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(parse_wire_date("2025-06-01"), NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(parse_wire_date("garbage"), None);
    }

    #[test]
    fn test_task_round_trip() {
        let json = r#"{
            "_id": "t1",
            "title": "Ship it",
            "note": "soon",
            "milestones": ["a", "b"],
            "completedMilestones": ["a"],
            "assignedDate": "2025-06-01",
            "status": "todo"
        }"#;
        let wire: ApiTask = serde_json::from_str(json).unwrap();
        let task = Task::from(wire);
        assert_eq!(task.status, ColumnId::committed("todo"));
        assert_eq!(task.completed_milestones, vec!["a"]);
        assert_eq!(task.assigned_date, NaiveDate::from_ymd_opt(2025, 6, 1));

        let back = ApiTask::from(&task);
        assert_eq!(back.assigned_date.as_deref(), Some("2025-06-01"));
        assert_eq!(back.status, "todo");
    }

    #[test]
    fn test_draft_column_serializes_without_id() {
        let col = Column::draft();
        let wire = ApiColumn::from(&col);
        let json = serde_json::to_string(&wire).unwrap();
        assert!(!json.contains("_id"));
    }

    #[test]
    fn test_envelope_error_status() {
        let json = r#"{"status": "error", "message": "nope"}"#;
        let env: Envelope<Vec<ApiTask>> = serde_json::from_str(json).unwrap();
        assert_eq!(env.status, "error");
        assert!(env.data.is_none());
    }
}
