use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity of a board column.
///
/// Columns created locally carry a placeholder id until the project is saved;
/// the server assigns the durable id and a save remaps drafts to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ColumnId {
    /// Client-generated placeholder for a column not yet saved.
    Draft(String),
    /// Server-assigned durable id.
    Committed(String),
}

impl ColumnId {
    /// A fresh draft id for a newly added, unsaved column.
    pub fn new_draft() -> ColumnId {
        ColumnId::Draft(Uuid::new_v4().to_string())
    }

    pub fn committed(id: impl Into<String>) -> ColumnId {
        ColumnId::Committed(id.into())
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, ColumnId::Draft(_))
    }

    /// The raw key, regardless of draft/committed state.
    pub fn as_str(&self) -> &str {
        match self {
            ColumnId::Draft(s) | ColumnId::Committed(s) => s,
        }
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column definition in a project's registry.
///
/// `count` is a cached derived value, re-synced from the task store after
/// every mutation; it is never authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Entering a terminal column auto-completes a task's milestones.
    pub terminal: bool,
    #[serde(default)]
    pub count: usize,
}

impl Column {
    /// A blank column with a fresh draft id, as produced by "Add Column".
    pub fn draft() -> Column {
        Column {
            id: ColumnId::new_draft(),
            title: String::new(),
            terminal: false,
            count: 0,
        }
    }
}

/// The minimum number of columns a project must keep.
pub const COLUMN_FLOOR: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_ids_are_unique() {
        let a = ColumnId::new_draft();
        let b = ColumnId::new_draft();
        assert_ne!(a, b);
        assert!(a.is_draft());
    }

    #[test]
    fn test_committed_vs_draft_inequality() {
        let key = "6650a1";
        assert_ne!(
            ColumnId::Draft(key.to_string()),
            ColumnId::committed(key)
        );
        assert_eq!(ColumnId::committed(key).as_str(), key);
    }

    #[test]
    fn test_draft_column_shape() {
        let col = Column::draft();
        assert!(col.title.is_empty());
        assert!(!col.terminal);
        assert_eq!(col.count, 0);
    }
}
