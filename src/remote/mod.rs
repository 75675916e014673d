pub mod http;
pub mod types;

pub use http::HttpRemote;

use crate::model::{Column, ColumnId, Project, Task};

/// Error from the persistence service. All variants are recoverable: the
/// board stays usable, optimistic operations keep their local commit, and a
/// column save discards its working copy.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("server rejected the request: {0}")]
    Api(String),
    #[error("bad response payload: {0}")]
    Decode(#[from] std::io::Error),
}

/// The remote persistence boundary. Durability lives on the other side of
/// this trait; local state is committed around these calls, not by them.
pub trait Remote {
    /// List projects, with embedded column definitions.
    fn list_projects(&self) -> Result<Vec<Project>, RemoteError>;
    /// Replace a project's columns; returns the server-confirmed registry
    /// (drafts come back with assigned ids).
    fn update_columns(&self, project: &str, columns: &[Column]) -> Result<Vec<Column>, RemoteError>;
    fn list_tasks(&self, project: &str) -> Result<Vec<Task>, RemoteError>;
    fn create_task(&self, project: &str, task: &Task) -> Result<(), RemoteError>;
    fn update_task(&self, task: &Task) -> Result<(), RemoteError>;
    fn delete_task(&self, task_id: &str) -> Result<(), RemoteError>;
    /// Report a task's new status alone (the drag-drop write).
    fn update_status(
        &self,
        project: &str,
        task_id: &str,
        status: &ColumnId,
    ) -> Result<(), RemoteError>;
}
