use serde::de::DeserializeOwned;

use crate::model::{Column, ColumnId, Project, Task};

use super::types::{ApiColumn, ApiProject, ApiTask, Envelope};
use super::{Remote, RemoteError};

/// Bearer-token client for the tracker API.
pub struct HttpRemote {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> HttpRemote {
        HttpRemote {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.agent
            .request(method, &self.url(path))
            .set("Accept", "application/json")
            .set("Authorization", &format!("Bearer {}", self.token))
    }

    /// Issue a request with a JSON body and unwrap the `{ status, data }`
    /// envelope. `status == "error"` is an API failure even on HTTP 200.
    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, RemoteError> {
        let request = self.request(method, path);
        let response = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        }
        .map_err(|err| RemoteError::Http(err.to_string()))?;

        let envelope: Envelope<T> = response.into_json()?;
        if envelope.status == "error" {
            return Err(RemoteError::Api(
                envelope.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| RemoteError::Api("response has no data".to_string()))
    }

    /// Like `call`, for writes whose payload we discard.
    fn call_ignored(
        &self,
        method: &str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(), RemoteError> {
        let response = self
            .request(method, path)
            .send_json(body)
            .map_err(|err| RemoteError::Http(err.to_string()))?;
        let envelope: Envelope<serde_json::Value> = response.into_json()?;
        if envelope.status == "error" {
            return Err(RemoteError::Api(
                envelope.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(())
    }
}

impl Remote for HttpRemote {
    fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let projects: Vec<ApiProject> = self.call("GET", "/projects", None)?;
        Ok(projects.into_iter().map(Project::from).collect())
    }

    fn update_columns(&self, project: &str, columns: &[Column]) -> Result<Vec<Column>, RemoteError> {
        let payload = serde_json::json!({
            "id": project,
            "columns": columns.iter().map(ApiColumn::from).collect::<Vec<_>>(),
        });
        #[derive(serde::Deserialize)]
        struct ColumnsPayload {
            columns: Vec<ApiColumn>,
        }
        let confirmed: ColumnsPayload = self.call("PATCH", "/projects", Some(payload))?;
        Ok(confirmed.columns.into_iter().map(Column::from).collect())
    }

    fn list_tasks(&self, project: &str) -> Result<Vec<Task>, RemoteError> {
        let tasks: Vec<ApiTask> = self.call("GET", &format!("/projects/{project}/task"), None)?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    fn create_task(&self, project: &str, task: &Task) -> Result<(), RemoteError> {
        let wire = ApiTask::from(task);
        let payload = serde_json::json!({
            "projectId": project,
            "title": wire.title,
            "note": wire.note,
            "milestones": wire.milestones,
            "completedMilestones": wire.completed_milestones,
            "assignedDate": wire.assigned_date,
            "status": wire.status,
        });
        self.call_ignored("POST", "/projects/task", payload)
    }

    fn update_task(&self, task: &Task) -> Result<(), RemoteError> {
        let wire = ApiTask::from(task);
        let payload = serde_json::json!({
            "id": wire.id,
            "title": wire.title,
            "desc": wire.note,
            "milestones": wire.milestones,
            "completedMilestones": wire.completed_milestones,
            "assignedDate": wire.assigned_date,
            "status": wire.status,
        });
        self.call_ignored("PATCH", "/projects/task", payload)
    }

    fn delete_task(&self, task_id: &str) -> Result<(), RemoteError> {
        self.call_ignored(
            "DELETE",
            "/projects/task",
            serde_json::json!({ "id": task_id }),
        )
    }

    fn update_status(
        &self,
        project: &str,
        task_id: &str,
        status: &ColumnId,
    ) -> Result<(), RemoteError> {
        self.call_ignored(
            "PATCH",
            "/projects/task/status",
            serde_json::json!({
                "id": task_id,
                "status": status.as_str(),
                "projectId": project,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let remote = HttpRemote::new("https://tracker.example/", "tok");
        assert_eq!(
            remote.url("/projects/p1/task"),
            "https://tracker.example/api/v1/projects/p1/task"
        );
    }
}
