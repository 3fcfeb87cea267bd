// src/models/task.rs

//! Task shapes: the CRM's wire format and the sink row.

use serde::{Deserialize, Serialize};

/// A task as returned by `GET /contacts/{id}/tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: String,

    #[serde(default)]
    pub contact_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub assigned_to: Option<String>,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub completed: Option<bool>,
}

/// Response envelope for a contact's task list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<RawTask>,
}

/// A task row in the sink, keyed by `ghl_task_id`.
///
/// `ghl_contact_id` references the owning contact but is not enforced;
/// a task whose contact disappears upstream is orphaned silently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub ghl_task_id: String,
    pub ghl_contact_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        Self {
            ghl_task_id: raw.id,
            ghl_contact_id: raw.contact_id,
            title: raw.title,
            body: raw.body,
            assigned_to: raw.assigned_to,
            due_date: raw.due_date,
            completed: raw.completed,
        }
    }
}
