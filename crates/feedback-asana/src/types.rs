use serde::{Deserialize, Serialize};

/// Envelope for `POST /tasks`. Asana wraps every payload in `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub data: TaskData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskData {
    pub workspace: String,
    pub name: String,
    pub notes: String,
    pub completed: bool,
    pub projects: Vec<String>,
}

/// Envelope returned by `POST /tasks`. Only the `gid` is read; every other
/// field Asana sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskResponse {
    pub data: TaskResponseData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskResponseData {
    #[serde(default)]
    pub gid: String,
}
