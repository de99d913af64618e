use crate::calendar::Calendar;
use crate::fuzzy::Match;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
    NotDone,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Done, TaskStatus::NotDone, TaskStatus::Pending];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
            TaskStatus::NotDone => "not_done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Done => "Done",
            TaskStatus::NotDone => "Not Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskList {
    Daily,
    Today,
}

impl TaskList {
    pub fn is_daily(self) -> bool {
        self == TaskList::Daily
    }

    pub fn from_daily(is_daily: bool) -> Self {
        if is_daily { TaskList::Daily } else { TaskList::Today }
    }

    pub fn other(self) -> Self {
        Self::from_daily(!self.is_daily())
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(TaskList::Daily),
            "today" => Some(TaskList::Today),
            _ => None,
        }
    }
}

/// A task as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_daily: bool,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

impl Task {
    pub fn list(&self) -> TaskList {
        TaskList::from_daily(self.is_daily)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask<'a> {
    pub text: &'a str,
    pub is_daily: bool,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct BackendMessage {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    pub text: String,
    pub list: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct IndexQuery {
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestion: Option<String>,
    pub score: Option<f64>,
}

impl From<Option<Match>> for SuggestResponse {
    fn from(found: Option<Match>) -> Self {
        match found {
            Some(found) => Self {
                suggestion: Some(found.target),
                score: Some(found.score),
            },
            None => Self {
                suggestion: None,
                score: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub daily: Vec<Task>,
    pub today: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub earliest: String,
    #[serde(flatten)]
    pub calendar: Calendar,
}
