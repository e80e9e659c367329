use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Idle days immediately before `start` (e.g. waiting on client feedback).
    #[serde(default)]
    pub gap_days: u32,
    /// Archived tasks stay in the store but never reach the timeline.
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    pub fn new(project_id: Uuid, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            start,
            end,
            gap_days: 0,
            archived: false,
        }
    }

    pub fn with_gap(mut self, gap_days: u32) -> Self {
        self.gap_days = gap_days;
        self
    }

    /// Inclusive length in days.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The editable fields of a task, as submitted by the task form.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub project_id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub gap_days: u32,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            project_id: task.project_id,
            name: task.name.clone(),
            start: task.start,
            end: task.end,
            gap_days: task.gap_days,
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        task.project_id = self.project_id;
        task.name = self.name.trim().to_string();
        task.start = self.start;
        task.end = self.end;
        task.gap_days = self.gap_days;
    }
}
