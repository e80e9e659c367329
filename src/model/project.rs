use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color;

/// Default bar color for new projects (#3b82f6).
pub const DEFAULT_PROJECT_COLOR: Color32 = Color32::from_rgb(59, 130, 246);

/// A project spanning a date range. Tasks refer back to it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Bar color, stored as `#rrggbb`.
    #[serde(with = "color::hex")]
    pub color: Color32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub archived: bool,
}

impl Project {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            color: DEFAULT_PROJECT_COLOR,
            notes: String::new(),
            archived: false,
        }
    }

    /// Inclusive length in days.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The editable fields of a project, as submitted by the project form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: Color32,
    pub notes: String,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            start: project.start,
            end: project.end,
            color: project.color,
            notes: project.notes.clone(),
        }
    }

    /// Overwrite the editable fields of `project`, keeping its id and archive flag.
    pub fn apply_to(&self, project: &mut Project) {
        project.name = self.name.trim().to_string();
        project.start = self.start;
        project.end = self.end;
        project.color = self.color;
        project.notes = self.notes.clone();
    }
}
