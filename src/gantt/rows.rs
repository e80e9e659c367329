use std::collections::HashSet;

use chrono::NaiveDate;
use egui::Color32;
use uuid::Uuid;

use super::drag::DragPreview;
use crate::model::{Project, Task};

/// Which store entity a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Project,
    Task,
}

/// Identifies the item behind a row, enough for the caller to dispatch
/// a click or a date update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRef {
    pub id: Uuid,
    pub kind: ItemKind,
}

/// Kind-specific row data.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Project {
        /// True when the project owns any task, archived or not.
        has_tasks: bool,
        collapsed: bool,
    },
    Task {
        project_id: Uuid,
        gap_days: u32,
    },
}

/// One renderable timeline entry for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: Uuid,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Dates to draw: the item's own dates unless a drag preview targets this row.
    pub display_start: NaiveDate,
    pub display_end: NaiveDate,
    pub color: Color32,
    pub kind: RowKind,
}

impl Row {
    fn project(project: &Project, has_tasks: bool, collapsed: bool) -> Self {
        Self {
            id: project.id,
            label: project.name.clone(),
            start: project.start,
            end: project.end,
            display_start: project.start,
            display_end: project.end,
            color: project.color,
            kind: RowKind::Project {
                has_tasks,
                collapsed,
            },
        }
    }

    fn task(task: &Task, color: Color32) -> Self {
        Self {
            id: task.id,
            label: task.name.clone(),
            start: task.start,
            end: task.end,
            display_start: task.start,
            display_end: task.end,
            color,
            kind: RowKind::Task {
                project_id: task.project_id,
                gap_days: task.gap_days,
            },
        }
    }

    pub fn item_kind(&self) -> ItemKind {
        match self.kind {
            RowKind::Project { .. } => ItemKind::Project,
            RowKind::Task { .. } => ItemKind::Task,
        }
    }

    pub fn row_ref(&self) -> RowRef {
        RowRef {
            id: self.id,
            kind: self.item_kind(),
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self.kind, RowKind::Project { .. })
    }

    /// Owning project for task rows, the row itself for project rows.
    pub fn project_id(&self) -> Uuid {
        match self.kind {
            RowKind::Project { .. } => self.id,
            RowKind::Task { project_id, .. } => project_id,
        }
    }

    pub fn gap_days(&self) -> u32 {
        match self.kind {
            RowKind::Task { gap_days, .. } => gap_days,
            RowKind::Project { .. } => 0,
        }
    }

    /// Override the display range when `preview` targets this row.
    pub fn apply_preview(&mut self, preview: Option<&DragPreview>) {
        match preview {
            Some(p) if p.row_id == self.id => {
                self.display_start = p.start;
                self.display_end = p.end;
            }
            _ => {
                self.display_start = self.start;
                self.display_end = self.end;
            }
        }
    }
}

/// A project together with its tasks in display order.
#[derive(Debug, Clone)]
pub struct ProjectItem<'a> {
    pub project: &'a Project,
    pub tasks: Vec<&'a Task>,
}

/// Attach each task to its project, keeping both input orders.
/// Tasks whose project is not in `projects` are ignored.
pub fn group_tasks<'a>(projects: &'a [Project], tasks: &'a [Task]) -> Vec<ProjectItem<'a>> {
    projects
        .iter()
        .map(|project| ProjectItem {
            project,
            tasks: tasks.iter().filter(|t| t.project_id == project.id).collect(),
        })
        .collect()
}

/// Flatten projects and their tasks into timeline rows.
///
/// Each project row is followed by its non-archived tasks unless the project
/// is in `collapsed`. Archived tasks are never emitted.
pub fn project_rows(
    items: &[ProjectItem<'_>],
    collapsed: &HashSet<Uuid>,
    preview: Option<&DragPreview>,
) -> Vec<Row> {
    let mut rows = Vec::new();

    for item in items {
        let is_collapsed = collapsed.contains(&item.project.id);
        rows.push(Row::project(item.project, !item.tasks.is_empty(), is_collapsed));

        if is_collapsed {
            continue;
        }
        rows.extend(
            item.tasks
                .iter()
                .filter(|t| !t.archived)
                .map(|t| Row::task(t, item.project.color)),
        );
    }

    if preview.is_some() {
        for row in &mut rows {
            row.apply_preview(preview);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> (Vec<Project>, Vec<Task>) {
        let website = Project::new("Website", date("2025-01-15"), date("2025-03-30"));
        let mobile = Project::new("Mobile", date("2025-02-01"), date("2025-05-15"));
        let mut archived = Task::new(website.id, "Old", date("2025-01-15"), date("2025-01-20"));
        archived.archived = true;
        let tasks = vec![
            Task::new(mobile.id, "Setup", date("2025-02-01"), date("2025-02-15")),
            Task::new(website.id, "Research", date("2025-01-15"), date("2025-01-30")),
            archived,
            Task::new(website.id, "Design", date("2025-02-05"), date("2025-02-20")).with_gap(5),
        ];
        (vec![website, mobile], tasks)
    }

    fn labels(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn projects_followed_by_live_tasks_in_order() {
        let (projects, tasks) = fixture();
        let items = group_tasks(&projects, &tasks);
        let rows = project_rows(&items, &HashSet::new(), None);
        assert_eq!(labels(&rows), vec!["Website", "Research", "Design", "Mobile", "Setup"]);
    }

    #[test]
    fn collapsed_project_hides_all_its_tasks() {
        let (projects, tasks) = fixture();
        let items = group_tasks(&projects, &tasks);
        let collapsed: HashSet<Uuid> = [projects[0].id].into_iter().collect();
        let rows = project_rows(&items, &collapsed, None);

        assert_eq!(labels(&rows), vec!["Website", "Mobile", "Setup"]);
        assert!(rows
            .iter()
            .filter(|r| !r.is_project())
            .all(|r| r.project_id() != projects[0].id));
        assert_eq!(
            rows[0].kind,
            RowKind::Project {
                has_tasks: true,
                collapsed: true
            }
        );
    }

    #[test]
    fn archived_task_never_projected() {
        let (projects, tasks) = fixture();
        let items = group_tasks(&projects, &tasks);
        let rows = project_rows(&items, &HashSet::new(), None);
        assert!(!rows.iter().any(|r| r.label == "Old"));
    }

    #[test]
    fn task_rows_inherit_project_color_and_gap() {
        let (mut projects, tasks) = fixture();
        projects[0].color = Color32::from_rgb(1, 2, 3);
        let items = group_tasks(&projects, &tasks);
        let rows = project_rows(&items, &HashSet::new(), None);
        let design = rows.iter().find(|r| r.label == "Design").unwrap();
        assert_eq!(design.color, Color32::from_rgb(1, 2, 3));
        assert_eq!(design.gap_days(), 5);
        assert_eq!(design.item_kind(), ItemKind::Task);
    }

    #[test]
    fn preview_overrides_display_dates_of_target_only() {
        let (projects, tasks) = fixture();
        let items = group_tasks(&projects, &tasks);
        let preview = DragPreview {
            row_id: projects[1].id,
            start: date("2025-01-20"),
            end: date("2025-05-15"),
        };
        let rows = project_rows(&items, &HashSet::new(), Some(&preview));
        let mobile = rows.iter().find(|r| r.id == projects[1].id).unwrap();
        assert_eq!(mobile.display_start, date("2025-01-20"));
        assert_eq!(mobile.start, date("2025-02-01"));
        let website = &rows[0];
        assert_eq!(website.display_start, website.start);
    }

    #[test]
    fn project_without_tasks_reports_no_toggle() {
        let p = Project::new("Empty", date("2025-01-01"), date("2025-01-31"));
        let projects = vec![p];
        let items = group_tasks(&projects, &[]);
        let rows = project_rows(&items, &HashSet::new(), None);
        assert_eq!(
            rows[0].kind,
            RowKind::Project {
                has_tasks: false,
                collapsed: false
            }
        );
    }
}
