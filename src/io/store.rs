//! Persistence contract for projects, tasks and capacity settings.

use chrono::{Duration, NaiveDate};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;
use crate::model::project::ProjectDraft;
use crate::model::task::TaskDraft;
use crate::model::validate::{self, ValidationError};
use crate::model::{DateChanges, Holiday, Project, Settings, Task};

/// Request/response operations the timeline needs from persistence.
pub trait TimelineStore {
    fn list_projects(&self) -> &[Project];
    fn all_tasks(&self) -> &[Task];
    fn settings(&self) -> &Settings;

    fn list_tasks(&self, project_id: Uuid) -> Vec<&Task> {
        self.all_tasks()
            .iter()
            .filter(|t| t.project_id == project_id)
            .collect()
    }

    fn holiday_settings(&self) -> &[Holiday] {
        &self.settings().holidays
    }

    fn project(&self, id: Uuid) -> Option<&Project> {
        self.list_projects().iter().find(|p| p.id == id)
    }

    fn task(&self, id: Uuid) -> Option<&Task> {
        self.all_tasks().iter().find(|t| t.id == id)
    }

    fn create_project(&mut self, draft: ProjectDraft) -> Result<Project, StoreError>;
    fn update_project(&mut self, id: Uuid, draft: ProjectDraft) -> Result<Project, StoreError>;
    fn update_project_dates(&mut self, id: Uuid, changes: DateChanges) -> Result<Project, StoreError>;
    fn toggle_project_archived(&mut self, id: Uuid) -> Result<Project, StoreError>;
    /// Removes the project and all of its tasks.
    fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError>;

    fn create_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError>;
    fn update_task(&mut self, id: Uuid, draft: TaskDraft) -> Result<Task, StoreError>;
    fn update_task_dates(&mut self, id: Uuid, changes: DateChanges) -> Result<Task, StoreError>;
    fn toggle_task_archived(&mut self, id: Uuid) -> Result<Task, StoreError>;
    fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError>;

    fn update_settings(&mut self, settings: Settings) -> Result<Settings, StoreError>;
}

/// Serialized form of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub settings: Settings,
}

impl StoreData {
    /// Two projects with a handful of tasks, anchored on `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let day = |n: i64| today + Duration::days(n);

        let mut website = Project::new("Website Redesign", day(-14), day(60));
        website.notes = "Redesign the company website with modern UI/UX principles".into();
        let mut mobile = Project::new("Mobile App Development", day(3), day(120));
        mobile.color = Color32::from_rgb(0x8b, 0x5c, 0xf6);

        let tasks = vec![
            Task::new(website.id, "Research & Planning", day(-14), day(1)),
            Task::new(website.id, "Design Mockups", day(7), day(22)).with_gap(5),
            Task::new(website.id, "Development", day(26), day(50)).with_gap(3),
            Task::new(mobile.id, "Setup & Architecture", day(3), day(17)),
            Task::new(mobile.id, "Core Features", day(21), day(70)).with_gap(3),
        ];

        Self {
            projects: vec![website, mobile],
            tasks,
            settings: Settings::default(),
        }
    }
}

/// In-memory store. Keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StoreData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    fn project_mut(&mut self, id: Uuid) -> Result<&mut Project, StoreError> {
        self.data
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::project_not_found(id))
    }

    fn task_mut(&mut self, id: Uuid) -> Result<&mut Task, StoreError> {
        self.data
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::task_not_found(id))
    }

    fn ensure_project(&self, id: Uuid) -> Result<(), StoreError> {
        match self.project(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::project_not_found(id)),
        }
    }
}

/// Apply `changes` to a (start, end) pair, rejecting a reversed result.
fn apply_dates(
    start: &mut NaiveDate,
    end: &mut NaiveDate,
    changes: DateChanges,
) -> Result<(), StoreError> {
    let (mut new_start, mut new_end) = (*start, *end);
    changes.apply(&mut new_start, &mut new_end);
    if new_end < new_start {
        return Err(ValidationError::EndBeforeStart {
            start: new_start,
            end: new_end,
        }
        .into());
    }
    *start = new_start;
    *end = new_end;
    Ok(())
}

impl TimelineStore for MemoryStore {
    fn list_projects(&self) -> &[Project] {
        &self.data.projects
    }

    fn all_tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    fn settings(&self) -> &Settings {
        &self.data.settings
    }

    fn create_project(&mut self, draft: ProjectDraft) -> Result<Project, StoreError> {
        validate::validate_project(&draft)?;
        let mut project = Project::new(String::new(), draft.start, draft.end);
        draft.apply_to(&mut project);
        self.data.projects.push(project.clone());
        tracing::info!(id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    fn update_project(&mut self, id: Uuid, draft: ProjectDraft) -> Result<Project, StoreError> {
        validate::validate_project(&draft)?;
        let project = self.project_mut(id)?;
        draft.apply_to(project);
        Ok(project.clone())
    }

    fn update_project_dates(&mut self, id: Uuid, changes: DateChanges) -> Result<Project, StoreError> {
        let project = self.project_mut(id)?;
        apply_dates(&mut project.start, &mut project.end, changes)?;
        tracing::debug!(%id, start = %project.start, end = %project.end, "project dates updated");
        Ok(project.clone())
    }

    fn toggle_project_archived(&mut self, id: Uuid) -> Result<Project, StoreError> {
        let project = self.project_mut(id)?;
        project.archived = !project.archived;
        Ok(project.clone())
    }

    fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.ensure_project(id)?;
        self.data.projects.retain(|p| p.id != id);
        let before = self.data.tasks.len();
        self.data.tasks.retain(|t| t.project_id != id);
        tracing::info!(%id, tasks = before - self.data.tasks.len(), "project deleted");
        Ok(())
    }

    fn create_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        validate::validate_task(&draft)?;
        self.ensure_project(draft.project_id)?;
        let mut task = Task::new(draft.project_id, String::new(), draft.start, draft.end);
        draft.apply_to(&mut task);
        self.data.tasks.push(task.clone());
        tracing::info!(id = %task.id, name = %task.name, "task created");
        Ok(task)
    }

    fn update_task(&mut self, id: Uuid, draft: TaskDraft) -> Result<Task, StoreError> {
        validate::validate_task(&draft)?;
        self.ensure_project(draft.project_id)?;
        let task = self.task_mut(id)?;
        draft.apply_to(task);
        Ok(task.clone())
    }

    fn update_task_dates(&mut self, id: Uuid, changes: DateChanges) -> Result<Task, StoreError> {
        let task = self.task_mut(id)?;
        apply_dates(&mut task.start, &mut task.end, changes)?;
        tracing::debug!(%id, start = %task.start, end = %task.end, "task dates updated");
        Ok(task.clone())
    }

    fn toggle_task_archived(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let task = self.task_mut(id)?;
        task.archived = !task.archived;
        Ok(task.clone())
    }

    fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        if self.task(id).is_none() {
            return Err(StoreError::task_not_found(id));
        }
        self.data.tasks.retain(|t| t.id != id);
        Ok(())
    }

    fn update_settings(&mut self, settings: Settings) -> Result<Settings, StoreError> {
        validate::validate_settings(&settings)?;
        self.data.settings = settings;
        Ok(self.data.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::DEFAULT_PROJECT_COLOR;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn project_draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.into(),
            start: date("2025-01-15"),
            end: date("2025-03-30"),
            color: DEFAULT_PROJECT_COLOR,
            notes: String::new(),
        }
    }

    fn task_draft(project_id: Uuid, name: &str) -> TaskDraft {
        TaskDraft {
            project_id,
            name: name.into(),
            start: date("2025-02-05"),
            end: date("2025-02-20"),
            gap_days: 5,
        }
    }

    #[test]
    fn create_and_list() {
        let mut store = MemoryStore::new();
        let p = store.create_project(project_draft("Website")).unwrap();
        let t = store.create_task(task_draft(p.id, "Design")).unwrap();

        assert_eq!(store.list_projects().len(), 1);
        assert_eq!(store.list_tasks(p.id), vec![&t]);
        assert_eq!(t.gap_days, 5);
    }

    #[test]
    fn create_task_requires_existing_project() {
        let mut store = MemoryStore::new();
        let err = store.create_task(task_draft(Uuid::new_v4(), "Orphan")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "project", .. }));
    }

    #[test]
    fn invalid_draft_rejected() {
        let mut store = MemoryStore::new();
        let mut draft = project_draft("Website");
        draft.end = date("2025-01-01");
        assert!(matches!(
            store.create_project(draft),
            Err(StoreError::Invalid(ValidationError::EndBeforeStart { .. }))
        ));
        assert!(store.list_projects().is_empty());
    }

    #[test]
    fn oversized_gap_rejected() {
        let mut store = MemoryStore::new();
        let p = store.create_project(project_draft("Website")).unwrap();
        let mut draft = task_draft(p.id, "Design");
        draft.gap_days = u32::MAX;
        assert!(matches!(
            store.create_task(draft),
            Err(StoreError::Invalid(ValidationError::GapTooLarge { .. }))
        ));
        assert!(store.list_tasks(p.id).is_empty());
    }

    #[test]
    fn date_update_touches_only_given_field() {
        let mut store = MemoryStore::new();
        let p = store.create_project(project_draft("Website")).unwrap();
        let updated = store
            .update_project_dates(p.id, DateChanges::end(date("2025-04-15")))
            .unwrap();
        assert_eq!(updated.start, date("2025-01-15"));
        assert_eq!(updated.end, date("2025-04-15"));
        assert_eq!(updated.name, "Website");
    }

    #[test]
    fn reversed_date_update_is_rejected_and_not_applied() {
        let mut store = MemoryStore::new();
        let p = store.create_project(project_draft("Website")).unwrap();
        let t = store.create_task(task_draft(p.id, "Design")).unwrap();
        assert!(store
            .update_task_dates(t.id, DateChanges::start(date("2025-03-01")))
            .is_err());
        assert_eq!(store.task(t.id).map(|t| t.start), Some(date("2025-02-05")));
    }

    #[test]
    fn delete_project_cascades_to_tasks() {
        let mut store = MemoryStore::new();
        let keep = store.create_project(project_draft("Keep")).unwrap();
        let gone = store.create_project(project_draft("Gone")).unwrap();
        store.create_task(task_draft(keep.id, "A")).unwrap();
        store.create_task(task_draft(gone.id, "B")).unwrap();
        store.create_task(task_draft(gone.id, "C")).unwrap();

        store.delete_project(gone.id).unwrap();
        assert_eq!(store.list_projects().len(), 1);
        assert_eq!(store.all_tasks().len(), 1);
        assert!(store.list_tasks(gone.id).is_empty());
    }

    #[test]
    fn archive_toggles() {
        let mut store = MemoryStore::new();
        let p = store.create_project(project_draft("Website")).unwrap();
        let t = store.create_task(task_draft(p.id, "Design")).unwrap();
        assert!(store.toggle_task_archived(t.id).unwrap().archived);
        assert!(!store.toggle_task_archived(t.id).unwrap().archived);
        assert!(store.toggle_project_archived(p.id).unwrap().archived);
    }

    #[test]
    fn settings_are_validated() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.holidays.push(Holiday::single(date("2025-12-25")));
        store.update_settings(settings.clone()).unwrap();
        assert_eq!(store.holiday_settings(), settings.holidays.as_slice());

        settings.days_per_week = 9;
        assert!(store.update_settings(settings).is_err());
        assert_eq!(store.settings().days_per_week, 5);
    }

    #[test]
    fn sample_data_is_consistent() {
        let data = StoreData::sample(date("2025-06-01"));
        assert_eq!(data.projects.len(), 2);
        assert_eq!(data.tasks.len(), 5);
        for task in &data.tasks {
            assert!(task.start <= task.end);
            assert!(data.projects.iter().any(|p| p.id == task.project_id));
        }
    }
}
