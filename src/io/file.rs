use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::error::StoreError;
use super::store::{MemoryStore, StoreData, TimelineStore};
use crate::model::project::ProjectDraft;
use crate::model::task::TaskDraft;
use crate::model::{DateChanges, Project, Settings, Task};

/// Save the store contents to a JSON file.
pub fn save_data(data: &StoreData, path: &Path) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load store contents from a JSON file.
pub fn load_data(path: &Path) -> Result<StoreData, StoreError> {
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A [`MemoryStore`] written back to a JSON file after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl JsonFileStore {
    /// Load `path`, or start from `seed()` and write it out when the file is absent.
    pub fn open_or_seed(
        path: impl Into<PathBuf>,
        seed: impl FnOnce() -> StoreData,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let data = load_data(&path)?;
            tracing::info!(
                path = %path.display(),
                projects = data.projects.len(),
                tasks = data.tasks.len(),
                "loaded timeline data"
            );
            data
        } else {
            let data = seed();
            save_data(&data, &path)?;
            tracing::info!(path = %path.display(), "created new data file");
            data
        };
        Ok(Self {
            inner: MemoryStore::from_data(data),
            path,
        })
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_or_seed(path, StoreData::default)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StoreData {
        self.inner.data()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        save_data(self.inner.data(), &self.path)
    }

    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut MemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        // Work on a copy so a failed write leaves memory matching the file.
        let mut next = self.inner.clone();
        let out = f(&mut next)?;
        save_data(next.data(), &self.path)?;
        self.inner = next;
        Ok(out)
    }
}

impl TimelineStore for JsonFileStore {
    fn list_projects(&self) -> &[Project] {
        self.inner.list_projects()
    }

    fn all_tasks(&self) -> &[Task] {
        self.inner.all_tasks()
    }

    fn settings(&self) -> &Settings {
        self.inner.settings()
    }

    fn create_project(&mut self, draft: ProjectDraft) -> Result<Project, StoreError> {
        self.mutate(|s| s.create_project(draft))
    }

    fn update_project(&mut self, id: Uuid, draft: ProjectDraft) -> Result<Project, StoreError> {
        self.mutate(|s| s.update_project(id, draft))
    }

    fn update_project_dates(&mut self, id: Uuid, changes: DateChanges) -> Result<Project, StoreError> {
        self.mutate(|s| s.update_project_dates(id, changes))
    }

    fn toggle_project_archived(&mut self, id: Uuid) -> Result<Project, StoreError> {
        self.mutate(|s| s.toggle_project_archived(id))
    }

    fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.mutate(|s| s.delete_project(id))
    }

    fn create_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        self.mutate(|s| s.create_task(draft))
    }

    fn update_task(&mut self, id: Uuid, draft: TaskDraft) -> Result<Task, StoreError> {
        self.mutate(|s| s.update_task(id, draft))
    }

    fn update_task_dates(&mut self, id: Uuid, changes: DateChanges) -> Result<Task, StoreError> {
        self.mutate(|s| s.update_task_dates(id, changes))
    }

    fn toggle_task_archived(&mut self, id: Uuid) -> Result<Task, StoreError> {
        self.mutate(|s| s.toggle_task_archived(id))
    }

    fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.mutate(|s| s.delete_task(id))
    }

    fn update_settings(&mut self, settings: Settings) -> Result<Settings, StoreError> {
        self.mutate(|s| s.update_settings(settings))
    }
}
