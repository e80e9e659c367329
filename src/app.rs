use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::ui;
use crate::ui::dialogs::{Dialog, ProjectForm, TaskForm};
use crate::ui::gantt_chart::ChartAction;
use crate::ui::project_list::{ProjectListAction, ProjectTab};
use crate::ui::zoom::ZoomStepper;
use timetracker::config::AppConfig;
use timetracker::gantt::{
    DateCommit, DragController, DragOutcome, FrameInputs, ItemKind, RowRef, TimelineFrame,
};
use timetracker::io::export::{export_file_name, export_project_text};
use timetracker::io::{JsonFileStore, StoreError, TimelineStore};
use timetracker::model::project::ProjectDraft;
use timetracker::model::task::TaskDraft;
use timetracker::model::{Project, Settings, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Timeline,
    Projects,
}

/// Main application state.
pub struct TimelineApp {
    pub store: JsonFileStore,
    pub config: AppConfig,
    config_path: PathBuf,
    pub drag: DragController,
    pub zoom: ZoomStepper,
    pub page: Page,
    pub project_tab: ProjectTab,
    pub dialog: Dialog,
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: JsonFileStore,
        config: AppConfig,
        config_path: PathBuf,
    ) -> Self {
        // Phosphor icons as a fallback font so they render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self {
            store,
            config,
            config_path,
            drag: DragController::new(),
            zoom: ZoomStepper::new(),
            page: Page::Timeline,
            project_tab: ProjectTab::Active,
            dialog: Dialog::None,
            status_message: "Ready".to_string(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn report(&mut self, context: &str, err: &StoreError) {
        tracing::warn!(error = %err, "{}", context);
        self.status_message = format!("{}: {}", context, err);
    }

    // --- View state ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.config.view_mode == mode {
            return;
        }
        self.config.view_mode = mode;
        self.status_message = format!("{} view", mode.label());
        self.save_config();
    }

    pub fn toggle_collapse(&mut self, project_id: Uuid) {
        if !self.config.collapsed.remove(&project_id) {
            self.config.collapsed.insert(project_id);
        }
        self.save_config();
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save(&self.config_path) {
            self.report("Could not save config", &e);
        }
    }

    // --- Timeline interactions ---

    /// Forward a finished drag to the store.
    pub fn commit_dates(&mut self, commit: DateCommit) {
        let result = match commit.row.kind {
            ItemKind::Project => self
                .store
                .update_project_dates(commit.row.id, commit.changes)
                .map(|p| (p.name, p.start, p.end)),
            ItemKind::Task => self
                .store
                .update_task_dates(commit.row.id, commit.changes)
                .map(|t| (t.name, t.start, t.end)),
        };
        match result {
            Ok((name, start, end)) => {
                self.status_message = format!(
                    "Updated '{}' ({} → {})",
                    name,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
            }
            Err(e) => self.report("Could not update dates", &e),
        }
    }

    /// A bar click opens the project details or the task editor.
    pub fn open_row(&mut self, row: RowRef) {
        match row.kind {
            ItemKind::Project => self.dialog = Dialog::ProjectDetails(row.id),
            ItemKind::Task => {
                if let Some(task) = self.store.task(row.id) {
                    self.dialog = Dialog::Task(TaskForm::edit(task));
                }
            }
        }
    }

    fn handle_chart_action(&mut self, action: ChartAction) {
        match action {
            ChartAction::RowClicked(row) => self.open_row(row),
            ChartAction::ToggleCollapse(id) => self.toggle_collapse(id),
            ChartAction::Commit(commit) => self.commit_dates(commit),
            ChartAction::ZoomIn => self.set_view_mode(self.config.view_mode.zoom_in()),
            ChartAction::ZoomOut => self.set_view_mode(self.config.view_mode.zoom_out()),
        }
    }

    /// Release a gesture whose chart is no longer on screen. The new dates
    /// are kept; a click is dropped since its bar is gone.
    fn release_hidden_drag(&mut self) {
        drop(self.drag.gesture());
        if let Some(DragOutcome::Commit(commit)) = self.drag.take_released() {
            self.commit_dates(commit);
        }
    }

    // --- Project / task operations ---

    pub fn save_project(&mut self, editing: Option<Uuid>, draft: ProjectDraft) -> Result<(), StoreError> {
        let project = match editing {
            Some(id) => self.store.update_project(id, draft)?,
            None => self.store.create_project(draft)?,
        };
        self.status_message = format!("Saved project '{}'", project.name);
        Ok(())
    }

    pub fn save_task(
        &mut self,
        editing: Option<Uuid>,
        draft: TaskDraft,
        archived: bool,
    ) -> Result<(), StoreError> {
        let mut task = match editing {
            Some(id) => self.store.update_task(id, draft)?,
            None => self.store.create_task(draft)?,
        };
        if task.archived != archived {
            task = self.store.toggle_task_archived(task.id)?;
        }
        self.status_message = format!("Saved task '{}'", task.name);
        Ok(())
    }

    pub fn delete_project(&mut self, id: Uuid) {
        match self.store.delete_project(id) {
            Ok(()) => {
                self.status_message = "Project deleted".to_string();
                if self.config.collapsed.remove(&id) {
                    self.save_config();
                }
            }
            Err(e) => self.report("Could not delete project", &e),
        }
    }

    pub fn delete_task(&mut self, id: Uuid) {
        match self.store.delete_task(id) {
            Ok(()) => self.status_message = "Task deleted".to_string(),
            Err(e) => self.report("Could not delete task", &e),
        }
    }

    pub fn toggle_project_archived(&mut self, id: Uuid) {
        match self.store.toggle_project_archived(id) {
            Ok(project) => {
                let verb = if project.archived { "Archived" } else { "Restored" };
                self.status_message = format!("{} '{}'", verb, project.name);
            }
            Err(e) => self.report("Could not archive project", &e),
        }
    }

    pub fn save_settings(&mut self, settings: Settings) -> Result<(), StoreError> {
        let settings = self.store.update_settings(settings)?;
        self.status_message = format!("Capacity: {}", settings.capacity_label());
        Ok(())
    }

    // --- Export / shell ---

    pub fn export_csv(&mut self) {
        if self.store.list_projects().is_empty() {
            self.status_message = "Nothing to export: no projects".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("timeline.csv")
            .save_file()
        {
            match timetracker::io::csv_export::export_csv(
                self.store.list_projects(),
                self.store.all_tasks(),
                &path,
            ) {
                Ok(count) => self.status_message = format!("Exported {} rows to CSV", count),
                Err(e) => self.report("CSV export failed", &e),
            }
        }
    }

    pub fn export_project_text(&mut self, id: Uuid) {
        let Some(project) = self.store.project(id) else {
            return;
        };
        let tasks = self.store.list_tasks(id);
        let text = export_project_text(project, &tasks, chrono::Local::now().naive_local());
        let file_name = export_file_name(project);

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .set_file_name(&file_name)
            .save_file()
        {
            match std::fs::write(&path, text) {
                Ok(()) => self.status_message = format!("Exported to {}", path.display()),
                Err(e) => self.report("Text export failed", &StoreError::Io(e)),
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        let dir = self
            .store
            .path()
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        if let Err(e) = open::that(&dir) {
            self.report("Could not open data folder", &StoreError::Io(e));
        }
    }

    fn timeline_frame(&self) -> TimelineFrame {
        let projects: Vec<Project> = self
            .store
            .list_projects()
            .iter()
            .filter(|p| !p.archived)
            .cloned()
            .collect();
        TimelineFrame::compute(FrameInputs {
            projects: &projects,
            tasks: self.store.all_tasks(),
            collapsed: &self.config.collapsed,
            mode: self.config.view_mode,
            holidays: self.store.holiday_settings(),
            preview: self.drag.preview(),
            today: self.today(),
        })
    }

    fn handle_list_action(&mut self, action: ProjectListAction) {
        match action {
            ProjectListAction::Open(id) => self.dialog = Dialog::ProjectDetails(id),
            ProjectListAction::Edit(id) => {
                if let Some(project) = self.store.project(id) {
                    self.dialog = Dialog::Project(ProjectForm::edit(project));
                }
            }
            ProjectListAction::ToggleArchived(id) => self.toggle_project_archived(id),
            ProjectListAction::Delete(id) => {
                let confirm = rfd::MessageDialog::new()
                    .set_title("Delete project")
                    .set_description("Delete this project and all of its tasks?")
                    .set_buttons(rfd::MessageButtons::YesNo)
                    .show();
                if confirm == rfd::MessageDialogResult::Yes {
                    self.delete_project(id);
                }
            }
            ProjectListAction::Add => {
                self.dialog = Dialog::Project(ProjectForm::create(
                    self.today(),
                    ui::theme::project_color(self.store.list_projects().len()),
                ));
            }
            ProjectListAction::None => {}
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_small())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let active = self.store.list_projects().iter().filter(|p| !p.archived).count();
                        ui.label(
                            egui::RichText::new(format!(
                                "Projects: {} · Tasks: {} · {}",
                                active,
                                self.store.all_tasks().iter().filter(|t| !t.archived).count(),
                                self.config.view_mode.label()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        match self.page {
            Page::Timeline => {
                let frame = self.timeline_frame();
                let today = self.today();
                let actions = egui::CentralPanel::default()
                    .frame(chart_frame)
                    .show(ctx, |ui| {
                        ui::gantt_chart::show_gantt_chart(&frame, &mut self.drag, &mut self.zoom, today, ui)
                    })
                    .inner;
                for action in actions {
                    self.handle_chart_action(action);
                }
            }
            Page::Projects => {
                self.release_hidden_drag();
                let mut tab = self.project_tab;
                let action = egui::CentralPanel::default()
                    .frame(chart_frame.inner_margin(egui::Margin::same(10.0)))
                    .show(ctx, |ui| {
                        ui::project_list::show_project_list(
                            self.store.list_projects(),
                            self.store.all_tasks(),
                            &mut tab,
                            ui,
                        )
                    })
                    .inner;
                self.project_tab = tab;
                self.handle_list_action(action);
            }
        }

        ui::dialogs::show_dialog(self, ctx);
    }
}
