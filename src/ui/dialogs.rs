use chrono::{Duration, NaiveDate};
use egui::{Color32, Context, RichText, Ui, Window};
use uuid::Uuid;

use crate::app::TimelineApp;
use crate::ui::theme;
use timetracker::io::TimelineStore;
use timetracker::model::project::ProjectDraft;
use timetracker::model::task::TaskDraft;
use timetracker::model::validate::MAX_GAP_DAYS;
use timetracker::model::validate::validate_holiday;
use timetracker::model::{Holiday, Project, Settings, Task};

/// Create or edit a project.
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub editing: Option<Uuid>,
    pub draft: ProjectDraft,
    pub error: Option<String>,
}

impl ProjectForm {
    pub fn create(today: NaiveDate, color: Color32) -> Self {
        Self {
            editing: None,
            draft: ProjectDraft {
                name: String::new(),
                start: today,
                end: today + Duration::days(30),
                color,
                notes: String::new(),
            },
            error: None,
        }
    }

    pub fn edit(project: &Project) -> Self {
        Self {
            editing: Some(project.id),
            draft: ProjectDraft::from_project(project),
            error: None,
        }
    }
}

/// Create or edit a task.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub editing: Option<Uuid>,
    pub draft: TaskDraft,
    pub archived: bool,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn create(project_id: Uuid, today: NaiveDate) -> Self {
        Self {
            editing: None,
            draft: TaskDraft {
                project_id,
                name: String::new(),
                start: today,
                end: today + Duration::days(7),
                gap_days: 0,
            },
            archived: false,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            draft: TaskDraft::from_task(task),
            archived: task.archived,
            error: None,
        }
    }
}

/// Capacity settings being edited, plus the pending holiday range.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub settings: Settings,
    pub holiday_start: NaiveDate,
    pub holiday_end: NaiveDate,
    pub error: Option<String>,
}

impl SettingsForm {
    pub fn new(settings: &Settings, today: NaiveDate) -> Self {
        Self {
            settings: settings.clone(),
            holiday_start: today,
            holiday_end: today,
            error: None,
        }
    }
}

/// The one modal window open at a time.
#[derive(Debug, Clone, Default)]
pub enum Dialog {
    #[default]
    None,
    Project(ProjectForm),
    Task(TaskForm),
    ProjectDetails(Uuid),
    Settings(SettingsForm),
    About,
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

/// Render whichever dialog is open. Escape closes it without saving.
pub fn show_dialog(app: &mut TimelineApp, ctx: &Context) {
    let dialog = std::mem::take(&mut app.dialog);
    if !dialog.is_open() {
        return;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        return;
    }

    let next = match dialog {
        Dialog::None => Dialog::None,
        Dialog::Project(form) => show_project_dialog(app, ctx, form),
        Dialog::Task(form) => show_task_dialog(app, ctx, form),
        Dialog::ProjectDetails(id) => show_project_details(app, ctx, id),
        Dialog::Settings(form) => show_settings_dialog(app, ctx, form),
        Dialog::About => show_about_dialog(app, ctx),
    };
    app.dialog = next;
}

fn dialog_window(title: &str) -> Window<'static> {
    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(theme::TEXT_SECONDARY));
}

fn primary_button(ui: &mut Ui, text: &str) -> bool {
    let btn = egui::Button::new(RichText::new(text).color(Color32::WHITE))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(4.0));
    ui.add_sized([80.0, 28.0], btn).clicked()
}

fn show_error(ui: &mut Ui, error: &Option<String>) {
    if let Some(error) = error {
        ui.add_space(4.0);
        ui.label(RichText::new(error).color(theme::ERROR_TEXT).size(11.0));
    }
}

fn confirm(title: &str, description: &str) -> bool {
    rfd::MessageDialog::new()
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show()
        == rfd::MessageDialogResult::Yes
}

fn show_project_dialog(app: &mut TimelineApp, ctx: &Context, mut form: ProjectForm) -> Dialog {
    let title = if form.editing.is_some() { "Edit Project" } else { "New Project" };
    let mut save = false;
    let mut delete = false;
    let mut close = false;

    dialog_window(title).show(ctx, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("project_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                field_label(ui, "Name");
                ui.add_sized(
                    [220.0, 24.0],
                    egui::TextEdit::singleline(&mut form.draft.name).hint_text("Project name..."),
                );
                ui.end_row();

                field_label(ui, "Start");
                ui.add(egui_extras::DatePickerButton::new(&mut form.draft.start).id_salt("project_start"));
                ui.end_row();

                field_label(ui, "End");
                ui.add(egui_extras::DatePickerButton::new(&mut form.draft.end).id_salt("project_end"));
                ui.end_row();

                field_label(ui, "Color");
                ui.color_edit_button_srgba(&mut form.draft.color);
                ui.end_row();
            });

        ui.add_space(6.0);
        field_label(ui, "Notes");
        ui.add(
            egui::TextEdit::multiline(&mut form.draft.notes)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        show_error(ui, &form.error);

        ui.add_space(6.0);
        ui.separator();
        ui.horizontal(|ui| {
            save = primary_button(ui, "Save");
            close = ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked();
            if form.editing.is_some() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    delete = ui
                        .button(RichText::new(egui_phosphor::regular::TRASH).color(theme::ERROR_TEXT))
                        .on_hover_text("Delete project and its tasks")
                        .clicked();
                });
            }
        });
    });

    if close {
        return Dialog::None;
    }
    if delete {
        if let Some(id) = form.editing {
            if confirm("Delete project", "Delete this project and all of its tasks?") {
                app.delete_project(id);
                return Dialog::None;
            }
        }
    }
    if save {
        match app.save_project(form.editing, form.draft.clone()) {
            Ok(()) => return Dialog::None,
            Err(e) => form.error = Some(e.to_string()),
        }
    }
    Dialog::Project(form)
}

fn show_task_dialog(app: &mut TimelineApp, ctx: &Context, mut form: TaskForm) -> Dialog {
    let title = if form.editing.is_some() { "Edit Task" } else { "New Task" };
    let projects: Vec<(Uuid, String)> = app
        .store
        .list_projects()
        .iter()
        .filter(|p| !p.archived || p.id == form.draft.project_id)
        .map(|p| (p.id, p.name.clone()))
        .collect();
    let mut save = false;
    let mut delete = false;
    let mut close = false;

    dialog_window(title).show(ctx, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("task_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                field_label(ui, "Project");
                let selected = projects
                    .iter()
                    .find(|(id, _)| *id == form.draft.project_id)
                    .map(|(_, name)| name.as_str())
                    .unwrap_or("Select a project");
                egui::ComboBox::from_id_salt("task_project")
                    .selected_text(selected)
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for (id, name) in &projects {
                            ui.selectable_value(&mut form.draft.project_id, *id, name);
                        }
                    });
                ui.end_row();

                field_label(ui, "Name");
                ui.add_sized(
                    [220.0, 24.0],
                    egui::TextEdit::singleline(&mut form.draft.name).hint_text("Task name..."),
                );
                ui.end_row();

                field_label(ui, "Start");
                ui.add(egui_extras::DatePickerButton::new(&mut form.draft.start).id_salt("task_start"));
                ui.end_row();

                field_label(ui, "End");
                ui.add(egui_extras::DatePickerButton::new(&mut form.draft.end).id_salt("task_end"));
                ui.end_row();

                field_label(ui, "Gap days");
                ui.add(egui::DragValue::new(&mut form.draft.gap_days).range(0..=MAX_GAP_DAYS))
                    .on_hover_text("Idle days before the task starts");
                ui.end_row();

                if form.editing.is_some() {
                    ui.label("");
                    ui.checkbox(&mut form.archived, "Archived");
                    ui.end_row();
                }
            });
        show_error(ui, &form.error);

        ui.add_space(6.0);
        ui.separator();
        ui.horizontal(|ui| {
            save = primary_button(ui, "Save");
            close = ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked();
            if form.editing.is_some() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    delete = ui
                        .button(RichText::new(egui_phosphor::regular::TRASH).color(theme::ERROR_TEXT))
                        .on_hover_text("Delete task")
                        .clicked();
                });
            }
        });
    });

    if close {
        return Dialog::None;
    }
    if delete {
        if let Some(id) = form.editing {
            if confirm("Delete task", "Delete this task?") {
                app.delete_task(id);
                return Dialog::None;
            }
        }
    }
    if save {
        match app.save_task(form.editing, form.draft.clone(), form.archived) {
            Ok(()) => return Dialog::None,
            Err(e) => form.error = Some(e.to_string()),
        }
    }
    Dialog::Task(form)
}

fn show_project_details(app: &mut TimelineApp, ctx: &Context, id: Uuid) -> Dialog {
    let Some(project) = app.store.project(id).cloned() else {
        return Dialog::None;
    };
    let tasks: Vec<Task> = app.store.list_tasks(id).into_iter().cloned().collect();
    let mut next = Dialog::ProjectDetails(id);

    dialog_window(&project.name).show(ctx, |ui| {
        ui.horizontal(|ui| {
            let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().circle_filled(dot.center(), 5.0, project.color);
            ui.label(
                RichText::new(format!(
                    "{} → {}  ({} days)",
                    project.start.format("%b %-d, %Y"),
                    project.end.format("%b %-d, %Y"),
                    project.duration_days()
                ))
                .color(theme::TEXT_SECONDARY),
            );
            if project.archived {
                ui.label(RichText::new("Archived").color(theme::TEXT_DIM).italics());
            }
        });

        if !project.notes.trim().is_empty() {
            ui.add_space(6.0);
            ui.label(&project.notes);
        }

        ui.add_space(6.0);
        ui.separator();
        ui.label(RichText::new(format!("Tasks ({})", tasks.len())).strong());
        egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
            if tasks.is_empty() {
                ui.label(RichText::new("No tasks").color(theme::TEXT_DIM));
            }
            for task in &tasks {
                ui.horizontal(|ui| {
                    let mut name = RichText::new(&task.name);
                    if task.archived {
                        name = name.color(theme::TEXT_DIM).strikethrough();
                    }
                    if ui.link(name).clicked() {
                        next = Dialog::Task(TaskForm::edit(task));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!(
                                "{} → {}",
                                task.start.format("%m/%d"),
                                task.end.format("%m/%d")
                            ))
                            .size(10.5)
                            .color(theme::TEXT_SECONDARY),
                        );
                    });
                });
            }
        });

        ui.add_space(6.0);
        ui.separator();
        ui.horizontal(|ui| {
            if primary_button(ui, "Edit") {
                next = Dialog::Project(ProjectForm::edit(&project));
            }
            if ui.add_sized([80.0, 28.0], egui::Button::new("Add Task")).clicked() {
                next = Dialog::Task(TaskForm::create(project.id, app.today()));
            }
            if ui
                .button(format!("{} Export", egui_phosphor::regular::EXPORT))
                .on_hover_text("Save a text report of this project")
                .clicked()
            {
                app.export_project_text(project.id);
            }
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                next = Dialog::None;
            }
        });
    });
    next
}

fn show_settings_dialog(app: &mut TimelineApp, ctx: &Context, mut form: SettingsForm) -> Dialog {
    let mut save = false;
    let mut close = false;
    let mut remove: Option<Uuid> = None;

    dialog_window("Capacity Settings").show(ctx, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("settings_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                field_label(ui, "Hours per day");
                ui.add(egui::DragValue::new(&mut form.settings.hours_per_day).range(0..=48));
                ui.end_row();

                field_label(ui, "Days per week");
                ui.add(egui::DragValue::new(&mut form.settings.days_per_week).range(0..=14));
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.separator();
        ui.label(RichText::new("Holidays").strong());
        egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
            if form.settings.holidays.is_empty() {
                ui.label(RichText::new("No holidays").color(theme::TEXT_DIM));
            }
            for holiday in &form.settings.holidays {
                ui.horizontal(|ui| {
                    ui.label(holiday_label(holiday));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button(egui_phosphor::regular::X)
                            .on_hover_text("Remove holiday")
                            .clicked()
                        {
                            remove = Some(holiday.id);
                        }
                    });
                });
            }
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.add(egui_extras::DatePickerButton::new(&mut form.holiday_start).id_salt("holiday_start"));
            ui.label("→");
            ui.add(egui_extras::DatePickerButton::new(&mut form.holiday_end).id_salt("holiday_end"));
            if ui.button(format!("{} Add", egui_phosphor::regular::PLUS)).clicked() {
                let holiday = Holiday::new(form.holiday_start, form.holiday_end);
                match validate_holiday(&holiday) {
                    Ok(()) => {
                        form.settings.holidays.push(holiday);
                        form.settings.holidays.sort_by_key(|h| h.start);
                        form.error = None;
                    }
                    Err(e) => form.error = Some(e.to_string()),
                }
            }
        });
        show_error(ui, &form.error);

        ui.add_space(6.0);
        ui.separator();
        ui.horizontal(|ui| {
            save = primary_button(ui, "Save");
            close = ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked();
        });
    });

    if let Some(id) = remove {
        form.settings.holidays.retain(|h| h.id != id);
    }
    if close {
        return Dialog::None;
    }
    if save {
        match app.save_settings(form.settings.clone()) {
            Ok(()) => return Dialog::None,
            Err(e) => form.error = Some(e.to_string()),
        }
    }
    Dialog::Settings(form)
}

fn holiday_label(holiday: &Holiday) -> String {
    if holiday.is_single_day() {
        holiday.start.format("%b %-d, %Y").to_string()
    } else {
        format!(
            "{} – {}",
            holiday.start.format("%b %-d"),
            holiday.end.format("%b %-d, %Y")
        )
    }
}

fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) -> Dialog {
    let mut close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("TimeTracker").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Plan projects and tasks on a timeline.");
                ui.add_space(6.0);
                ui.label(
                    RichText::new(app.store.path().display().to_string())
                        .size(10.5)
                        .color(theme::TEXT_DIM),
                );
                if ui
                    .link(format!("{} Open data folder", egui_phosphor::regular::FOLDER_OPEN))
                    .clicked()
                {
                    app.open_data_folder();
                }
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    close = true;
                }
            });
        });
    if close {
        Dialog::None
    } else {
        Dialog::About
    }
}
