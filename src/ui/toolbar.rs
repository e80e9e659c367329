use crate::app::{Page, TimelineApp};
use crate::ui::dialogs::{Dialog, ProjectForm, SettingsForm, TaskForm};
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use timetracker::io::TimelineStore;
use timetracker::model::ViewMode;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Project").clicked() {
                app.dialog = Dialog::Project(ProjectForm::create(
                    app.today(),
                    theme::project_color(app.store.list_projects().len()),
                ));
                ui.close_menu();
            }
            let first_active = app.store.list_projects().iter().find(|p| !p.archived).map(|p| p.id);
            if ui
                .add_enabled(first_active.is_some(), egui::Button::new("  New Task"))
                .clicked()
            {
                if let Some(project_id) = first_active {
                    app.dialog = Dialog::Task(TaskForm::create(project_id, app.today()));
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Page").small().weak());
            if ui.radio_value(&mut app.page, Page::Timeline, "Timeline").clicked() {
                ui.close_menu();
            }
            if ui.radio_value(&mut app.page, Page::Projects, "Projects").clicked() {
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.set_view_mode(app.config.view_mode.zoom_in());
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.set_view_mode(app.config.view_mode.zoom_out());
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Settings  ").font(theme::font_menu()), |ui| {
            if ui.button("  Capacity && Holidays...").clicked() {
                app.dialog = Dialog::Settings(SettingsForm::new(app.store.settings(), app.today()));
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.dialog = Dialog::About;
                ui.close_menu();
            }
        });

        ui.separator();
        let mut mode = app.config.view_mode;
        for candidate in ViewMode::ALL {
            ui.selectable_value(&mut mode, candidate, candidate.label());
        }
        if mode != app.config.view_mode {
            app.set_view_mode(mode);
        }

        // Capacity summary on the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = format!(
                "{} {}",
                egui_phosphor::regular::CLOCK,
                app.store.settings().capacity_label()
            );
            if ui
                .add(egui::Label::new(RichText::new(label).size(11.0).weak()).sense(egui::Sense::click()))
                .on_hover_text("Edit capacity settings")
                .clicked()
            {
                app.dialog = Dialog::Settings(SettingsForm::new(app.store.settings(), app.today()));
            }
        });
    });
}
