use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::ui::theme;
use timetracker::model::{Project, Task};

/// Which projects the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectTab {
    #[default]
    Active,
    Archived,
}

/// Actions that the project list can request.
pub enum ProjectListAction {
    None,
    Open(Uuid),
    Edit(Uuid),
    ToggleArchived(Uuid),
    Delete(Uuid),
    Add,
}

/// Render the project list with its active/archived tabs.
pub fn show_project_list(
    projects: &[Project],
    tasks: &[Task],
    tab: &mut ProjectTab,
    ui: &mut Ui,
) -> ProjectListAction {
    let mut action = ProjectListAction::None;
    let active = projects.iter().filter(|p| !p.archived).count();
    let archived = projects.len() - active;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Projects")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(8.0);
        ui.selectable_value(tab, ProjectTab::Active, format!("Active ({})", active));
        ui.selectable_value(tab, ProjectTab::Archived, format!("Archived ({})", archived));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = egui::Button::new(
                RichText::new(format!("{}  New Project", egui_phosphor::regular::PLUS))
                    .color(Color32::WHITE)
                    .size(12.0),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
            if ui.add(btn).clicked() {
                action = ProjectListAction::Add;
            }
        });
    });
    ui.add_space(6.0);
    ui.separator();

    let show_archived = *tab == ProjectTab::Archived;
    let visible: Vec<&Project> = projects.iter().filter(|p| p.archived == show_archived).collect();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if visible.is_empty() {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    let text = if show_archived { "No archived projects" } else { "No active projects" };
                    ui.label(RichText::new(text).color(theme::TEXT_DIM));
                });
            }

            for (i, project) in visible.iter().enumerate() {
                let task_count = tasks
                    .iter()
                    .filter(|t| t.project_id == project.id && !t.archived)
                    .count();
                let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(8.0, 6.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 8.0;

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 4.0, project.color);

                        ui.add(
                            egui::Label::new(
                                RichText::new(&project.name).size(12.5).color(theme::TEXT_PRIMARY),
                            )
                            .truncate(),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;

                            let del = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::TRASH).color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if del.on_hover_text("Delete project").clicked() {
                                action = ProjectListAction::Delete(project.id);
                            }

                            let (icon, hint) = if project.archived {
                                (egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE, "Restore")
                            } else {
                                (egui_phosphor::regular::ARCHIVE, "Archive")
                            };
                            let archive = ui.add(
                                egui::Button::new(RichText::new(icon).color(theme::TEXT_SECONDARY))
                                    .frame(false),
                            );
                            if archive.on_hover_text(hint).clicked() {
                                action = ProjectListAction::ToggleArchived(project.id);
                            }

                            let edit = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::PENCIL_SIMPLE)
                                        .color(theme::TEXT_SECONDARY),
                                )
                                .frame(false),
                            );
                            if edit.on_hover_text("Edit project").clicked() {
                                action = ProjectListAction::Edit(project.id);
                            }

                            ui.label(
                                RichText::new(format!(
                                    "{} task{}",
                                    task_count,
                                    if task_count == 1 { "" } else { "s" }
                                ))
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                            );
                            ui.label(
                                RichText::new(format!(
                                    "{} → {}",
                                    project.start.format("%b %-d, %Y"),
                                    project.end.format("%b %-d, %Y")
                                ))
                                .size(10.5)
                                .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("project-row", project.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() && matches!(action, ProjectListAction::None) {
                    action = ProjectListAction::Open(project.id);
                }
                ui.add_space(1.0);
            }
        });

    action
}
