use chrono::NaiveDate;
use egui::{Align2, Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::ui::theme;
use crate::ui::zoom::{ZoomStep, ZoomStepper};
use timetracker::gantt::{
    gap_span, DateCommit, DragController, DragOutcome, Edge, HeaderBucket, Row,
    RowKind, RowRef, TimeAxis, TimelineFrame,
};

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartAction {
    RowClicked(RowRef),
    ToggleCollapse(Uuid),
    Commit(DateCommit),
    ZoomIn,
    ZoomOut,
}

/// Pixel layout shared by all draw helpers.
struct ChartLayout {
    origin: Pos2,
    /// Left edge of the time axis.
    axis_x: f32,
    axis_width: f32,
    header_height: f32,
    height: f32,
}

impl ChartLayout {
    fn x_of(&self, fraction: f64) -> f32 {
        self.axis_x + (fraction * self.axis_width as f64) as f32
    }

    fn row_top(&self, index: usize) -> f32 {
        self.origin.y + self.header_height + index as f32 * (ROW_HEIGHT + ROW_PADDING)
    }

    fn right(&self) -> f32 {
        self.axis_x + self.axis_width
    }
}

/// Render the timeline and route pointer input to the drag controller.
pub fn show_gantt_chart(
    frame: &TimelineFrame,
    drag: &mut DragController,
    zoom: &mut ZoomStepper,
    today: NaiveDate,
    ui: &mut Ui,
) -> Vec<ChartAction> {
    let mut actions = Vec::new();

    if frame.is_empty() {
        // No bar left to drag.
        drop(drag.gesture());
        actions.extend(drag.take_released().map(ChartAction::from));
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(egui::RichText::new("No projects yet").size(16.0).strong());
            ui.label(
                egui::RichText::new("Add a project to see the timeline")
                    .color(theme::TEXT_SECONDARY),
            );
        });
        return actions;
    }

    // Ctrl+scroll steps through view modes
    if ui.rect_contains_pointer(ui.max_rect()) {
        let (factor, now) = ui.input(|i| (i.zoom_delta(), i.time));
        match zoom.feed(factor, now) {
            Some(ZoomStep::In) => actions.push(ChartAction::ZoomIn),
            Some(ZoomStep::Out) => actions.push(ChartAction::ZoomOut),
            None => {}
        }
    }

    let available = ui.available_size();
    let axis_width = (available.x - theme::LABEL_COLUMN_WIDTH).max(theme::MIN_CHART_WIDTH);
    let header_lines = if frame.axis.group_headers.is_empty() { 1.0 } else { 2.0 };
    let header_height = header_lines * theme::HEADER_LINE_HEIGHT;
    let rows_height = frame.rows.len() as f32 * (ROW_HEIGHT + ROW_PADDING);
    let width = theme::LABEL_COLUMN_WIDTH + axis_width;
    let height = (header_height + rows_height + 20.0).max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
            let layout = ChartLayout {
                origin: response.rect.min,
                axis_x: response.rect.min.x + theme::LABEL_COLUMN_WIDTH,
                axis_width,
                header_height,
                height: header_height + rows_height,
            };

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_row_backgrounds(&painter, &layout, frame.rows.len());
            draw_grid(&painter, &layout, &frame.axis);
            draw_holidays(&painter, &layout, frame);
            draw_today_line(&painter, &layout, &frame.axis, today);
            draw_header(&painter, &layout, &frame.axis);

            for (i, row) in frame.rows.iter().enumerate() {
                let y = layout.row_top(i);
                if let Some(action) = draw_row_label(ui, &painter, &layout, row, y) {
                    actions.push(action);
                }
                if let Some(action) = draw_bar(ui, &painter, &layout, &frame.axis, row, y, drag) {
                    actions.push(action);
                }
            }
        });

    if let Some(outcome) = route_pointer(ui, drag, axis_width, frame.axis.total_days) {
        actions.push(outcome.into());
    }
    actions
}

impl From<DragOutcome> for ChartAction {
    fn from(outcome: DragOutcome) -> Self {
        match outcome {
            DragOutcome::Commit(commit) => ChartAction::Commit(commit),
            DragOutcome::Click(row) => ChartAction::RowClicked(row),
        }
    }
}

/// Feed this frame's pointer state to the live gesture, holding it while the
/// button stays down.
fn route_pointer(
    ui: &Ui,
    drag: &mut DragController,
    axis_width: f32,
    total_days: i64,
) -> Option<DragOutcome> {
    if let Some(outcome) = drag.take_released() {
        return Some(outcome);
    }
    let mut gesture = drag.gesture()?;
    ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    ui.ctx().request_repaint();

    let (focused, released, down, pos) = ui.ctx().input(|i| {
        (
            i.focused,
            i.pointer.any_released(),
            i.pointer.primary_down(),
            i.pointer.latest_pos(),
        )
    });

    if let Some(pos) = pos {
        gesture.moved(pos.x, axis_width, total_days);
    }
    if !focused {
        gesture.capture_lost()
    } else if released || !down {
        gesture.release()
    } else {
        gesture.hold();
        None
    }
}

fn draw_row_backgrounds(painter: &egui::Painter, layout: &ChartLayout, count: usize) {
    for i in 0..count {
        let y = layout.row_top(i);
        let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
        painter.rect_filled(
            Rect::from_min_max(
                Pos2::new(layout.origin.x, y),
                Pos2::new(layout.right(), y + ROW_HEIGHT + ROW_PADDING),
            ),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(layout.origin.x, y + ROW_HEIGHT + ROW_PADDING),
                Pos2::new(layout.right(), y + ROW_HEIGHT + ROW_PADDING),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }

    // Label column divider
    painter.line_segment(
        [
            Pos2::new(layout.axis_x, layout.origin.y),
            Pos2::new(layout.axis_x, layout.origin.y + layout.height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_grid(painter: &egui::Painter, layout: &ChartLayout, axis: &TimeAxis) {
    let top = layout.origin.y + layout.header_height;
    let bottom = layout.origin.y + layout.height;
    for marker in &axis.markers {
        let x = layout.x_of(marker.position);
        painter.line_segment(
            [Pos2::new(x, top), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_holidays(painter: &egui::Painter, layout: &ChartLayout, frame: &TimelineFrame) {
    let top = layout.origin.y + layout.header_height;
    let bottom = layout.origin.y + layout.height;
    for segment in &frame.holidays {
        let x = layout.x_of(segment.left);
        let w = (segment.width * layout.axis_width as f64) as f32;
        painter.rect_filled(
            Rect::from_min_max(Pos2::new(x, top), Pos2::new(x + w, bottom)),
            0.0,
            theme::HOLIDAY_BAND,
        );
    }
}

fn draw_today_line(painter: &egui::Painter, layout: &ChartLayout, axis: &TimeAxis, today: NaiveDate) {
    if !axis.contains(today) {
        return;
    }
    let x = layout.x_of(axis.fraction(axis.offset_days(today)));
    painter.line_segment(
        [
            Pos2::new(x, layout.origin.y + layout.header_height),
            Pos2::new(x, layout.origin.y + layout.height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_header(painter: &egui::Painter, layout: &ChartLayout, axis: &TimeAxis) {
    painter.rect_filled(
        Rect::from_min_size(
            layout.origin,
            Vec2::new(theme::LABEL_COLUMN_WIDTH + layout.axis_width, layout.header_height),
        ),
        0.0,
        theme::BG_HEADER,
    );
    painter.text(
        Pos2::new(layout.origin.x + 10.0, layout.origin.y + layout.header_height / 2.0),
        Align2::LEFT_CENTER,
        "Project / Task",
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );

    let mut line_top = layout.origin.y;
    if !axis.group_headers.is_empty() {
        draw_bucket_line(painter, layout, axis, &axis.group_headers, line_top, theme::font_header());
        line_top += theme::HEADER_LINE_HEIGHT;
    }
    draw_bucket_line(painter, layout, axis, &axis.headers, line_top, theme::font_sub());

    painter.line_segment(
        [
            Pos2::new(layout.origin.x, layout.origin.y + layout.header_height),
            Pos2::new(layout.right(), layout.origin.y + layout.header_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_bucket_line(
    painter: &egui::Painter,
    layout: &ChartLayout,
    axis: &TimeAxis,
    buckets: &[HeaderBucket],
    top: f32,
    font: egui::FontId,
) {
    let bottom = top + theme::HEADER_LINE_HEIGHT;
    for bucket in buckets {
        let x = layout.x_of(axis.fraction(axis.offset_days(bucket.start)));
        let w = (bucket.width * layout.axis_width as f64) as f32;
        let cell = Rect::from_min_max(Pos2::new(x, top), Pos2::new(x + w, bottom));

        painter.line_segment(
            [Pos2::new(x, top), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        // Labels only where they fit
        if w >= 14.0 {
            painter.with_clip_rect(cell).text(
                cell.center(),
                Align2::CENTER_CENTER,
                &bucket.label,
                font.clone(),
                theme::TEXT_SECONDARY,
            );
        }
    }
}

fn draw_row_label(
    ui: &Ui,
    painter: &egui::Painter,
    layout: &ChartLayout,
    row: &Row,
    y: f32,
) -> Option<ChartAction> {
    let center_y = y + ROW_PADDING + ROW_HEIGHT / 2.0;
    let mut action = None;
    let mut text_x = layout.origin.x + 30.0;

    match row.kind {
        RowKind::Project {
            has_tasks,
            collapsed,
        } => {
            text_x = layout.origin.x + 28.0;
            if has_tasks {
                let toggle_rect =
                    Rect::from_center_size(Pos2::new(layout.origin.x + 14.0, center_y), Vec2::splat(18.0));
                let response = ui.interact(
                    toggle_rect,
                    ui.make_persistent_id(("collapse-toggle", row.id)),
                    Sense::click(),
                );
                if response.hovered() {
                    painter.rect_filled(toggle_rect, Rounding::same(3.0), theme::BG_ROW_HOVER);
                }
                let icon = if collapsed {
                    egui_phosphor::regular::CARET_RIGHT
                } else {
                    egui_phosphor::regular::CARET_DOWN
                };
                painter.text(
                    toggle_rect.center(),
                    Align2::CENTER_CENTER,
                    icon,
                    theme::font_header(),
                    theme::TEXT_SECONDARY,
                );
                if response.on_hover_text(if collapsed { "Expand" } else { "Collapse" }).clicked() {
                    action = Some(ChartAction::ToggleCollapse(row.id));
                }
            }
        }
        RowKind::Task { .. } => {}
    }

    let (font, color) = if row.is_project() {
        (theme::font_header(), theme::TEXT_PRIMARY)
    } else {
        (theme::font_bar(), theme::TEXT_SECONDARY)
    };
    let label_rect = Rect::from_min_max(
        Pos2::new(text_x, y),
        Pos2::new(layout.axis_x - 6.0, y + ROW_HEIGHT + ROW_PADDING),
    );
    painter.with_clip_rect(label_rect).text(
        Pos2::new(text_x, center_y),
        Align2::LEFT_CENTER,
        row.label.trim(),
        font,
        color,
    );
    action
}

fn draw_bar(
    ui: &Ui,
    painter: &egui::Painter,
    layout: &ChartLayout,
    axis: &TimeAxis,
    row: &Row,
    y: f32,
    drag: &mut DragController,
) -> Option<ChartAction> {
    let bar_top = y + ROW_PADDING + theme::BAR_INSET;
    let bar_height = ROW_HEIGHT - theme::BAR_INSET * 2.0;
    let center_y = bar_top + bar_height / 2.0;

    if let Some((gap_start, gap_end)) = gap_span(row.display_start, row.gap_days()) {
        let (x, w) = axis
            .position(gap_start, gap_end)
            .to_pixels(layout.axis_x, layout.axis_width);
        let gap_rect = Rect::from_min_size(
            Pos2::new(x, center_y - theme::GAP_BAR_HEIGHT / 2.0),
            Vec2::new(w, theme::GAP_BAR_HEIGHT),
        );
        painter.rect_filled(gap_rect, Rounding::same(2.0), theme::GAP_BAR);
        let _ = ui
            .interact(
                gap_rect.expand2(Vec2::new(0.0, 3.0)),
                ui.make_persistent_id(("gap", row.id)),
                Sense::hover(),
            )
            .on_hover_text(format!("{} day gap", row.gap_days()));
    }

    let (x, w) = axis
        .position(row.display_start, row.display_end)
        .to_pixels(layout.axis_x, layout.axis_width);
    let bar_rect = Rect::from_min_size(Pos2::new(x, bar_top), Vec2::new(w.max(4.0), bar_height));
    let fill = match row.kind {
        RowKind::Task { .. } => row.color.gamma_multiply(theme::TASK_BAR_ALPHA),
        RowKind::Project { .. } => row.color,
    };
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, fill);

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(row.label.trim().to_string(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(bar_rect.shrink(2.0))
            .galley(Pos2::new(bar_rect.left() + 8.0, text_y), galley, Color32::TRANSPARENT);
    }

    // Handles sense clicks too so a press on them never reaches the body.
    let body = ui.interact(bar_rect, ui.make_persistent_id(("bar", row.id)), Sense::click());
    let left = ui.interact(
        edge_rect(bar_rect, Edge::Left),
        ui.make_persistent_id(("bar-left", row.id)),
        Sense::click_and_drag(),
    );
    let right = ui.interact(
        edge_rect(bar_rect, Edge::Right),
        ui.make_persistent_id(("bar-right", row.id)),
        Sense::click_and_drag(),
    );

    let dragging_this = drag.session().map(|s| s.row.id) == Some(row.id);
    if dragging_this {
        painter.rect_stroke(bar_rect, rounding, Stroke::new(1.5, theme::BORDER_ACCENT));
    }
    if body.hovered() || left.hovered() || right.hovered() || dragging_this {
        for edge in [Edge::Left, Edge::Right] {
            let handle = edge_rect(bar_rect, edge).intersect(bar_rect);
            painter.rect_filled(handle, Rounding::same(2.0), theme::HANDLE_COLOR);
        }
    }

    if left.hovered() || right.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    }

    // The session starts on the press itself, not after egui's drag
    // threshold, so the controller sees every pixel of movement.
    let press = ui.input(|i| {
        if i.pointer.primary_pressed() {
            i.pointer.press_origin()
        } else {
            None
        }
    });
    if let Some(origin) = press {
        let reachable = ui.clip_rect().contains(origin)
            && ui.ctx().layer_id_at(origin) == Some(ui.layer_id());
        if reachable {
            if let Some(edge) = hit_edge(bar_rect, origin) {
                if let Some(gesture) = drag.begin(row, edge, origin.x) {
                    gesture.hold();
                }
            }
        }
    }

    if body.hovered() && !left.hovered() && !right.hovered() && !drag.is_dragging() {
        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        egui::show_tooltip_at_pointer(ui.ctx(), ui.layer_id(), egui::Id::new(("bar-tip", row.id)), |ui| {
            ui.strong(row.label.trim());
            ui.label(format!(
                "{} → {}",
                row.display_start.format("%b %-d"),
                row.display_end.format("%b %-d"),
            ));
        });
    }

    if body.clicked() && !drag.is_dragging() {
        return Some(ChartAction::RowClicked(row.row_ref()));
    }
    None
}

/// Which resize handle, if any, sits under `pos`. On bars narrower than
/// both handles the nearer edge wins.
fn hit_edge(bar: Rect, pos: Pos2) -> Option<Edge> {
    let on_left = edge_rect(bar, Edge::Left).contains(pos);
    let on_right = edge_rect(bar, Edge::Right).contains(pos);
    match (on_left, on_right) {
        (true, true) if pos.x - bar.left() > bar.right() - pos.x => Some(Edge::Right),
        (true, _) => Some(Edge::Left),
        (false, true) => Some(Edge::Right),
        (false, false) => None,
    }
}

/// Resize handle straddling the bar's left or right edge.
fn edge_rect(bar: Rect, edge: Edge) -> Rect {
    let x = match edge {
        Edge::Left => bar.left(),
        Edge::Right => bar.right(),
    };
    Rect::from_min_max(
        Pos2::new(x - HANDLE_WIDTH / 2.0, bar.top()),
        Pos2::new(x + HANDLE_WIDTH / 2.0, bar.bottom()),
    )
}
