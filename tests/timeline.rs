use std::collections::HashSet;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use uuid::Uuid;

use timetracker::gantt::{
    gap_span, DateCommit, DragController, DragOutcome, Edge, FrameInputs, ItemKind, PointerEvent,
    RowKind, TimelineFrame,
};
use timetracker::io::{JsonFileStore, MemoryStore, StoreData, TimelineStore};
use timetracker::model::project::{ProjectDraft, DEFAULT_PROJECT_COLOR};
use timetracker::model::task::TaskDraft;
use timetracker::model::{DateChanges, Holiday, Settings, ViewMode};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn project(name: &str, start: &str, end: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.into(),
        start: date(start),
        end: date(end),
        color: DEFAULT_PROJECT_COLOR,
        notes: String::new(),
    }
}

fn task(project_id: Uuid, name: &str, start: &str, end: &str, gap_days: u32) -> TaskDraft {
    TaskDraft {
        project_id,
        name: name.into(),
        start: date(start),
        end: date(end),
        gap_days,
    }
}

/// One project (Jan 15 - Mar 30) with a single "Design" task (Feb 5 - Feb 20, gap 5).
fn website_store() -> (MemoryStore, Uuid, Uuid) {
    let mut store = MemoryStore::new();
    let p = store
        .create_project(project("Website", "2025-01-15", "2025-03-30"))
        .unwrap();
    let t = store
        .create_task(task(p.id, "Design", "2025-02-05", "2025-02-20", 5))
        .unwrap();
    (store, p.id, t.id)
}

fn frame_for(
    store: &impl TimelineStore,
    collapsed: &HashSet<Uuid>,
    mode: ViewMode,
    drag: &DragController,
) -> TimelineFrame {
    TimelineFrame::compute(FrameInputs {
        projects: store.list_projects(),
        tasks: store.all_tasks(),
        collapsed,
        mode,
        holidays: store.holiday_settings(),
        preview: drag.preview(),
        today: date("2025-01-01"),
    })
}

#[test]
fn month_axis_covers_both_projects_with_holiday() {
    let mut store = MemoryStore::new();
    store
        .create_project(project("Website", "2025-01-15", "2025-03-30"))
        .unwrap();
    store
        .create_project(project("Mobile", "2025-02-01", "2025-05-15"))
        .unwrap();
    store
        .update_settings(Settings {
            holidays: vec![Holiday::single(date("2025-01-01"))],
            ..Settings::default()
        })
        .unwrap();

    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &DragController::new());

    assert_eq!(frame.axis.range_start, date("2025-01-01"));
    assert_eq!(frame.axis.range_end, date("2025-06-30"));
    let labels: Vec<&str> = frame.axis.headers.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Jan 2025", "Feb 2025", "Mar 2025", "Apr 2025", "May 2025", "Jun 2025"]
    );
    let total: f64 = frame.axis.headers.iter().map(|h| h.width).sum();
    assert!((total - 1.0).abs() < 1e-9);

    assert_eq!(frame.holidays.len(), 1);
    assert_eq!(frame.holidays[0].date, date("2025-01-01"));
    assert_eq!(frame.holidays[0].left, 0.0);

    for row in &frame.rows {
        assert!(frame.axis.contains(row.start));
        assert!(frame.axis.contains(row.end));
    }
}

#[test]
fn task_gap_bar_sits_before_task() {
    let (store, _, task_id) = website_store();
    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &DragController::new());

    let row = frame.rows.iter().find(|r| r.id == task_id).unwrap();
    let (gap_start, gap_end) = gap_span(row.display_start, row.gap_days()).unwrap();
    assert_eq!(gap_start, date("2025-01-31"));
    assert_eq!(gap_end, date("2025-02-04"));

    let gap = frame.axis.position(gap_start, gap_end);
    let bar = frame.axis.position(row.display_start, row.display_end);
    assert!((gap.right() - bar.left).abs() < 1e-9);
}

#[test]
fn right_edge_drag_commits_end_date_to_store() {
    let (mut store, project_id, task_id) = website_store();
    let collapsed = HashSet::new();
    let mut drag = DragController::new();

    let frame = frame_for(&store, &collapsed, ViewMode::Month, &drag);
    // Jan 1 - Apr 30: 120 days over 1200 px
    assert_eq!(frame.axis.total_days, 120);
    let row = frame.rows.iter().find(|r| r.id == task_id).unwrap().clone();

    drag.begin(&row, Edge::Right, 500.0).unwrap().hold();
    drag.handle(PointerEvent::Moved {
        x: 553.0,
        axis_width: 1200.0,
        total_days: frame.axis.total_days,
    });

    // The preview moves the bar without touching the store or the axis.
    let previewed = frame_for(&store, &collapsed, ViewMode::Month, &drag);
    let preview_row = previewed.rows.iter().find(|r| r.id == task_id).unwrap();
    assert_eq!(preview_row.display_end, date("2025-02-25"));
    assert_eq!(preview_row.end, date("2025-02-20"));
    assert_eq!(previewed.axis.range_end, frame.axis.range_end);
    assert_eq!(store.task(task_id).unwrap().end, date("2025-02-20"));

    let outcome = drag.handle(PointerEvent::Released);
    let Some(DragOutcome::Commit(DateCommit { row: target, changes })) = outcome else {
        panic!("expected a commit, got {:?}", outcome);
    };
    assert_eq!(target.kind, ItemKind::Task);
    assert_eq!(changes, DateChanges::end(date("2025-02-25")));

    let updated = store.update_task_dates(target.id, changes).unwrap();
    assert_eq!(updated.start, date("2025-02-05"));
    assert_eq!(updated.end, date("2025-02-25"));
    assert_eq!(store.project(project_id).unwrap().end, date("2025-03-30"));

    let after = frame_for(&store, &collapsed, ViewMode::Month, &drag);
    let row = after.rows.iter().find(|r| r.id == task_id).unwrap();
    assert_eq!(row.display_end, date("2025-02-25"));
}

#[test]
fn tiny_movement_is_a_click_and_leaves_store_alone() {
    let (store, project_id, _) = website_store();
    let mut drag = DragController::new();
    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &drag);
    let project_row = frame.rows.iter().find(|r| r.id == project_id).unwrap();

    drag.begin(project_row, Edge::Left, 300.0).unwrap().hold();
    drag.handle(PointerEvent::Moved {
        x: 302.0,
        axis_width: 1200.0,
        total_days: frame.axis.total_days,
    });
    let outcome = drag.handle(PointerEvent::Released);

    assert_eq!(outcome, Some(DragOutcome::Click(project_row.row_ref())));
    assert_eq!(drag.preview(), None);
    assert_eq!(store.project(project_id).unwrap().start, date("2025-01-15"));
}

#[test]
fn project_left_edge_drag_updates_only_start() {
    let (mut store, project_id, _) = website_store();
    let mut drag = DragController::new();
    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &drag);
    let project_row = frame.rows.iter().find(|r| r.id == project_id).unwrap();

    drag.begin(project_row, Edge::Left, 300.0).unwrap().hold();
    drag.handle(PointerEvent::Moved {
        x: 200.0,
        axis_width: 1200.0,
        total_days: frame.axis.total_days,
    });
    let Some(DragOutcome::Commit(commit)) = drag.handle(PointerEvent::CaptureLost) else {
        panic!("expected a commit");
    };
    assert_eq!(commit.row.kind, ItemKind::Project);

    let updated = store.update_project_dates(commit.row.id, commit.changes).unwrap();
    assert_eq!(updated.start, date("2025-01-05"));
    assert_eq!(updated.end, date("2025-03-30"));
}

#[test]
fn collapse_and_archive_hide_task_rows() {
    let (mut store, project_id, task_id) = website_store();
    let drag = DragController::new();

    let mut collapsed = HashSet::new();
    collapsed.insert(project_id);
    let frame = frame_for(&store, &collapsed, ViewMode::Week, &drag);
    assert_eq!(frame.rows.len(), 1);
    assert_eq!(
        frame.rows[0].kind,
        RowKind::Project {
            has_tasks: true,
            collapsed: true,
        }
    );

    store.toggle_task_archived(task_id).unwrap();
    let frame = frame_for(&store, &HashSet::new(), ViewMode::Week, &drag);
    assert_eq!(frame.rows.len(), 1);
    // Archived tasks still count, so the toggle stays available.
    assert_eq!(
        frame.rows[0].kind,
        RowKind::Project {
            has_tasks: true,
            collapsed: false,
        }
    );
}

#[test]
fn empty_store_gives_default_window() {
    let store = MemoryStore::new();
    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &DragController::new());
    assert!(frame.is_empty());
    assert_eq!(frame.axis.range_start, date("2025-01-01"));
    assert_eq!(frame.axis.range_end, date("2025-03-31"));
    assert_eq!(frame.axis.total_days, 90);
}

#[test]
fn committed_dates_survive_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timeline.json");
    let mut store = JsonFileStore::open_or_seed(&path, || StoreData::sample(date("2025-01-01"))).unwrap();

    let drag = DragController::new();
    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &drag);
    let row = frame.rows.iter().find(|r| !r.is_project()).unwrap().clone();
    let new_end = row.end + chrono::Duration::days(4);
    store
        .update_task_dates(row.id, DateChanges::end(new_end))
        .unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    let task = reopened.task(row.id).unwrap();
    assert_eq!(task.end, new_end);
    assert_eq!(task.start, row.start);
    assert_eq!(reopened.list_projects().len(), 2);
}

#[test]
fn deleting_project_drops_its_rows() {
    let (mut store, project_id, task_id) = website_store();
    store.delete_project(project_id).unwrap();
    assert!(store.task(task_id).is_none());

    let frame = frame_for(&store, &HashSet::new(), ViewMode::Month, &DragController::new());
    assert!(frame.is_empty());
}
