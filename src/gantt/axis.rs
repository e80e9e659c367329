//! Visible time axis: range, header buckets and sub-grid markers.

use chrono::{Datelike, Duration, NaiveDate};

use super::rows::Row;
use crate::model::ViewMode;

/// Length of the placeholder window shown when there is nothing to plot.
pub const EMPTY_WINDOW_DAYS: i64 = 90;

/// One header cell. `width` is a fraction of the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBucket {
    pub start: NaiveDate,
    /// Last day covered, clipped to the axis end.
    pub end: NaiveDate,
    pub label: String,
    pub width: f64,
}

impl HeaderBucket {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A vertical grid line at `position` (fraction of the axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub date: NaiveDate,
    pub position: f64,
}

/// The visible date window and its derived layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub mode: ViewMode,
    pub range_start: NaiveDate,
    /// Inclusive.
    pub range_end: NaiveDate,
    /// Calendar days covered by the axis, `range_end - range_start + 1`.
    pub total_days: i64,
    pub headers: Vec<HeaderBucket>,
    /// Month grouping above the day headers. Empty outside day mode.
    pub group_headers: Vec<HeaderBucket>,
    pub markers: Vec<Marker>,
}

impl TimeAxis {
    /// Derive the axis covering every row's own dates.
    ///
    /// Drag previews are ignored so the axis stays put during a gesture.
    pub fn build(rows: &[Row], mode: ViewMode, today: NaiveDate) -> Self {
        let min = rows.iter().map(|r| r.start.min(r.end)).min();
        let max = rows.iter().map(|r| r.end.max(r.start)).max();

        let (range_start, range_end) = match (min, max) {
            (Some(min), Some(max)) => snap_range(min, max, mode),
            _ => {
                let start = start_of_month(today);
                (start, start + Duration::days(EMPTY_WINDOW_DAYS - 1))
            }
        };
        Self::from_range(range_start, range_end, mode)
    }

    /// Lay out buckets and markers for an already snapped range.
    pub fn from_range(range_start: NaiveDate, range_end: NaiveDate, mode: ViewMode) -> Self {
        let total_days = ((range_end - range_start).num_days() + 1).max(0);
        let mut axis = Self {
            mode,
            range_start,
            range_end,
            total_days,
            headers: Vec::new(),
            group_headers: Vec::new(),
            markers: Vec::new(),
        };

        if total_days == 0 {
            axis.headers.push(HeaderBucket {
                start: range_start,
                end: range_start,
                label: bucket_label(mode, range_start),
                width: 1.0,
            });
            return axis;
        }

        axis.headers = axis.buckets(|d| unit_end(mode, d), |d| bucket_label(mode, d));
        if mode == ViewMode::Day {
            axis.group_headers = axis.buckets(end_of_month, |d| d.format("%B").to_string());
        }
        axis.markers = axis.sub_markers();
        axis
    }

    /// Fraction of the axis covered by `days`. A zero-length axis counts as one day.
    pub fn fraction(&self, days: i64) -> f64 {
        days as f64 / self.total_days.max(1) as f64
    }

    /// Whole days from `range_start` to `date` (negative before the axis).
    pub fn offset_days(&self, date: NaiveDate) -> i64 {
        (date - self.range_start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.range_start && date <= self.range_end
    }

    pub fn header_total(&self) -> f64 {
        self.headers.iter().map(|b| b.width).sum()
    }

    fn buckets(
        &self,
        unit_end: impl Fn(NaiveDate) -> NaiveDate,
        label: impl Fn(NaiveDate) -> String,
    ) -> Vec<HeaderBucket> {
        let mut buckets = Vec::new();
        let mut cursor = self.range_start;
        while cursor <= self.range_end {
            let end = unit_end(cursor);
            let clipped = end.min(self.range_end);
            buckets.push(HeaderBucket {
                start: cursor,
                end: clipped,
                label: label(cursor),
                width: self.fraction((clipped - cursor).num_days() + 1),
            });
            cursor = end + Duration::days(1);
        }
        buckets
    }

    fn sub_markers(&self) -> Vec<Marker> {
        let first = match self.mode {
            ViewMode::Day => self.range_start,
            ViewMode::Week | ViewMode::Month => next_monday(self.range_start),
            ViewMode::Year => next_month_start(self.range_start),
        };

        let mut markers = Vec::new();
        let mut date = first;
        while date <= self.range_end {
            markers.push(Marker {
                date,
                position: self.fraction(self.offset_days(date)),
            });
            date = match self.mode {
                ViewMode::Day => date + Duration::days(1),
                ViewMode::Week | ViewMode::Month => date + Duration::days(7),
                ViewMode::Year => end_of_month(date) + Duration::days(1),
            };
        }
        markers
    }
}

/// Pad `[min, max]` by the mode's look-ahead and snap to calendar boundaries.
pub fn snap_range(min: NaiveDate, max: NaiveDate, mode: ViewMode) -> (NaiveDate, NaiveDate) {
    match mode {
        ViewMode::Day => (min, max + Duration::days(7)),
        ViewMode::Week => (start_of_week(min), end_of_week(max + Duration::days(14))),
        ViewMode::Month => (start_of_month(min), end_of_month(max + Duration::days(30))),
        ViewMode::Year => (start_of_year(min), end_of_year(max + Duration::days(365))),
    }
}

fn unit_end(mode: ViewMode, date: NaiveDate) -> NaiveDate {
    match mode {
        ViewMode::Day => date,
        ViewMode::Week => end_of_week(date),
        ViewMode::Month => end_of_month(date),
        ViewMode::Year => end_of_year(date),
    }
}

fn bucket_label(mode: ViewMode, date: NaiveDate) -> String {
    match mode {
        ViewMode::Day => date.day().to_string(),
        ViewMode::Week => format!("Week {}", date.iso_week().week()),
        ViewMode::Month => date.format("%b %Y").to_string(),
        ViewMode::Year => date.year().to_string(),
    }
}

// ── Calendar boundaries (Monday-start weeks) ────────────────────────────────

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    // Day 32 of any month lands in the next one.
    start_of_month(start_of_month(date) + Duration::days(31)) - Duration::days(1)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

pub fn end_of_year(date: NaiveDate) -> NaiveDate {
    start_of_year(start_of_year(date) + Duration::days(366)) - Duration::days(1)
}

fn next_monday(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as i64;
    if back == 0 {
        date
    } else {
        date + Duration::days(7 - back)
    }
}

fn next_month_start(date: NaiveDate) -> NaiveDate {
    if date.day() == 1 {
        date
    } else {
        end_of_month(date) + Duration::days(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gantt::rows::{group_tasks, project_rows};
    use crate::model::{Project, Task};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_projects() -> Vec<Project> {
        vec![
            Project::new("Website", date("2025-01-15"), date("2025-03-30")),
            Project::new("Mobile", date("2025-02-01"), date("2025-05-15")),
        ]
    }

    fn rows_for(projects: &[Project], tasks: &[Task]) -> Vec<Row> {
        project_rows(&group_tasks(projects, tasks), &HashSet::new(), None)
    }

    fn assert_covers(axis: &TimeAxis) {
        let total: f64 = axis.headers.iter().map(|b| b.width).sum();
        assert!((total - 1.0).abs() < 1e-9, "{:?} headers sum to {}", axis.mode, total);
    }

    #[test]
    fn month_axis_scenario() {
        let projects = sample_projects();
        let rows = rows_for(&projects, &[]);
        let axis = TimeAxis::build(&rows, ViewMode::Month, date("2030-01-01"));

        assert_eq!(axis.range_start, date("2025-01-01"));
        assert_eq!(axis.range_end, date("2025-06-30"));
        assert_eq!(axis.total_days, 181);
        let labels: Vec<&str> = axis.headers.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Jan 2025", "Feb 2025", "Mar 2025", "Apr 2025", "May 2025", "Jun 2025"]
        );
        assert_eq!(axis.headers[1].days(), 28);
        assert_covers(&axis);
    }

    #[test]
    fn month_markers_fall_on_mondays_inside_axis() {
        let rows = rows_for(&sample_projects(), &[]);
        let axis = TimeAxis::build(&rows, ViewMode::Month, date("2030-01-01"));
        // 2025-01-01 is a Wednesday.
        assert_eq!(axis.markers[0].date, date("2025-01-06"));
        assert!(axis
            .markers
            .iter()
            .all(|m| m.date.weekday() == chrono::Weekday::Mon));
        assert!(axis.markers.iter().all(|m| (0.0..1.0).contains(&m.position)));
    }

    #[test]
    fn every_mode_covers_items_and_sums_to_one() {
        let projects = sample_projects();
        let tasks = vec![Task::new(
            projects[0].id,
            "Late",
            date("2025-12-20"),
            date("2026-01-04"),
        )];
        let rows = rows_for(&projects, &tasks);
        for mode in ViewMode::ALL {
            let axis = TimeAxis::build(&rows, mode, date("2030-01-01"));
            for row in &rows {
                assert!(axis.contains(row.start), "{:?} misses {}", mode, row.start);
                assert!(axis.contains(row.end), "{:?} misses {}", mode, row.end);
            }
            assert_covers(&axis);
        }
    }

    #[test]
    fn week_axis_snaps_to_monday_and_sunday() {
        let projects = vec![Project::new("P", date("2025-01-15"), date("2025-01-20"))];
        let axis = TimeAxis::build(&rows_for(&projects, &[]), ViewMode::Week, date("2030-01-01"));
        assert_eq!(axis.range_start, date("2025-01-13"));
        // 2025-01-20 + 14 = 2025-02-03 (Mon), week ends Sunday 2025-02-09.
        assert_eq!(axis.range_end, date("2025-02-09"));
        assert_eq!(axis.total_days, 28);
        assert_eq!(axis.headers.len(), 4);
        assert!(axis.headers.iter().all(|b| b.days() == 7));
        assert_eq!(axis.headers[0].label, "Week 3");
        assert_eq!(axis.markers.len(), 4);
        assert_eq!(axis.markers[1].position, 0.25);
    }

    #[test]
    fn day_axis_groups_days_by_month() {
        let projects = vec![Project::new("P", date("2025-01-28"), date("2025-02-02"))];
        let axis = TimeAxis::build(&rows_for(&projects, &[]), ViewMode::Day, date("2030-01-01"));
        assert_eq!(axis.range_start, date("2025-01-28"));
        assert_eq!(axis.range_end, date("2025-02-09"));
        assert_eq!(axis.headers.len(), 13);
        assert_eq!(axis.headers[0].label, "28");
        let groups: Vec<(&str, i64)> = axis
            .group_headers
            .iter()
            .map(|b| (b.label.as_str(), b.days()))
            .collect();
        assert_eq!(groups, vec![("January", 4), ("February", 9)]);
        let group_total: f64 = axis.group_headers.iter().map(|b| b.width).sum();
        assert!((group_total - 1.0).abs() < 1e-9);
        assert_eq!(axis.markers.len(), 13);
    }

    #[test]
    fn year_axis_clips_nothing_and_marks_months() {
        let projects = vec![Project::new("P", date("2025-03-10"), date("2025-04-01"))];
        let axis = TimeAxis::build(&rows_for(&projects, &[]), ViewMode::Year, date("2030-01-01"));
        assert_eq!(axis.range_start, date("2025-01-01"));
        assert_eq!(axis.range_end, date("2026-12-31"));
        assert_eq!(axis.headers.len(), 2);
        assert_eq!(axis.headers[1].label, "2026");
        assert_eq!(axis.markers.len(), 24);
        assert_eq!(axis.markers[0].position, 0.0);
        assert_covers(&axis);
    }

    #[test]
    fn empty_rows_default_to_ninety_days_from_month_start() {
        let axis = TimeAxis::build(&[], ViewMode::Month, date("2025-07-19"));
        assert_eq!(axis.range_start, date("2025-07-01"));
        assert_eq!(axis.total_days, 90);
        assert_eq!(axis.range_end, date("2025-09-28"));
        // Last month bucket is clipped to the window.
        assert_eq!(axis.headers.last().map(|b| b.days()), Some(28));
        assert_covers(&axis);
    }

    #[test]
    fn collapsed_tasks_do_not_stretch_axis() {
        let projects = vec![Project::new("P", date("2025-01-10"), date("2025-01-20"))];
        let tasks = vec![Task::new(projects[0].id, "Far", date("2025-09-01"), date("2025-09-10"))];
        let collapsed: HashSet<_> = [projects[0].id].into_iter().collect();
        let rows = project_rows(&group_tasks(&projects, &tasks), &collapsed, None);
        let axis = TimeAxis::build(&rows, ViewMode::Month, date("2030-01-01"));
        assert_eq!(axis.range_end, date("2025-02-28"));
    }

    #[test]
    fn zero_length_range_is_single_full_bucket() {
        let axis = TimeAxis::from_range(date("2025-01-02"), date("2025-01-01"), ViewMode::Month);
        assert_eq!(axis.total_days, 0);
        assert_eq!(axis.headers.len(), 1);
        assert_eq!(axis.headers[0].width, 1.0);
        assert!(axis.fraction(1).is_finite());
    }

    #[test]
    fn calendar_boundaries() {
        assert_eq!(end_of_month(date("2024-02-10")), date("2024-02-29"));
        assert_eq!(end_of_month(date("2025-12-31")), date("2025-12-31"));
        assert_eq!(start_of_week(date("2025-01-05")), date("2024-12-30"));
        assert_eq!(end_of_year(date("2024-06-01")), date("2024-12-31"));
        assert_eq!(start_of_year(date("2024-12-31")), date("2024-01-01"));
    }
}
