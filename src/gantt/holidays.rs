use chrono::{Duration, NaiveDate};

use super::axis::TimeAxis;
use crate::model::Holiday;

/// Smallest band width, so single days stay visible on coarse axes.
pub const MIN_HOLIDAY_WIDTH: f64 = 0.003;

/// A one-day holiday band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolidaySegment {
    pub date: NaiveDate,
    pub left: f64,
    pub width: f64,
}

/// One segment per holiday day inside the axis. Days outside are dropped.
pub fn holiday_segments(holidays: &[Holiday], axis: &TimeAxis) -> Vec<HolidaySegment> {
    let width = axis.fraction(1).max(MIN_HOLIDAY_WIDTH);
    let mut segments = Vec::new();

    for holiday in holidays {
        let first = holiday.start.max(axis.range_start);
        let last = holiday.end.min(axis.range_end);

        let mut day = first;
        while day <= last {
            segments.push(HolidaySegment {
                date: day,
                left: axis.fraction(axis.offset_days(day)),
                width,
            });
            day += Duration::days(1);
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ViewMode;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn month_axis() -> TimeAxis {
        TimeAxis::from_range(date("2025-01-01"), date("2025-06-30"), ViewMode::Month)
    }

    #[test]
    fn new_years_day_is_one_segment() {
        let axis = month_axis();
        let segments = holiday_segments(&[Holiday::single(date("2025-01-01"))], &axis);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].date, date("2025-01-01"));
        assert_eq!(segments[0].left, 0.0);
    }

    #[test]
    fn range_expands_per_day() {
        let axis = month_axis();
        let segments = holiday_segments(
            &[Holiday::new(date("2025-04-18"), date("2025-04-21"))],
            &axis,
        );
        let dates: Vec<NaiveDate> = segments.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                date("2025-04-18"),
                date("2025-04-19"),
                date("2025-04-20"),
                date("2025-04-21")
            ]
        );
    }

    #[test]
    fn days_outside_axis_are_dropped() {
        let axis = month_axis();
        let segments = holiday_segments(
            &[
                Holiday::new(date("2024-12-24"), date("2025-01-02")),
                Holiday::new(date("2025-06-29"), date("2025-07-03")),
                Holiday::single(date("2025-08-15")),
            ],
            &axis,
        );
        let dates: Vec<NaiveDate> = segments.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                date("2025-01-01"),
                date("2025-01-02"),
                date("2025-06-29"),
                date("2025-06-30")
            ]
        );
        assert!(segments.iter().all(|s| s.left >= 0.0 && s.left < 1.0));
    }

    #[test]
    fn coarse_axis_uses_minimum_width() {
        let axis = TimeAxis::from_range(date("2025-01-01"), date("2026-12-31"), ViewMode::Year);
        let segments = holiday_segments(&[Holiday::single(date("2025-12-25"))], &axis);
        assert_eq!(segments[0].width, MIN_HOLIDAY_WIDTH);
    }

    #[test]
    fn fine_axis_uses_one_day_width() {
        let axis = TimeAxis::from_range(date("2025-01-01"), date("2025-01-14"), ViewMode::Day);
        let segments = holiday_segments(&[Holiday::single(date("2025-01-07"))], &axis);
        assert!((segments[0].width - 1.0 / 14.0).abs() < 1e-12);
    }
}
