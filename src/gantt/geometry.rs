use chrono::{Duration, NaiveDate};

use super::axis::TimeAxis;

/// Horizontal placement of a bar as fractions of the axis width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPosition {
    pub left: f64,
    pub width: f64,
}

impl BarPosition {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Map to pixel `(x, width)` on an axis drawn `axis_width` wide from `origin_x`.
    pub fn to_pixels(&self, origin_x: f32, axis_width: f32) -> (f32, f32) {
        (
            origin_x + (self.left * axis_width as f64) as f32,
            (self.width * axis_width as f64) as f32,
        )
    }
}

impl TimeAxis {
    /// Place the inclusive range `start..=end` on the axis.
    ///
    /// Not clamped: a drag preview may run past either edge.
    pub fn position(&self, start: NaiveDate, end: NaiveDate) -> BarPosition {
        debug_assert!(start <= end, "bar range reversed: {} > {}", start, end);
        BarPosition {
            left: self.fraction(self.offset_days(start)),
            width: self.fraction((end - start).num_days() + 1),
        }
    }
}

/// The idle days before a task: `start - gap_days ..= start - 1`.
/// `None` for no gap, or one reaching past the calendar's first date.
pub fn gap_span(start: NaiveDate, gap_days: u32) -> Option<(NaiveDate, NaiveDate)> {
    if gap_days == 0 {
        return None;
    }
    Some((
        start.checked_sub_signed(Duration::days(i64::from(gap_days)))?,
        start.checked_sub_signed(Duration::days(1))?,
    ))
}
