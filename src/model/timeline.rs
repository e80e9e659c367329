use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Zoom granularity of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Day, ViewMode::Week, ViewMode::Month, ViewMode::Year];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Year => "Year",
        }
    }

    /// Next finer granularity (Year → Month → Week → Day).
    pub fn zoom_in(self) -> Self {
        match self {
            ViewMode::Year => ViewMode::Month,
            ViewMode::Month => ViewMode::Week,
            ViewMode::Week | ViewMode::Day => ViewMode::Day,
        }
    }

    /// Next coarser granularity (Day → Week → Month → Year).
    pub fn zoom_out(self) -> Self {
        match self {
            ViewMode::Day => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
            ViewMode::Month | ViewMode::Year => ViewMode::Year,
        }
    }
}

/// Partial date update sent to the store. Absent fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateChanges {
    pub fn start(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: None,
        }
    }

    pub fn end(date: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Apply to an inclusive (start, end) pair.
    pub fn apply(&self, start: &mut NaiveDate, end: &mut NaiveDate) {
        if let Some(s) = self.start {
            *start = s;
        }
        if let Some(e) = self.end {
            *end = e;
        }
    }
}
