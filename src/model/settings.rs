use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A holiday range, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Holiday {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
        }
    }

    /// A one-day holiday.
    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

/// Global capacity settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hours_per_day: u32,
    pub days_per_week: u32,
    pub holidays: Vec<Holiday>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hours_per_day: 8,
            days_per_week: 5,
            holidays: Vec::new(),
        }
    }
}

impl Settings {
    /// Short summary for the toolbar, e.g. "8 hrs/day • 5 days/week".
    pub fn capacity_label(&self) -> String {
        format!(
            "{} hrs/day • {} days/week",
            self.hours_per_day, self.days_per_week
        )
    }
}
