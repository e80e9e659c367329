//! Form validation for projects, tasks and capacity settings.

use chrono::NaiveDate;

use super::project::ProjectDraft;
use super::settings::{Holiday, Settings};
use super::task::TaskDraft;

/// Longest idle gap a task may carry before its start.
pub const MAX_GAP_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} name is required")]
    EmptyName(&'static str),
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("hours per day must be between 1 and 24 (got {0})")]
    HoursPerDay(u32),
    #[error("days per week must be between 1 and 7 (got {0})")]
    DaysPerWeek(u32),
    #[error("gap before a task must be at most {max} days (got {got})")]
    GapTooLarge { got: u32, max: u32 },
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    Ok(())
}

pub fn validate_project(draft: &ProjectDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName("project"));
    }
    check_range(draft.start, draft.end)
}

pub fn validate_task(draft: &TaskDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName("task"));
    }
    if draft.gap_days > MAX_GAP_DAYS {
        return Err(ValidationError::GapTooLarge {
            got: draft.gap_days,
            max: MAX_GAP_DAYS,
        });
    }
    check_range(draft.start, draft.end)
}

pub fn validate_holiday(holiday: &Holiday) -> Result<(), ValidationError> {
    check_range(holiday.start, holiday.end)
}

pub fn validate_settings(settings: &Settings) -> Result<(), ValidationError> {
    if !(1..=24).contains(&settings.hours_per_day) {
        return Err(ValidationError::HoursPerDay(settings.hours_per_day));
    }
    if !(1..=7).contains(&settings.days_per_week) {
        return Err(ValidationError::DaysPerWeek(settings.days_per_week));
    }
    settings.holidays.iter().try_for_each(validate_holiday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task_draft(name: &str, start: &str, end: &str) -> TaskDraft {
        TaskDraft {
            project_id: Uuid::nil(),
            name: name.into(),
            start: date(start),
            end: date(end),
            gap_days: 0,
        }
    }

    #[test]
    fn task_requires_name() {
        let draft = task_draft("   ", "2025-01-01", "2025-01-02");
        assert_eq!(validate_task(&draft), Err(ValidationError::EmptyName("task")));
    }

    #[test]
    fn task_rejects_reversed_range() {
        let draft = task_draft("Build", "2025-01-05", "2025-01-02");
        assert!(matches!(
            validate_task(&draft),
            Err(ValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn task_gap_is_bounded() {
        let mut draft = task_draft("Build", "2025-01-05", "2025-01-09");
        draft.gap_days = MAX_GAP_DAYS;
        assert_eq!(validate_task(&draft), Ok(()));
        draft.gap_days = u32::MAX;
        assert_eq!(
            validate_task(&draft),
            Err(ValidationError::GapTooLarge {
                got: u32::MAX,
                max: MAX_GAP_DAYS
            })
        );
    }

    #[test]
    fn single_day_task_is_valid() {
        let draft = task_draft("Launch", "2025-01-05", "2025-01-05");
        assert_eq!(validate_task(&draft), Ok(()));
    }

    #[test]
    fn settings_bounds() {
        let mut s = Settings::default();
        assert_eq!(validate_settings(&s), Ok(()));
        s.hours_per_day = 25;
        assert_eq!(validate_settings(&s), Err(ValidationError::HoursPerDay(25)));
        s.hours_per_day = 8;
        s.days_per_week = 0;
        assert_eq!(validate_settings(&s), Err(ValidationError::DaysPerWeek(0)));
    }

    #[test]
    fn settings_checks_holidays() {
        let s = Settings {
            holidays: vec![Holiday::new(date("2025-12-26"), date("2025-12-24"))],
            ..Default::default()
        };
        assert!(validate_settings(&s).is_err());
    }
}
