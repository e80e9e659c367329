use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use super::axis::TimeAxis;
use super::drag::DragPreview;
use super::holidays::{holiday_segments, HolidaySegment};
use super::rows::{group_tasks, project_rows, Row};
use crate::model::{Holiday, Project, Task, ViewMode};

/// Everything the chart needs to draw one frame.
#[derive(Debug, Clone)]
pub struct TimelineFrame {
    pub rows: Vec<Row>,
    pub axis: TimeAxis,
    pub holidays: Vec<HolidaySegment>,
}

/// Inputs for [`TimelineFrame::compute`].
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub projects: &'a [Project],
    pub tasks: &'a [Task],
    pub collapsed: &'a HashSet<Uuid>,
    pub mode: ViewMode,
    pub holidays: &'a [Holiday],
    pub preview: Option<&'a DragPreview>,
    pub today: NaiveDate,
}

impl TimelineFrame {
    /// Project rows, then lay out the axis and holiday bands against it.
    pub fn compute(inputs: FrameInputs<'_>) -> Self {
        let items = group_tasks(inputs.projects, inputs.tasks);
        let rows = project_rows(&items, inputs.collapsed, inputs.preview);
        let axis = TimeAxis::build(&rows, inputs.mode, inputs.today);
        let holidays = holiday_segments(inputs.holidays, &axis);
        Self {
            rows,
            axis,
            holidays,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
