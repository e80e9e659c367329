//! Gantt timeline engine: row projection, axis layout, bar geometry,
//! holiday overlay and edge-drag resizing. Pure computation, redone every frame.

pub mod axis;
pub mod drag;
pub mod frame;
pub mod geometry;
pub mod holidays;
pub mod rows;

pub use axis::{HeaderBucket, Marker, TimeAxis};
pub use drag::{DateCommit, DragController, DragOutcome, DragPreview, Edge, PointerEvent};
pub use frame::{FrameInputs, TimelineFrame};
pub use geometry::{gap_span, BarPosition};
pub use holidays::{holiday_segments, HolidaySegment};
pub use rows::{group_tasks, project_rows, ItemKind, ProjectItem, Row, RowKind, RowRef};
