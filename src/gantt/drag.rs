//! Edge-drag resizing of timeline bars.
//!
//! `Idle -> Dragging(session) -> Idle`. Pointer events are only accepted
//! while a session is live; every way out of `Dragging` goes through
//! [`DragController::finish`], which clears session and preview together.
//!
//! Pointer routing is scoped by [`DragGesture`]: the caller takes one per
//! frame while a session is live and must either release it or `hold` it.
//! Dropping it any other way releases the gesture.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::rows::{Row, RowRef};
use crate::model::DateChanges;

/// Total pointer travel below which a gesture counts as a click.
pub const CLICK_THRESHOLD_PX: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

/// State captured when a bar edge is pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub row: RowRef,
    pub edge: Edge,
    pub pointer_start_x: f32,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
}

/// Live dates shown for the dragged row. Never written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub row_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A date change ready to hand to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCommit {
    pub row: RowRef,
    pub changes: DateChanges,
}

/// How a gesture resolved. Drag and click are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Commit(DateCommit),
    Click(RowRef),
}

/// Pointer input routed to an active gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved {
        x: f32,
        /// Pixel width of the drawn axis.
        axis_width: f32,
        total_days: i64,
    },
    Released,
    /// Capture lost (window blur, pointer gone). Resolves like a release.
    CaptureLost,
}

/// Owns the single drag session and its preview.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    preview: Option<DragPreview>,
    /// Largest |dx| seen during the gesture.
    travel: f32,
    /// Set when a dropped gesture released the session.
    released: Option<DragOutcome>,
}

/// One frame's pointer routing for a live gesture.
///
/// Consume it with [`release`](Self::release), [`capture_lost`](Self::capture_lost)
/// or [`hold`](Self::hold). Dropped otherwise, it ends the gesture and the
/// outcome is kept for [`DragController::take_released`].
#[must_use = "dropping a gesture releases it"]
#[derive(Debug)]
pub struct DragGesture<'a> {
    controller: &'a mut DragController,
    held: bool,
}

impl<'a> DragGesture<'a> {
    fn new(controller: &'a mut DragController) -> Self {
        Self {
            controller,
            held: false,
        }
    }

    pub fn moved(&mut self, x: f32, axis_width: f32, total_days: i64) {
        self.controller.handle(PointerEvent::Moved {
            x,
            axis_width,
            total_days,
        });
    }

    /// Pointer still down: keep the session for the next frame.
    pub fn hold(mut self) {
        self.held = true;
    }

    pub fn release(mut self) -> Option<DragOutcome> {
        self.held = true;
        self.controller.handle(PointerEvent::Released)
    }

    pub fn capture_lost(mut self) -> Option<DragOutcome> {
        self.held = true;
        self.controller.handle(PointerEvent::CaptureLost)
    }
}

impl Drop for DragGesture<'_> {
    fn drop(&mut self) {
        if self.held {
            return;
        }
        if let Some(outcome) = self.controller.finish() {
            tracing::debug!(?outcome, "gesture dropped, released");
            self.controller.released = Some(outcome);
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        self.preview.as_ref()
    }

    /// True once the pointer has travelled far enough to count as a drag.
    pub fn has_moved(&self) -> bool {
        self.travel >= CLICK_THRESHOLD_PX
    }

    /// Start a gesture on `row`'s `edge`. Ignored while another is live.
    pub fn begin(&mut self, row: &Row, edge: Edge, pointer_x: f32) -> Option<DragGesture<'_>> {
        if self.session.is_some() {
            tracing::debug!(row = %row.id, "drag already in progress, ignoring press");
            return None;
        }
        tracing::debug!(row = %row.id, ?edge, "drag started");
        self.session = Some(DragSession {
            row: row.row_ref(),
            edge,
            pointer_start_x: pointer_x,
            original_start: row.start,
            original_end: row.end,
        });
        self.preview = None;
        self.travel = 0.0;
        self.released = None;
        Some(DragGesture::new(self))
    }

    /// Routing handle for the live gesture, if any.
    pub fn gesture(&mut self) -> Option<DragGesture<'_>> {
        if self.session.is_none() {
            return None;
        }
        Some(DragGesture::new(self))
    }

    /// Outcome of a gesture ended by dropping its [`DragGesture`].
    pub fn take_released(&mut self) -> Option<DragOutcome> {
        self.released.take()
    }

    /// Feed a pointer event. Returns the outcome when the gesture ends.
    pub fn handle(&mut self, event: PointerEvent) -> Option<DragOutcome> {
        self.session.as_ref()?;
        match event {
            PointerEvent::Moved {
                x,
                axis_width,
                total_days,
            } => {
                self.pointer_moved(x, axis_width, total_days);
                None
            }
            PointerEvent::Released => self.finish(),
            PointerEvent::CaptureLost => {
                tracing::debug!("pointer capture lost, releasing drag");
                self.finish()
            }
        }
    }

    fn pointer_moved(&mut self, x: f32, axis_width: f32, total_days: i64) {
        let Some(session) = &self.session else {
            return;
        };
        let dx = x - session.pointer_start_x;
        self.travel = self.travel.max(dx.abs());

        let delta = Duration::days(delta_days(dx, axis_width, total_days));
        let (start, end) = match session.edge {
            Edge::Left => {
                let mut start = session.original_start + delta;
                if start >= session.original_end {
                    start = session.original_end - Duration::days(1);
                }
                (start, session.original_end)
            }
            Edge::Right => {
                let mut end = session.original_end + delta;
                if end <= session.original_start {
                    end = session.original_start + Duration::days(1);
                }
                (session.original_start, end)
            }
        };
        self.preview = Some(DragPreview {
            row_id: session.row.id,
            start,
            end,
        });
    }

    /// End the gesture, clearing session and preview in one step.
    fn finish(&mut self) -> Option<DragOutcome> {
        let session = self.session.take()?;
        let preview = self.preview.take();
        let moved = std::mem::take(&mut self.travel) >= CLICK_THRESHOLD_PX;

        let outcome = match preview {
            Some(preview) if moved => {
                let changes = match session.edge {
                    Edge::Left => DateChanges::start(preview.start),
                    Edge::Right => DateChanges::end(preview.end),
                };
                tracing::debug!(row = %session.row.id, ?changes, "drag committed");
                DragOutcome::Commit(DateCommit {
                    row: session.row,
                    changes,
                })
            }
            _ => DragOutcome::Click(session.row),
        };
        Some(outcome)
    }
}

/// Convert horizontal travel into whole days on an axis `axis_width` px wide.
pub fn delta_days(dx: f32, axis_width: f32, total_days: i64) -> i64 {
    if axis_width <= 0.0 {
        return 0;
    }
    (dx as f64 / axis_width as f64 * total_days as f64).round() as i64
}
