//! Ctrl+scroll zoom, stepped once per gesture.
//!
//! egui reports zoom as a per-frame factor, so a single wheel flick or pinch
//! arrives spread over several frames. The stepper sums the factors in log
//! space and steps the view mode at most once until the input pauses.

/// Summed `ln(factor)` needed before a gesture steps the view mode.
const STEP_THRESHOLD: f32 = 0.15;
/// Seconds without zoom input that end a gesture.
const GESTURE_GAP: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
}

#[derive(Debug, Default)]
pub struct ZoomStepper {
    accum: f32,
    stepped: bool,
    last_input: Option<f64>,
}

impl ZoomStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's zoom factor, `now` in seconds.
    pub fn feed(&mut self, factor: f32, now: f64) -> Option<ZoomStep> {
        if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
            return None;
        }
        if self.last_input.map_or(true, |last| now - last > GESTURE_GAP) {
            self.accum = 0.0;
            self.stepped = false;
        }
        self.last_input = Some(now);
        if self.stepped {
            return None;
        }

        self.accum += factor.ln();
        let step = if self.accum >= STEP_THRESHOLD {
            ZoomStep::In
        } else if self.accum <= -STEP_THRESHOLD {
            ZoomStep::Out
        } else {
            return None;
        };
        self.stepped = true;
        tracing::debug!(?step, "zoom gesture");
        Some(step)
    }
}
