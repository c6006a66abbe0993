//! Viewport transform controller.
//!
//! Maintains the pan offset and zoom scale for the display surface and turns
//! pointer input into a 2D affine transform. Zoom is tracked in log space so
//! wheel deltas compose additively, and every zoom step is re-anchored at the
//! cursor: the image point under the pointer stays visually fixed, otherwise
//! the sheet jumps toward the origin on every wheel tick.
//!
//! All state lives in an explicit object owned by the controller and is
//! mutated only through its event methods; event ordering on the single
//! execution context is the only serialization needed.

use crate::utils::{Matrix, Point};

/// Wheel-delta to log-scale factor.
pub const ZOOM_SENSITIVITY: f64 = 0.01;

/// Pan offset and zoom scale for the display surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pan: Point,
    log_scale: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            pan: (0.0, 0.0),
            log_scale: 0.0,
        }
    }
}

impl ViewportState {
    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn log_scale(&self) -> f64 {
        self.log_scale
    }

    pub fn scale(&self) -> f64 {
        self.log_scale.exp()
    }

    /// The affine transform to apply to the display surface.
    pub fn transform(&self) -> Matrix {
        let s = self.scale();
        (s, 0.0, 0.0, s, self.pan.0, self.pan.1)
    }
}

/// Drag gesture tracker: press records the anchor, each move while pressed
/// re-derives pan from it, release stops tracking.
#[derive(Debug, Default, Clone, Copy)]
struct DragTracker {
    /// (pointer position at press, pan at press)
    anchor: Option<(Point, Point)>,
}

/// Deduplicates transform-application requests within one refresh interval.
///
/// Any number of state transitions between refreshes collapse into a single
/// pending request; the display loop drains it with `take` once per frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    dirty: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the transform as needing application.
    pub fn request(&mut self) {
        self.dirty = true;
    }

    pub fn is_scheduled(&self) -> bool {
        self.dirty
    }

    /// Drain the pending request, if any. Called once per display refresh.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Input-driven controller over the viewport state.
#[derive(Debug, Default)]
pub struct ViewportController {
    state: ViewportState,
    drag: DragTracker,
    scheduler: FrameScheduler,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn dragging(&self) -> bool {
        self.drag.anchor.is_some()
    }

    /// Wheel input over the viewport. With the zoom modifier held, the
    /// vertical delta zooms about `cursor`; otherwise both deltas pan.
    pub fn on_wheel(&mut self, cursor: Point, delta: (f64, f64), zoom_modifier: bool) {
        if zoom_modifier {
            self.zoom_at(cursor, delta.1);
        } else {
            self.state.pan.0 -= delta.0;
            self.state.pan.1 -= delta.1;
        }
        self.scheduler.request();
    }

    /// Zoom about a cursor point, keeping it visually fixed:
    /// `pan' = (scale / old_scale) * (pan - cursor) + cursor`.
    fn zoom_at(&mut self, cursor: Point, delta: f64) {
        let old_scale = self.state.scale();
        self.state.log_scale -= delta * ZOOM_SENSITIVITY;
        let ratio = self.state.scale() / old_scale;
        self.state.pan = (
            ratio * (self.state.pan.0 - cursor.0) + cursor.0,
            ratio * (self.state.pan.1 - cursor.1) + cursor.1,
        );
    }

    pub fn on_pointer_down(&mut self, pointer: Point) {
        self.drag.anchor = Some((pointer, self.state.pan));
    }

    pub fn on_pointer_move(&mut self, pointer: Point) {
        if let Some((start_pointer, start_pan)) = self.drag.anchor {
            self.state.pan = (
                start_pan.0 + (pointer.0 - start_pointer.0),
                start_pan.1 + (pointer.1 - start_pointer.1),
            );
            self.scheduler.request();
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.drag.anchor = None;
    }

    /// The coalesced per-refresh transform: `Some` only when state changed
    /// since the last call, so a stale transform is never re-applied.
    pub fn take_frame(&mut self) -> Option<Matrix> {
        self.scheduler.take().then(|| self.state.transform())
    }

    /// Back to identity. Invoked when a new document is loaded; state
    /// persists across pages of the same document.
    pub fn reset(&mut self) {
        self.state = ViewportState::default();
        self.drag = DragTracker::default();
        self.scheduler.request();
    }
}
