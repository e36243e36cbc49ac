//! Drag-to-move gesture tracking
//!
//! A mouse-down on a non-interactive region opens a [`DragSession`]. Small
//! movements are swallowed so a plain click still reaches the page (e.g.
//! play/pause); once the pointer strays [`DRAG_THRESHOLD`] from the origin on
//! either axis the session activates and every move yields an incremental
//! [`DragDelta`] for the host.

use crate::fullscreen::PRIMARY_BUTTON;
use crate::types::{DragDelta, ScreenPoint};
use tracing::trace;

/// Movement from the origin, per axis, that turns a click into a drag
pub const DRAG_THRESHOLD: f64 = 4.0;

/// An in-progress window-move gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    origin: ScreenPoint,
    last: ScreenPoint,
    active: bool,
}

impl DragSession {
    pub fn new(origin: ScreenPoint) -> Self {
        Self {
            origin,
            last: origin,
            active: false,
        }
    }

    pub fn origin(&self) -> ScreenPoint {
        self.origin
    }

    pub fn last(&self) -> ScreenPoint {
        self.last
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn crosses_threshold(&self, point: ScreenPoint, threshold: f64) -> bool {
        (point.x - self.origin.x).abs() >= threshold || (point.y - self.origin.y).abs() >= threshold
    }
}

/// Result of one pointer-move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStep {
    /// No session open
    Idle,
    /// Session open, still under the threshold
    Pending,
    /// Session active; report the delta and suppress the event's default
    Moved(DragDelta),
}

/// Owner of the single optional drag session
#[derive(Debug, Clone)]
pub struct DragTracker {
    session: Option<DragSession>,
    threshold: f64,
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            session: None,
            threshold,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Mouse-down. Any previous session is discarded; a new one opens only
    /// for the primary button on a non-excluded target.
    pub fn pointer_down(&mut self, button: i16, point: ScreenPoint, target_excluded: bool) -> bool {
        self.session = None;
        if button != PRIMARY_BUTTON || target_excluded {
            return false;
        }
        self.session = Some(DragSession::new(point));
        true
    }

    /// Mouse-move. `primary_held` is false when the button was released
    /// outside the page and the mouse-up never arrived.
    pub fn pointer_move(&mut self, point: ScreenPoint, primary_held: bool) -> DragStep {
        if !primary_held {
            self.session = None;
            return DragStep::Idle;
        }
        let threshold = self.threshold;
        let Some(session) = self.session.as_mut() else {
            return DragStep::Idle;
        };

        if !session.active && !session.crosses_threshold(point, threshold) {
            session.last = point;
            return DragStep::Pending;
        }
        if !session.active {
            trace!(origin = ?session.origin, "Drag activated");
            session.active = true;
        }

        let delta = point.delta_from(session.last);
        session.last = point;
        DragStep::Moved(delta)
    }

    /// Mouse-up; always ends the session
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}
