//! Host adapter
//!
//! Receiving end of the boundary. Applies `aspectRatio` envelopes as an
//! aspect constraint on the window and `windowDrag` envelopes as incremental
//! translations. Windowing itself sits behind [`WindowControl`] so the
//! adapter is independent of the toolkit that owns the window.

use tracing::{debug, warn};

use crate::channel::{Channel, Envelope, SequenceGate};
use crate::geometry::{AspectLock, AxisOrientation, Point, Size};
use crate::types::{DimensionSample, DragDelta};
use crate::{Error, Result};

/// Window operations the adapter needs, in logical pixels
pub trait WindowControl {
    fn outer_position(&self) -> Result<Point>;
    fn set_outer_position(&self, position: Point) -> Result<()>;
    fn inner_size(&self) -> Result<Size>;
    fn set_inner_size(&self, size: Size) -> Result<()>;
}

/// Applies boundary messages to one window
#[derive(Debug)]
pub struct HostAdapter {
    orientation: AxisOrientation,
    min_size: Size,
    aspect: Option<AspectLock>,
    gate: SequenceGate,
}

impl HostAdapter {
    pub fn new(orientation: AxisOrientation, min_size: Size) -> Self {
        Self {
            orientation,
            min_size,
            aspect: None,
            gate: SequenceGate::new(),
        }
    }

    pub fn aspect(&self) -> Option<AspectLock> {
        self.aspect
    }

    /// A new document started loading in the window. Its envelopes restart
    /// under a fresh epoch, so ordering history from the previous page is
    /// dropped. The aspect lock stays until the new page reports a sample.
    pub fn reset_page(&mut self) {
        self.gate.reset();
        debug!("Boundary ordering reset for new page");
    }

    /// Handle an `aspectRatio` envelope. Returns whether it was applied.
    pub fn apply_aspect_ratio<W: WindowControl>(
        &mut self,
        window: &W,
        envelope: &Envelope<DimensionSample>,
    ) -> Result<bool> {
        let sample = envelope.payload;
        if !sample.is_valid() {
            return Err(Error::InvalidDimensions {
                width: f64::from(sample.width),
                height: f64::from(sample.height),
            });
        }
        if !self.gate.admit(Channel::AspectRatio, envelope) {
            return Ok(false);
        }
        let lock = AspectLock::new(f64::from(sample.width), f64::from(sample.height)).ok_or(
            Error::InvalidDimensions {
                width: f64::from(sample.width),
                height: f64::from(sample.height),
            },
        )?;
        self.aspect = Some(lock);
        debug!(%sample, ratio = lock.ratio(), "Aspect ratio locked");
        self.enforce_aspect(window)?;
        Ok(true)
    }

    /// Handle a `windowDrag` envelope. Deltas are additive, so they are
    /// applied in whatever order they arrive.
    pub fn apply_drag<W: WindowControl>(
        &mut self,
        window: &W,
        envelope: &Envelope<DragDelta>,
    ) -> Result<Point> {
        let delta = envelope.payload;
        if !delta.is_valid() {
            warn!(dx = delta.dx, dy = delta.dy, "Rejected drag delta");
            return Err(Error::InvalidDelta {
                dx: delta.dx,
                dy: delta.dy,
            });
        }
        let origin = window.outer_position()?;
        let moved = Point::new(
            origin.x + delta.dx,
            origin.y + self.orientation.convert_dy(delta.dy),
        );
        window.set_outer_position(moved)?;
        Ok(moved)
    }

    /// Re-apply the current lock, e.g. after the user resized the window
    pub fn enforce_aspect<W: WindowControl>(&self, window: &W) -> Result<Option<Size>> {
        let Some(lock) = self.aspect else {
            return Ok(None);
        };
        let current = window.inner_size()?;
        let Some(target) = lock.fit(current, self.min_size) else {
            return Ok(None);
        };
        window.set_inner_size(target)?;
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeWindow {
        position: Cell<Point>,
        size: Cell<Size>,
    }

    impl FakeWindow {
        fn new() -> Self {
            Self {
                position: Cell::new(Point::new(100.0, 100.0)),
                size: Cell::new(Size::new(640.0, 480.0)),
            }
        }
    }

    impl WindowControl for FakeWindow {
        fn outer_position(&self) -> Result<Point> {
            Ok(self.position.get())
        }
        fn set_outer_position(&self, position: Point) -> Result<()> {
            self.position.set(position);
            Ok(())
        }
        fn inner_size(&self) -> Result<Size> {
            Ok(self.size.get())
        }
        fn set_inner_size(&self, size: Size) -> Result<()> {
            self.size.set(size);
            Ok(())
        }
    }

    fn adapter(orientation: AxisOrientation) -> HostAdapter {
        HostAdapter::new(orientation, Size::new(280.0, 200.0))
    }

    #[test]
    fn test_aspect_resizes_window() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YDown);
        let env = Envelope::new(1, 1, DimensionSample::new(1920, 1080).unwrap());
        assert!(host.apply_aspect_ratio(&window, &env).unwrap());
        assert_eq!(window.size.get(), Size::new(640.0, 360.0));
    }

    #[test]
    fn test_stale_aspect_ignored() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YDown);
        let newer = Envelope::new(1, 2, DimensionSample::new(1280, 720).unwrap());
        let older = Envelope::new(1, 1, DimensionSample::new(4, 3).unwrap());
        assert!(host.apply_aspect_ratio(&window, &newer).unwrap());
        assert!(!host.apply_aspect_ratio(&window, &older).unwrap());
        assert_eq!(window.size.get(), Size::new(640.0, 360.0));
    }

    #[test]
    fn test_reload_after_clock_step_back() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YDown);
        let before = Envelope::new(1_000_000, 1, DimensionSample::new(1920, 1080).unwrap());
        assert!(host.apply_aspect_ratio(&window, &before).unwrap());

        host.reset_page();
        assert_eq!(host.aspect().map(|lock| lock.ratio()), Some(1920.0 / 1080.0));
        for seq in 1..=5 {
            let after = Envelope::new(998_000, seq, DimensionSample::new(4, 3).unwrap());
            assert!(host.apply_aspect_ratio(&window, &after).unwrap());
        }
        assert_eq!(window.size.get(), Size::new(640.0, 480.0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YDown);
        let bad = Envelope::new(1, 1, DimensionSample { width: 0, height: 720 });
        assert!(host.apply_aspect_ratio(&window, &bad).is_err());
        assert!(host.aspect().is_none());
    }

    #[test]
    fn test_drag_y_down() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YDown);
        host.apply_drag(&window, &Envelope::new(1, 1, DragDelta::new(5.0, 5.0))).unwrap();
        assert_eq!(window.position.get(), Point::new(105.0, 105.0));
    }

    #[test]
    fn test_drag_y_up_inverts() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YUp);
        host.apply_drag(&window, &Envelope::new(1, 1, DragDelta::new(4.0, -6.0))).unwrap();
        assert_eq!(window.position.get(), Point::new(104.0, 106.0));
    }

    #[test]
    fn test_drag_rejects_absurd_delta() {
        let window = FakeWindow::new();
        let mut host = adapter(AxisOrientation::YDown);
        let bad = Envelope::new(1, 1, DragDelta::new(f64::INFINITY, 0.0));
        assert!(host.apply_drag(&window, &bad).is_err());
        assert_eq!(window.position.get(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_enforce_without_lock_is_noop() {
        let window = FakeWindow::new();
        let host = adapter(AxisOrientation::YDown);
        assert_eq!(host.enforce_aspect(&window).unwrap(), None);
    }
}
