//! Window geometry in logical pixels

use serde::{Deserialize, Serialize};

/// Vertical orientation of a host's window coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    /// Origin top-left, y grows downward (same as the content context)
    YDown,
    /// Origin bottom-left, y grows upward
    YUp,
}

impl AxisOrientation {
    /// Convert a content-space vertical delta into host space
    pub fn convert_dy(&self, dy: f64) -> f64 {
        match self {
            AxisOrientation::YDown => dy,
            AxisOrientation::YUp => -dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are within `tolerance` of `other`
    pub fn approx_eq(&self, other: &Size, tolerance: f64) -> bool {
        (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Overlap with a non-zero area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.max_x()
            && other.origin.x < self.max_x()
            && self.origin.y < other.max_y()
            && other.origin.y < self.max_y()
    }

    /// A `size` rect tucked into the bottom-right corner, `padding` from the edges
    /// (y-down coordinates)
    pub fn bottom_right_corner(&self, size: Size, padding: f64) -> Rect {
        Rect {
            origin: Point::new(
                self.max_x() - size.width - padding,
                self.max_y() - size.height - padding,
            ),
            size,
        }
    }
}

/// Whether any part of `rect` is on one of `screens`
pub fn is_visible_on_any(rect: &Rect, screens: &[Rect]) -> bool {
    screens.iter().any(|screen| screen.intersects(rect))
}

/// Aspect ratio constraint applied to the window's inner size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectLock {
    ratio: f64,
}

impl AspectLock {
    /// Size changes smaller than this are not worth a resize
    pub const TOLERANCE: f64 = 1.0;

    /// `None` unless both sides are positive and finite
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        valid.then(|| Self {
            ratio: width / height,
        })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Fit `current` to the ratio, keeping its width when possible.
    ///
    /// If the derived height falls under `min`, the height is clamped and the
    /// width derived from it instead. Returns `None` when `current` already
    /// matches within [`AspectLock::TOLERANCE`].
    pub fn fit(&self, current: Size, min: Size) -> Option<Size> {
        let mut target = Size::new(current.width, (current.width / self.ratio).round());
        if target.height < min.height {
            target.height = min.height;
            target.width = (min.height * self.ratio).round();
        }
        if target.width < min.width {
            target.width = min.width;
            target.height = (min.width / self.ratio).round();
        }
        if target.approx_eq(&current, Self::TOLERANCE) {
            None
        } else {
            Some(target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(AxisOrientation::YDown.convert_dy(5.0), 5.0);
        assert_eq!(AxisOrientation::YUp.convert_dy(5.0), -5.0);
    }

    #[test]
    fn test_intersects() {
        let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
        assert!(screen.intersects(&Rect::new(1400.0, 850.0, 320.0, 240.0)));
        assert!(!screen.intersects(&Rect::new(1440.0, 0.0, 320.0, 240.0)));
        assert!(!screen.intersects(&Rect::new(-400.0, -300.0, 320.0, 240.0)));
    }

    #[test]
    fn test_bottom_right_corner() {
        let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
        let frame = screen.bottom_right_corner(Size::new(320.0, 240.0), 20.0);
        assert_eq!(frame, Rect::new(1100.0, 640.0, 320.0, 240.0));
    }

    #[test]
    fn test_visible_on_second_screen() {
        let screens = [
            Rect::new(0.0, 0.0, 1440.0, 900.0),
            Rect::new(1440.0, 0.0, 1920.0, 1080.0),
        ];
        assert!(is_visible_on_any(&Rect::new(2000.0, 500.0, 320.0, 240.0), &screens));
        assert!(!is_visible_on_any(&Rect::new(5000.0, 500.0, 320.0, 240.0), &screens));
    }

    #[test]
    fn test_aspect_fit_keeps_width() {
        let lock = AspectLock::new(1920.0, 1080.0).unwrap();
        let min = Size::new(280.0, 200.0);
        assert_eq!(lock.fit(Size::new(640.0, 480.0), min), Some(Size::new(640.0, 360.0)));
        assert_eq!(lock.fit(Size::new(640.0, 360.0), min), None);
        assert_eq!(lock.fit(Size::new(640.0, 360.6), min), None);
    }

    #[test]
    fn test_aspect_fit_respects_minimum() {
        let lock = AspectLock::new(1920.0, 1080.0).unwrap();
        let fitted = lock.fit(Size::new(300.0, 240.0), Size::new(280.0, 200.0)).unwrap();
        assert_eq!(fitted, Size::new(356.0, 200.0));
    }

    #[test]
    fn test_aspect_rejects_degenerate() {
        assert!(AspectLock::new(0.0, 720.0).is_none());
        assert!(AspectLock::new(1280.0, f64::NAN).is_none());
    }
}
