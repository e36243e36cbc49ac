//! Core types shared by the content runtime and the host

use serde::{Deserialize, Serialize};

/// Simulated fullscreen presentation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpandedState {
    #[default]
    Normal,
    Expanded,
}

impl ExpandedState {
    /// The state a toggle moves to
    pub fn toggled(self) -> Self {
        match self {
            ExpandedState::Normal => ExpandedState::Expanded,
            ExpandedState::Expanded => ExpandedState::Normal,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == ExpandedState::Expanded
    }
}

impl std::fmt::Display for ExpandedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpandedState::Normal => write!(f, "normal"),
            ExpandedState::Expanded => write!(f, "expanded"),
        }
    }
}

/// Decoded pixel size of the active video element.
///
/// Both dimensions are always positive; construct through [`DimensionSample::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionSample {
    pub width: u32,
    pub height: u32,
}

impl DimensionSample {
    /// Returns `None` for a zero-sized (not yet decoded) video
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Width divided by height
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Bounds check for samples arriving across the boundary
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl std::fmt::Display for DimensionSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pointer position in screen coordinates (content context, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Delta travelled from `from` to `self`
    pub fn delta_from(&self, from: ScreenPoint) -> DragDelta {
        DragDelta {
            dx: self.x - from.x,
            dy: self.y - from.y,
        }
    }
}

/// Incremental window translation, content orientation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragDelta {
    pub dx: f64,
    pub dy: f64,
}

impl DragDelta {
    /// Largest single step a host accepts
    pub const MAX_STEP: f64 = 10_000.0;

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Bounds check for deltas arriving across the boundary
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite()
            && self.dy.is_finite()
            && self.dx.abs() <= Self::MAX_STEP
            && self.dy.abs() <= Self::MAX_STEP
    }
}

impl std::ops::Add for DragDelta {
    type Output = DragDelta;

    fn add(self, rhs: DragDelta) -> DragDelta {
        DragDelta::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::iter::Sum for DragDelta {
    fn sum<I: Iterator<Item = DragDelta>>(iter: I) -> Self {
        iter.fold(DragDelta::default(), |acc, d| acc + d)
    }
}
