//! Configuration handed from the host to the content runtime

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dimension::DEFAULT_POLL_INTERVAL;
use crate::drag::DRAG_THRESHOLD;
use crate::site::SiteProfile;
use crate::{Error, Result};

/// Everything the in-page runtime needs, serialized into the injected script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentConfig {
    pub site: SiteProfile,
    /// Dimension watcher poll period in milliseconds
    pub poll_interval_ms: u32,
    /// Drag activation distance in CSS pixels
    pub drag_threshold: f64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            site: SiteProfile::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u32,
            drag_threshold: DRAG_THRESHOLD,
        }
    }
}

impl ContentConfig {
    /// Accepted poll window
    pub const POLL_RANGE_MS: std::ops::RangeInclusive<u32> = 250..=10_000;

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    pub fn validate(&self) -> Result<()> {
        if !Self::POLL_RANGE_MS.contains(&self.poll_interval_ms) {
            return Err(Error::InvalidConfig(format!(
                "poll interval {}ms outside {:?}",
                self.poll_interval_ms,
                Self::POLL_RANGE_MS
            )));
        }
        if !(self.drag_threshold.is_finite() && self.drag_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "drag threshold {} must be positive",
                self.drag_threshold
            )));
        }
        if self.site.marker_class.trim().is_empty() || self.site.marker_class.contains(' ') {
            return Err(Error::InvalidConfig(format!(
                "marker class {:?} must be a single class name",
                self.site.marker_class
            )));
        }
        Ok(())
    }
}
