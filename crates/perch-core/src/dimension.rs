//! Video dimension change detection
//!
//! The watcher has two feeds (a periodic poll and a `loadedmetadata` fast
//! path) that both funnel raw `videoWidth`/`videoHeight` reads through one
//! [`DimensionTracker`]. Whichever feed sees a change first reports it; the
//! other then sees an identical sample and stays quiet.

use std::time::Duration;

use crate::types::DimensionSample;
use tracing::debug;

/// Default poll period of the watcher
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Deduplicating filter over raw dimension reads
#[derive(Debug, Clone, Default)]
pub struct DimensionTracker {
    last: Option<DimensionSample>,
}

impl DimensionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted sample
    pub fn last(&self) -> Option<DimensionSample> {
        self.last
    }

    /// Feed one raw read; returns the sample to report, if any.
    ///
    /// Zero-sized reads (metadata not loaded yet) never replace the last
    /// accepted sample.
    pub fn observe(&mut self, width: u32, height: u32) -> Option<DimensionSample> {
        let sample = DimensionSample::new(width, height)?;
        if self.last == Some(sample) {
            return None;
        }
        debug!(from = ?self.last, to = %sample, "Video dimensions changed");
        self.last = Some(sample);
        Some(sample)
    }

    /// Feed a read from a possibly absent video element
    pub fn observe_optional(&mut self, read: Option<(u32, u32)>) -> Option<DimensionSample> {
        let (width, height) = read?;
        self.observe(width, height)
    }
}
