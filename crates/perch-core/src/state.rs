//! Persisted window geometry
//!
//! Only the window frame is persisted; the expanded state and the aspect
//! lock are rebuilt by each page.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geometry::{is_visible_on_any, Rect, Size};
use crate::{Error, Result};

/// File name inside the app config directory
pub const STATE_FILE: &str = "window-state.json";

/// Saved window frame, logical pixels, y-down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub saved_at: DateTime<Utc>,
}

impl WindowState {
    pub fn from_rect(rect: Rect, saved_at: DateTime<Utc>) -> Self {
        Self {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.width,
            height: rect.size.height,
            saved_at,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// JSON-file store for [`WindowState`]
#[derive(Debug, Clone)]
pub struct WindowStateStore {
    path: PathBuf,
}

impl WindowStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/window-state.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state. A missing file is `Ok(None)`; a corrupt one is
    /// logged and treated as missing.
    pub fn load(&self) -> Result<Option<WindowState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str::<WindowState>(&raw) {
            Ok(state) if state.width > 0.0 && state.height > 0.0 => Ok(Some(state)),
            Ok(_) => {
                warn!(path = %self.path.display(), "Ignoring saved window state with empty size");
                Ok(None)
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Ignoring corrupt window state");
                Ok(None)
            }
        }
    }

    pub fn save(&self, state: &WindowState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::StatePersistence(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)
            .map_err(|e| Error::StatePersistence(format!("{}: {e}", self.path.display())))?;
        debug!(
            x = state.x,
            y = state.y,
            width = state.width,
            height = state.height,
            "Window state saved"
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Pick the startup frame: the saved one if it is still on a connected
/// screen, otherwise `size` in the bottom-right corner of `primary`.
pub fn restore_frame(
    saved: Option<&WindowState>,
    screens: &[Rect],
    primary: Rect,
    size: Size,
    padding: f64,
) -> Rect {
    if let Some(saved) = saved {
        let rect = saved.rect();
        if is_visible_on_any(&rect, screens) {
            return rect;
        }
        debug!(?rect, "Saved window frame is offscreen, using default");
    }
    primary.bottom_right_corner(size, padding)
}
