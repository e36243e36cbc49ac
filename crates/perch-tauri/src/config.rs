//! Shell configuration
//!
//! Read from `config.json` in the app config directory. Every field has a
//! default, so a missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use anyhow::Context;
use perch_core::{ContentConfig, Error, SiteProfile, Size};
use serde::{Deserialize, Serialize};

/// Window defaults for the floating player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowDefaults {
    pub width: f64,
    pub height: f64,
    /// Gap to the screen edges when placed in the bottom-right corner
    pub padding: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub always_on_top: bool,
    pub all_workspaces: bool,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 240.0,
            padding: 20.0,
            min_width: 280.0,
            min_height: 200.0,
            always_on_top: true,
            all_workspaces: true,
        }
    }
}

impl WindowDefaults {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    pub site: SiteProfile,
    /// Directory holding the built content bundle
    pub content_dir: Option<PathBuf>,
    pub window: WindowDefaults,
    pub poll_interval_ms: u32,
    pub drag_threshold: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let content = ContentConfig::default();
        Self {
            site: content.site,
            content_dir: None,
            window: WindowDefaults::default(),
            poll_interval_ms: content.poll_interval_ms,
            drag_threshold: content.drag_threshold,
        }
    }
}

impl ShellConfig {
    pub const FILE: &'static str = "config.json";

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// The part of the configuration handed to the page
    pub fn content_config(&self) -> ContentConfig {
        ContentConfig {
            site: self.site.clone(),
            poll_interval_ms: self.poll_interval_ms,
            drag_threshold: self.drag_threshold,
        }
    }

    pub fn validate(&self) -> perch_core::Result<()> {
        self.content_config().validate()?;
        let window = &self.window;
        if !(window.min_width > 0.0 && window.min_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "minimum window size must be positive, got {}x{}",
                window.min_width, window.min_height
            )));
        }
        if window.width < window.min_width || window.height < window.min_height {
            return Err(Error::InvalidConfig(format!(
                "default window size {}x{} is below the minimum {}x{}",
                window.width, window.height, window.min_width, window.min_height
            )));
        }
        if !(window.padding.is_finite() && window.padding >= 0.0) {
            return Err(Error::InvalidConfig(format!("invalid padding {}", window.padding)));
        }
        Ok(())
    }
}
