//! Tauri IPC commands
//!
//! The content runtime posts boundary messages here, one command per
//! channel. Each command hands the envelope to the shared [`HostAdapter`].

use perch_core::{
    AxisOrientation, DimensionSample, DragDelta, Envelope, HostAdapter, Point, SiteProfile, Size,
    WindowControl, WindowStateStore,
};
use tauri::State;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::config::WindowDefaults;
use crate::window::TauriWindow;

/// Shared application state
pub struct AppState {
    adapter: Mutex<HostAdapter>,
    site: SiteProfile,
    store: WindowStateStore,
    defaults: WindowDefaults,
}

impl AppState {
    pub fn new(site: SiteProfile, defaults: WindowDefaults, store: WindowStateStore) -> Self {
        Self {
            // Tauri window coordinates grow downwards
            adapter: Mutex::new(HostAdapter::new(AxisOrientation::YDown, defaults.min_size())),
            site,
            store,
            defaults,
        }
    }

    pub fn store(&self) -> &WindowStateStore {
        &self.store
    }

    pub fn defaults(&self) -> &WindowDefaults {
        &self.defaults
    }

    /// Boundary messages are only taken from pages on the profiled site
    pub fn check_origin(&self, page: &Url) -> Result<(), String> {
        match page.host_str() {
            Some(host) if self.site.owns_host(host) => Ok(()),
            _ => {
                warn!(%page, "Boundary message from a foreign page refused");
                Err(format!("boundary messages are not accepted from {page}"))
            }
        }
    }

    /// A new document started loading; its envelopes carry a new epoch
    pub async fn reset_page(&self) {
        self.adapter.lock().await.reset_page();
    }

    /// Returns whether the sample was applied or dropped as stale
    pub async fn apply_aspect_ratio<W: WindowControl>(
        &self,
        window: &W,
        envelope: &Envelope<DimensionSample>,
    ) -> Result<bool, String> {
        let mut adapter = self.adapter.lock().await;
        match adapter.apply_aspect_ratio(window, envelope) {
            Ok(applied) => {
                debug!(
                    epoch = envelope.epoch,
                    seq = envelope.seq,
                    sample = %envelope.payload,
                    applied,
                    "aspectRatio"
                );
                Ok(applied)
            }
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "aspectRatio rejected");
                Err(err.to_string())
            }
        }
    }

    pub async fn apply_drag<W: WindowControl>(
        &self,
        window: &W,
        envelope: &Envelope<DragDelta>,
    ) -> Result<Point, String> {
        let mut adapter = self.adapter.lock().await;
        match adapter.apply_drag(window, envelope) {
            Ok(position) => {
                debug!(
                    seq = envelope.seq,
                    dx = envelope.payload.dx,
                    dy = envelope.payload.dy,
                    "windowDrag"
                );
                Ok(position)
            }
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "windowDrag rejected");
                Err(err.to_string())
            }
        }
    }

    /// Re-apply the aspect lock after a user resize. Skipped while a command
    /// holds the adapter, since that command is the one resizing.
    pub fn enforce_aspect<W: WindowControl>(&self, window: &W) -> Option<Size> {
        let adapter = self.adapter.try_lock().ok()?;
        match adapter.enforce_aspect(window) {
            Ok(size) => size,
            Err(err) => {
                warn!(error = %err, "Failed to enforce aspect ratio");
                None
            }
        }
    }
}

// ============================================================================
// Tauri Commands - one per boundary channel
// ============================================================================

fn page_url(webview: &tauri::Webview) -> Result<Url, String> {
    webview.url().map_err(|err| err.to_string())
}

/// `aspectRatio` channel
#[tauri::command]
pub async fn aspect_ratio(
    window: tauri::Window,
    webview: tauri::Webview,
    state: State<'_, AppState>,
    envelope: Envelope<DimensionSample>,
) -> Result<(), String> {
    state.check_origin(&page_url(&webview)?)?;
    state
        .apply_aspect_ratio(&TauriWindow(&window), &envelope)
        .await
        .map(|_| ())
}

/// `windowDrag` channel
#[tauri::command]
pub async fn window_drag(
    window: tauri::Window,
    webview: tauri::Webview,
    state: State<'_, AppState>,
    envelope: Envelope<DragDelta>,
) -> Result<(), String> {
    state.check_origin(&page_url(&webview)?)?;
    state
        .apply_drag(&TauriWindow(&window), &envelope)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::Result;
    use std::sync::Mutex as StdMutex;

    struct FakeWindow {
        position: StdMutex<Point>,
        size: StdMutex<Size>,
    }

    impl FakeWindow {
        fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
            Self {
                position: StdMutex::new(Point::new(x, y)),
                size: StdMutex::new(Size::new(width, height)),
            }
        }

        fn position(&self) -> Point {
            *self.position.lock().unwrap()
        }

        fn size(&self) -> Size {
            *self.size.lock().unwrap()
        }
    }

    impl WindowControl for FakeWindow {
        fn outer_position(&self) -> Result<Point> {
            Ok(self.position())
        }

        fn set_outer_position(&self, position: Point) -> Result<()> {
            *self.position.lock().unwrap() = position;
            Ok(())
        }

        fn inner_size(&self) -> Result<Size> {
            Ok(self.size())
        }

        fn set_inner_size(&self, size: Size) -> Result<()> {
            *self.size.lock().unwrap() = size;
            Ok(())
        }
    }

    fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = WindowStateStore::in_dir(dir.path());
        let state = AppState::new(SiteProfile::default(), WindowDefaults::default(), store);
        (state, dir)
    }

    fn sample(seq: u64, width: u32, height: u32) -> Envelope<DimensionSample> {
        Envelope::new(1, seq, DimensionSample { width, height })
    }

    #[tokio::test]
    async fn test_aspect_ratio_resizes() {
        let (state, _dir) = state();
        let window = FakeWindow::new(0.0, 0.0, 320.0, 240.0);

        assert_eq!(state.apply_aspect_ratio(&window, &sample(1, 1920, 1080)).await, Ok(true));
        // 320x180 would fall under the 200px minimum height
        assert_eq!(window.size(), Size::new(356.0, 200.0));
    }

    #[tokio::test]
    async fn test_stale_sample_dropped() {
        let (state, _dir) = state();
        let window = FakeWindow::new(0.0, 0.0, 400.0, 300.0);

        assert_eq!(state.apply_aspect_ratio(&window, &sample(2, 1920, 1080)).await, Ok(true));
        let after_newest = window.size();
        assert_eq!(state.apply_aspect_ratio(&window, &sample(1, 640, 480)).await, Ok(false));
        assert_eq!(window.size(), after_newest);
    }

    #[tokio::test]
    async fn test_invalid_sample_is_error() {
        let (state, _dir) = state();
        let window = FakeWindow::new(0.0, 0.0, 400.0, 300.0);

        let result = state.apply_aspect_ratio(&window, &sample(1, 0, 1080)).await;
        assert!(result.unwrap_err().contains("Invalid dimensions"));
        assert_eq!(window.size(), Size::new(400.0, 300.0));
    }

    #[tokio::test]
    async fn test_drag_moves_window() {
        let (state, _dir) = state();
        let window = FakeWindow::new(100.0, 100.0, 320.0, 240.0);

        for (seq, (dx, dy)) in [(5.0, 5.0), (4.0, -6.0)].into_iter().enumerate() {
            let envelope = Envelope::new(1, seq as u64 + 1, DragDelta { dx, dy });
            state.apply_drag(&window, &envelope).await.unwrap();
        }
        assert_eq!(window.position(), Point::new(109.0, 99.0));
    }

    #[tokio::test]
    async fn test_drag_rejects_non_finite() {
        let (state, _dir) = state();
        let window = FakeWindow::new(100.0, 100.0, 320.0, 240.0);
        let envelope = Envelope::new(1, 1, DragDelta { dx: f64::NAN, dy: 0.0 });

        assert!(state.apply_drag(&window, &envelope).await.is_err());
        assert_eq!(window.position(), Point::new(100.0, 100.0));
    }

    #[tokio::test]
    async fn test_reload_resets_ordering() {
        let (state, _dir) = state();
        let window = FakeWindow::new(0.0, 0.0, 640.0, 480.0);
        let page = |epoch, seq, width, height| {
            Envelope::new(epoch, seq, DimensionSample { width, height })
        };

        let before = page(1_000_000, 1, 1920, 1080);
        assert_eq!(state.apply_aspect_ratio(&window, &before).await, Ok(true));
        assert_eq!(window.size(), Size::new(640.0, 360.0));

        // the reloaded page's clock reads two seconds earlier
        state.reset_page().await;
        for seq in 1..=5 {
            let applied = state.apply_aspect_ratio(&window, &page(998_000, seq, 4, 3)).await;
            assert_eq!(applied, Ok(true));
        }
        assert_eq!(window.size(), Size::new(640.0, 480.0));
    }

    #[test]
    fn test_foreign_origin_refused() {
        let (state, _dir) = state();
        let watch = Url::parse("https://www.youtube.com/watch?v=abc").unwrap();
        let login = Url::parse("https://accounts.google.com/signin").unwrap();
        let lookalike = Url::parse("https://youtube.com.example.net/").unwrap();

        assert_eq!(state.check_origin(&watch), Ok(()));
        assert!(state.check_origin(&login).is_err());
        assert!(state.check_origin(&lookalike).is_err());
    }

    #[tokio::test]
    async fn test_enforce_skipped_while_adapter_busy() {
        let (state, _dir) = state();
        let window = FakeWindow::new(0.0, 0.0, 400.0, 300.0);
        state.apply_aspect_ratio(&window, &sample(1, 1920, 1080)).await.unwrap();

        window.set_inner_size(Size::new(640.0, 640.0)).unwrap();
        {
            let _busy = state.adapter.lock().await;
            assert_eq!(state.enforce_aspect(&window), None);
        }
        assert_eq!(state.enforce_aspect(&window), Some(Size::new(640.0, 360.0)));
    }
}
