//! The floating player window
//!
//! Creation, geometry restore and persistence, and the [`WindowControl`]
//! binding the host adapter drives.

use chrono::Utc;
use perch_core::state::restore_frame;
use perch_core::{Error, Point, Rect, Result, Size, WindowControl, WindowState};
use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, Monitor, Runtime, Webview, WebviewUrl,
    WebviewWindow, WebviewWindowBuilder, Window, WindowEvent,
};
use tracing::{debug, info, warn};

use crate::commands::AppState;
use crate::config::{ShellConfig, WindowDefaults};

/// Label of the only window
pub const MAIN_WINDOW: &str = "main";

/// [`WindowControl`] over a Tauri window, in logical pixels
pub struct TauriWindow<'a, R: Runtime>(pub &'a Window<R>);

impl<R: Runtime> TauriWindow<'_, R> {
    fn scale(&self) -> Result<f64> {
        self.0.scale_factor().map_err(Error::window)
    }

    /// Current logical frame
    pub fn frame(&self) -> Result<Rect> {
        let origin = self.outer_position()?;
        let size = self.inner_size()?;
        Ok(Rect::new(origin.x, origin.y, size.width, size.height))
    }

    pub fn set_frame(&self, frame: Rect) -> Result<()> {
        self.set_inner_size(frame.size)?;
        self.set_outer_position(frame.origin)
    }
}

impl<R: Runtime> WindowControl for TauriWindow<'_, R> {
    fn outer_position(&self) -> Result<Point> {
        let scale = self.scale()?;
        let position = self
            .0
            .outer_position()
            .map_err(Error::window)?
            .to_logical::<f64>(scale);
        Ok(Point::new(position.x, position.y))
    }

    fn set_outer_position(&self, position: Point) -> Result<()> {
        self.0
            .set_position(LogicalPosition::new(position.x, position.y))
            .map_err(Error::window)
    }

    fn inner_size(&self) -> Result<Size> {
        let scale = self.scale()?;
        let size = self.0.inner_size().map_err(Error::window)?.to_logical::<f64>(scale);
        Ok(Size::new(size.width, size.height))
    }

    fn set_inner_size(&self, size: Size) -> Result<()> {
        self.0
            .set_size(LogicalSize::new(size.width, size.height))
            .map_err(Error::window)
    }
}

fn logical_rect(monitor: &Monitor) -> Rect {
    let scale = monitor.scale_factor();
    let position = monitor.position().to_logical::<f64>(scale);
    let size = monitor.size().to_logical::<f64>(scale);
    Rect::new(position.x, position.y, size.width, size.height)
}

/// Logical rects of every connected monitor plus the primary one
fn screens<R: Runtime>(app: &AppHandle<R>) -> Result<(Vec<Rect>, Option<Rect>)> {
    let screens = app
        .available_monitors()
        .map_err(Error::window)?
        .iter()
        .map(logical_rect)
        .collect::<Vec<_>>();
    let primary = app
        .primary_monitor()
        .map_err(Error::window)?
        .map(|monitor| logical_rect(&monitor))
        .or_else(|| screens.first().copied());
    Ok((screens, primary))
}

/// Frame used when nothing usable was saved
pub fn default_frame<R: Runtime>(app: &AppHandle<R>, defaults: &WindowDefaults) -> Result<Rect> {
    let (_, primary) = screens(app)?;
    let primary = primary.ok_or_else(|| Error::window("no monitor available"))?;
    Ok(primary.bottom_right_corner(defaults.size(), defaults.padding))
}

/// Startup frame: the saved frame if it is still on screen
pub fn initial_frame<R: Runtime>(
    app: &AppHandle<R>,
    defaults: &WindowDefaults,
    saved: Option<&WindowState>,
) -> Result<Rect> {
    let (screens, primary) = screens(app)?;
    let primary = primary.ok_or_else(|| Error::window("no monitor available"))?;
    let frame = restore_frame(saved, &screens, primary, defaults.size(), defaults.padding);
    // never restore below the minimum size
    let min = defaults.min_size();
    Ok(Rect::new(
        frame.origin.x,
        frame.origin.y,
        frame.size.width.max(min.width),
        frame.size.height.max(min.height),
    ))
}

/// Build the floating window at `frame`, with `script` run at document start
pub fn create<R: Runtime>(
    app: &AppHandle<R>,
    shell: &ShellConfig,
    frame: Rect,
    script: Option<String>,
) -> tauri::Result<WebviewWindow<R>> {
    let defaults = &shell.window;
    let mut builder = WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW,
        WebviewUrl::External(shell.site.start_url.clone()),
    )
    .title("Perch")
    .decorations(false)
    .always_on_top(defaults.always_on_top)
    .visible_on_all_workspaces(defaults.all_workspaces)
    .min_inner_size(defaults.min_width, defaults.min_height)
    .inner_size(frame.size.width, frame.size.height)
    .position(frame.origin.x, frame.origin.y)
    .user_agent(&shell.site.user_agent);

    if let Some(script) = script {
        builder = builder.initialization_script(&script);
    }

    let window = builder.build()?;
    info!(url = %shell.site.start_url, ?frame, "Created player window");
    Ok(window)
}

/// Save the current frame, logging instead of failing
pub fn persist<R: Runtime>(window: &Window<R>, state: &AppState) {
    let frame = match TauriWindow(window).frame() {
        Ok(frame) => frame,
        Err(err) => {
            warn!(error = %err, "Could not read window frame");
            return;
        }
    };
    if let Err(err) = state.store().save(&WindowState::from_rect(frame, Utc::now())) {
        warn!(error = %err, "Failed to save window state");
    }
}

/// Move the window back to the default corner and forget the saved frame
pub fn reset_position<R: Runtime>(window: &Window<R>, state: &AppState) -> Result<()> {
    let frame = default_frame(window.app_handle(), state.defaults())?;
    TauriWindow(window).set_frame(frame)?;
    state.store().clear()?;
    info!(?frame, "Window position reset");
    Ok(())
}

/// Window event hook: persist geometry and keep the aspect lock applied
pub fn on_event<R: Runtime>(window: &Window<R>, event: &WindowEvent) {
    let Some(state) = window.try_state::<AppState>() else {
        return;
    };
    match event {
        WindowEvent::Resized(_) => {
            if let Some(size) = state.enforce_aspect(&TauriWindow(window)) {
                debug!(?size, "Re-applied aspect ratio after resize");
            }
            persist(window, &state);
        }
        WindowEvent::Moved(_) | WindowEvent::CloseRequested { .. } => persist(window, &state),
        _ => {}
    }
}

/// Page load hook: a starting navigation begins a new boundary epoch
pub fn on_page_load<R: Runtime>(webview: &Webview<R>, payload: &PageLoadPayload<'_>) {
    if !matches!(payload.event(), PageLoadEvent::Started) {
        return;
    }
    debug!(url = %payload.url(), "Page load started");
    let app = webview.app_handle().clone();
    tauri::async_runtime::spawn(async move {
        if let Some(state) = app.try_state::<AppState>() {
            state.reset_page().await;
        }
    });
}
