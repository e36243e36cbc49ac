//! Application menu

use tauri::menu::{AboutMetadata, Menu, MenuBuilder, MenuEvent, MenuItemBuilder, SubmenuBuilder};
use tauri::{AppHandle, Manager, Runtime};
use tracing::{info, warn};

use crate::commands::AppState;
use crate::window::{self, MAIN_WINDOW};

pub const RELOAD: &str = "reload";
pub const RESET_POSITION: &str = "reset-position";

pub fn build<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let about = AboutMetadata {
        name: Some("Perch".into()),
        version: Some(perch_core::VERSION.into()),
        comments: Some("Floating always-on-top video window".into()),
        ..Default::default()
    };

    let app_menu = SubmenuBuilder::new(app, "Perch")
        .about(Some(about))
        .separator()
        .quit()
        .build()?;

    let view_menu = SubmenuBuilder::new(app, "View")
        .item(
            &MenuItemBuilder::with_id(RELOAD, "Reload Page")
                .accelerator("CmdOrCtrl+R")
                .build(app)?,
        )
        .item(&MenuItemBuilder::with_id(RESET_POSITION, "Reset Window Position").build(app)?)
        .build()?;

    let window_menu = SubmenuBuilder::new(app, "Window")
        .minimize()
        .close_window()
        .build()?;

    MenuBuilder::new(app)
        .items(&[&app_menu, &view_menu, &window_menu])
        .build()
}

pub fn on_event<R: Runtime>(app: &AppHandle<R>, event: MenuEvent) {
    let Some(webview) = app.get_webview_window(MAIN_WINDOW) else {
        return;
    };
    match event.id().as_ref() {
        RELOAD => {
            info!("Reloading page");
            if let Err(err) = webview.eval("window.location.reload()") {
                warn!(error = %err, "Reload failed");
            }
        }
        RESET_POSITION => {
            let Some(state) = app.try_state::<AppState>() else {
                return;
            };
            let player = webview.as_ref().window();
            if let Err(err) = window::reset_position(&player, &state) {
                warn!(error = %err, "Failed to reset window position");
            }
        }
        _ => {}
    }
}
