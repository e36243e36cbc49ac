//! Perch Content - in-page runtime compiled to WebAssembly
//!
//! Installed by the host at document start of every navigation:
//! - Expanded-state stylesheet keyed off a body marker class
//! - Fullscreen interception (capture-phase click/keydown/dblclick)
//! - Fullscreen capability substitution
//! - Video dimension watcher reporting on `aspectRatio`
//! - Drag-to-move bridge reporting on `windowDrag`
//!
//! ## Bootstrap
//!
//! ```javascript
//! wasm_bindgen.initSync({ module: bytes });
//! wasm_bindgen.install({ pollIntervalMs: 2000 });
//! ```

use std::cell::RefCell;

use perch_core::ContentConfig;
use wasm_bindgen::prelude::*;

mod bridge;
mod capability;
mod dimension;
mod dom;
mod drag;
mod fullscreen;
mod overlay;
mod scope;

use scope::PageScope;

thread_local! {
    static PAGE: RefCell<Option<PageScope>> = const { RefCell::new(None) };
}

/// Install the runtime into the current document. Repeated calls are no-ops.
///
/// `config` is a (possibly partial) `ContentConfig`; unreadable or invalid
/// configuration falls back to the defaults.
#[wasm_bindgen]
pub fn install(config: JsValue) {
    console_error_panic_hook::set_once();
    let config = read_config(config);

    PAGE.with(|page| {
        let Ok(mut page) = page.try_borrow_mut() else {
            return;
        };
        if page.is_some() {
            return;
        }
        let epoch = js_sys::Date::now() as u64;
        match PageScope::install(config, epoch) {
            Ok(scope) => {
                dom::log(&format!(
                    "installed v{} (epoch {}, {} capability overrides)",
                    version(),
                    scope.epoch(),
                    scope.overrides_installed()
                ));
                *page = Some(scope);
            }
            Err(err) => dom::warn(&format!("install failed: {err:?}")),
        }
    });
}

/// Tear down everything `install` put into the page
#[wasm_bindgen]
pub fn uninstall() {
    PAGE.with(|page| {
        if let Ok(mut page) = page.try_borrow_mut() {
            page.take();
        }
    });
}

/// Whether the simulated fullscreen overlay is active
#[wasm_bindgen]
pub fn is_expanded() -> bool {
    PAGE.with(|page| {
        page.try_borrow()
            .ok()
            .and_then(|page| page.as_ref().map(|scope| scope.expanded_state().is_expanded()))
            .unwrap_or(false)
    })
}

/// Whether the document-ready components are running
#[wasm_bindgen]
pub fn is_ready() -> bool {
    PAGE.with(|page| {
        page.try_borrow()
            .ok()
            .and_then(|page| page.as_ref().map(PageScope::is_ready))
            .unwrap_or(false)
    })
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    perch_core::VERSION.to_string()
}

fn read_config(value: JsValue) -> ContentConfig {
    if value.is_undefined() || value.is_null() {
        return ContentConfig::default();
    }
    let config = match serde_wasm_bindgen::from_value::<ContentConfig>(value) {
        Ok(config) => config,
        Err(err) => {
            dom::warn(&format!("unreadable config, using defaults: {err}"));
            return ContentConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            dom::warn(&format!("{err}, using defaults"));
            ContentConfig::default()
        }
    }
}
