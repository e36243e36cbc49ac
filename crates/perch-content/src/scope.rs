//! Per-page installation scope
//!
//! Everything the runtime installs into a page (stylesheet, capability
//! overrides, listeners, interval, observer) is owned by one [`PageScope`].
//! Dropping the scope tears all of it down.

use std::cell::RefCell;
use std::rc::Rc;

use perch_core::{ContentConfig, ExpandedState};
use wasm_bindgen::JsValue;
use web_sys::{Document, EventTarget, Window};

use crate::capability::CapabilityOverrides;
use crate::dimension::DimensionWatcher;
use crate::dom::{self, Listener};
use crate::drag::DragBridge;
use crate::fullscreen::FullscreenInterceptor;
use crate::overlay::OverlayInstall;

/// Components that need the parsed document
struct ReadyPhase {
    _watcher: DimensionWatcher,
    _drag: DragBridge,
}

impl ReadyPhase {
    fn install(
        window: &Window,
        document: &Document,
        config: &ContentConfig,
        epoch: u64,
    ) -> Result<Self, JsValue> {
        Ok(Self {
            _watcher: DimensionWatcher::install(window, document, config, epoch)?,
            _drag: DragBridge::install(document, config, epoch)?,
        })
    }
}

pub(crate) struct PageScope {
    epoch: u64,
    fullscreen: FullscreenInterceptor,
    capabilities: CapabilityOverrides,
    _overlay: OverlayInstall,
    ready: Rc<RefCell<Option<ReadyPhase>>>,
    _ready_listener: Option<Listener>,
}

impl PageScope {
    /// Document-start phase now; document-ready phase now or at DOMContentLoaded
    pub(crate) fn install(config: ContentConfig, epoch: u64) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        let overlay = OverlayInstall::install(&document, &config.site)?;
        let capabilities = CapabilityOverrides::install(&document)?;
        let fullscreen = FullscreenInterceptor::install(&document, &config.site)?;

        let ready = Rc::new(RefCell::new(None));
        let ready_listener = if document.ready_state() == "loading" {
            let target: EventTarget = document.clone().into();
            let slot = ready.clone();
            let listener = Listener::bubble(&target, "DOMContentLoaded", move |_| {
                install_ready(&slot, &window, &document, &config, epoch);
            })?;
            Some(listener)
        } else {
            install_ready(&ready, &window, &document, &config, epoch);
            None
        };

        Ok(Self {
            epoch,
            fullscreen,
            capabilities,
            _overlay: overlay,
            ready,
            _ready_listener: ready_listener,
        })
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn expanded_state(&self) -> ExpandedState {
        self.fullscreen.state()
    }

    pub(crate) fn overrides_installed(&self) -> usize {
        self.capabilities.len()
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready.borrow().is_some()
    }
}

fn install_ready(
    slot: &RefCell<Option<ReadyPhase>>,
    window: &Window,
    document: &Document,
    config: &ContentConfig,
    epoch: u64,
) {
    let Ok(mut slot) = slot.try_borrow_mut() else {
        return;
    };
    if slot.is_some() {
        return;
    }
    match ReadyPhase::install(window, document, config, epoch) {
        Ok(phase) => {
            *slot = Some(phase);
            dom::log("dimension watcher and drag bridge installed");
        }
        Err(err) => dom::warn(&format!("document-ready install failed: {err:?}")),
    }
}
