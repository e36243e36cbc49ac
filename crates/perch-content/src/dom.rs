//! DOM helpers shared by the page components

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlElement};

/// An event listener that is removed when dropped
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn new(
        target: &EventTarget,
        kind: &'static str,
        capture: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback_and_bool(
            kind,
            closure.as_ref().unchecked_ref(),
            capture,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            capture,
            closure,
        })
    }

    /// Listen in the capture phase, ahead of the page's own handlers
    pub(crate) fn capture(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        Self::new(target, kind, true, handler)
    }

    /// Listen in the bubble phase
    pub(crate) fn bubble(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        Self::new(target, kind, false, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// The event's target as an element, if it is one
pub(crate) fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// `Element.closest`, with invalid selectors treated as no match
pub(crate) fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// Whether typing into `element` would insert text
pub(crate) fn is_editable(element: &Element) -> bool {
    let tag = element.tag_name().to_ascii_lowercase();
    if tag == "input" || tag == "textarea" {
        return true;
    }
    element
        .dyn_ref::<HtmlElement>()
        .is_some_and(|el| el.is_content_editable())
}

/// Stop the page from seeing an intercepted event
pub(crate) fn swallow(event: &Event) {
    event.stop_propagation();
    event.prevent_default();
}

pub(crate) fn log(message: &str) {
    web_sys::console::log_1(&format!("[Perch] {message}").into());
}

pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&format!("[Perch] {message}").into());
}
