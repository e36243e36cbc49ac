//! Injects the expanded-state stylesheet

use perch_core::overlay::{OverlayStylesheet, STYLE_ELEMENT_ID};
use perch_core::SiteProfile;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, EventTarget};

use crate::dom::{self, Listener};

/// The injected `<style>` element; removed from the page on drop
pub(crate) struct OverlayInstall {
    style: Element,
    _deferred: Option<Listener>,
}

impl OverlayInstall {
    /// Attach to `<head>` now, or at DOMContentLoaded when the head has not
    /// been parsed yet (document-start injection).
    pub(crate) fn install(document: &Document, site: &SiteProfile) -> Result<Self, JsValue> {
        let style = match document.get_element_by_id(STYLE_ELEMENT_ID) {
            Some(existing) => existing,
            None => {
                let style = document.create_element("style")?;
                style.set_id(STYLE_ELEMENT_ID);
                style.set_text_content(Some(&OverlayStylesheet::generate(site)));
                style
            }
        };

        if style.is_connected() {
            return Ok(Self {
                style,
                _deferred: None,
            });
        }

        if let Some(head) = document.head() {
            head.append_child(&style)?;
            return Ok(Self {
                style,
                _deferred: None,
            });
        }

        let deferred = {
            let target: EventTarget = document.clone().into();
            let document = document.clone();
            let style = style.clone();
            Listener::bubble(&target, "DOMContentLoaded", move |_| {
                let parent: Option<Element> = document
                    .head()
                    .map(Into::into)
                    .or_else(|| document.document_element());
                match parent {
                    Some(parent) => {
                        if parent.append_child(&style).is_err() {
                            dom::warn("overlay stylesheet could not be attached");
                        }
                    }
                    None => dom::warn("no head to attach the overlay stylesheet to"),
                }
            })?
        };

        Ok(Self {
            style,
            _deferred: Some(deferred),
        })
    }
}

impl Drop for OverlayInstall {
    fn drop(&mut self) {
        self.style.remove();
    }
}
