//! Dimension watcher: periodic poll plus a `loadedmetadata` fast path
//!
//! The site swaps its video element without navigating, so new elements are
//! discovered with a subtree `MutationObserver` and hooked as they appear.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function};
use perch_core::{BoundaryMessage, ContentConfig, DimensionTracker, Emitter};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlVideoElement, MutationObserver, MutationObserverInit, Window};

use crate::bridge::HostTransport;

/// Reads the main video and reports accepted samples
struct VideoReader {
    document: Document,
    selector: String,
    tracker: DimensionTracker,
    emitter: Emitter<HostTransport>,
}

impl VideoReader {
    fn video(&self) -> Option<HtmlVideoElement> {
        self.document
            .query_selector(&self.selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlVideoElement>()
            .ok()
    }

    fn check(&mut self) {
        let read = self.video().map(|v| (v.video_width(), v.video_height()));
        if let Some(sample) = self.tracker.observe_optional(read) {
            self.emitter.emit(BoundaryMessage::AspectRatio(sample));
        }
    }
}

pub(crate) struct DimensionWatcher {
    window: Window,
    interval: i32,
    observer: MutationObserver,
    hooked: Rc<RefCell<Option<HtmlVideoElement>>>,
    on_metadata: Function,
    _tick: Closure<dyn FnMut()>,
    _metadata: Closure<dyn FnMut(Event)>,
    _mutation: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl DimensionWatcher {
    pub(crate) fn install(
        window: &Window,
        document: &Document,
        config: &ContentConfig,
        epoch: u64,
    ) -> Result<Self, JsValue> {
        let reader = Rc::new(RefCell::new(VideoReader {
            document: document.clone(),
            selector: config.site.main_video.clone(),
            tracker: DimensionTracker::new(),
            emitter: Emitter::new(HostTransport, epoch),
        }));

        let tick = {
            let reader = reader.clone();
            Closure::wrap(Box::new(move || {
                if let Ok(mut reader) = reader.try_borrow_mut() {
                    reader.check();
                }
            }) as Box<dyn FnMut()>)
        };
        let metadata = {
            let reader = reader.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                if let Ok(mut reader) = reader.try_borrow_mut() {
                    reader.check();
                }
            }) as Box<dyn FnMut(Event)>)
        };
        let on_metadata: Function = metadata.as_ref().unchecked_ref::<Function>().clone();

        let hooked = Rc::new(RefCell::new(None));
        let hook = {
            let reader = reader.clone();
            let hooked = hooked.clone();
            let on_metadata = on_metadata.clone();
            move || {
                let Some(video) = reader.try_borrow().ok().and_then(|p| p.video()) else {
                    return;
                };
                hook_video(&hooked, &video, &on_metadata);
            }
        };
        hook();

        let mutation = {
            let hook = hook.clone();
            Closure::wrap(Box::new(move |_records: Array, _observer: MutationObserver| {
                hook();
            }) as Box<dyn FnMut(Array, MutationObserver)>)
        };
        let observer = MutationObserver::new(mutation.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        let root = document
            .body()
            .map(Into::into)
            .or_else(|| document.document_element())
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        observer.observe_with_options(&root, &init)?;

        let interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            config.poll_interval_ms as i32,
        )?;

        reader.borrow_mut().check();

        Ok(Self {
            window: window.clone(),
            interval,
            observer,
            hooked,
            on_metadata,
            _tick: tick,
            _metadata: metadata,
            _mutation: mutation,
        })
    }
}

/// Move the `loadedmetadata` listener onto `video` if it is a new element
fn hook_video(
    hooked: &RefCell<Option<HtmlVideoElement>>,
    video: &HtmlVideoElement,
    on_metadata: &Function,
) {
    let mut hooked = hooked.borrow_mut();
    if hooked.as_ref() == Some(video) {
        return;
    }
    if let Some(previous) = hooked.take() {
        let _ = previous.remove_event_listener_with_callback("loadedmetadata", on_metadata);
    }
    if video
        .add_event_listener_with_callback("loadedmetadata", on_metadata)
        .is_ok()
    {
        *hooked = Some(video.clone());
    }
}

impl Drop for DimensionWatcher {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.interval);
        self.observer.disconnect();
        if let Some(video) = self.hooked.borrow_mut().take() {
            let _ = video.remove_event_listener_with_callback("loadedmetadata", &self.on_metadata);
        }
    }
}
