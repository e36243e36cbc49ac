//! Drag-to-move bridge

use std::cell::RefCell;
use std::rc::Rc;

use perch_core::{BoundaryMessage, ContentConfig, DragStep, DragTracker, Emitter, ScreenPoint};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, MouseEvent};

use crate::bridge::HostTransport;
use crate::dom::{closest, target_element, Listener};

/// `MouseEvent.buttons` bit of the primary button
const PRIMARY_HELD: u16 = 1;

struct DragState {
    tracker: DragTracker,
    emitter: Emitter<HostTransport>,
    exclusions: String,
}

pub(crate) struct DragBridge {
    _listeners: Vec<Listener>,
}

impl DragBridge {
    pub(crate) fn install(
        document: &Document,
        config: &ContentConfig,
        epoch: u64,
    ) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(DragState {
            tracker: DragTracker::new(config.drag_threshold),
            emitter: Emitter::new(HostTransport, epoch),
            exclusions: config.site.drag_exclusion_selector(),
        }));
        let target: &EventTarget = document.as_ref();

        let on_down = {
            let state = state.clone();
            move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Ok(mut state) = state.try_borrow_mut() else {
                    return;
                };
                let Some(element) = target_element(&event) else {
                    state.tracker.pointer_up();
                    return;
                };
                let excluded = closest(&element, &state.exclusions).is_some();
                state.tracker.pointer_down(mouse.button(), screen_point(mouse), excluded);
            }
        };

        let on_move = {
            let state = state.clone();
            move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Ok(mut state) = state.try_borrow_mut() else {
                    return;
                };
                let held = mouse.buttons() & PRIMARY_HELD != 0;
                let step = state.tracker.pointer_move(screen_point(mouse), held);
                if let DragStep::Moved(delta) = step {
                    state.emitter.emit(BoundaryMessage::WindowDrag(delta));
                    event.prevent_default();
                }
            }
        };

        let on_up = {
            let state = state.clone();
            move |_event: Event| {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.tracker.pointer_up();
                }
            }
        };

        Ok(Self {
            _listeners: vec![
                Listener::bubble(target, "mousedown", on_down)?,
                Listener::bubble(target, "mousemove", on_move)?,
                Listener::bubble(target, "mouseup", on_up)?,
            ],
        })
    }
}

fn screen_point(event: &MouseEvent) -> ScreenPoint {
    ScreenPoint::new(f64::from(event.screen_x()), f64::from(event.screen_y()))
}
