//! Capture-phase interception of the page's fullscreen triggers

use std::cell::RefCell;
use std::rc::Rc;

use perch_core::{
    ExpandedState, FullscreenMachine, Interception, Modifiers, SiteProfile, TriggerEvent,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

use crate::dom::{self, closest, is_editable, swallow, target_element, Listener};

pub(crate) struct FullscreenInterceptor {
    machine: Rc<RefCell<FullscreenMachine>>,
    _listeners: Vec<Listener>,
}

impl FullscreenInterceptor {
    pub(crate) fn install(document: &Document, site: &SiteProfile) -> Result<Self, JsValue> {
        let machine = Rc::new(RefCell::new(FullscreenMachine::new(site.fullscreen_key.clone())));
        let target: &EventTarget = document.as_ref();

        let on_click = {
            let machine = machine.clone();
            let document = document.clone();
            let site = site.clone();
            move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(element) = target_element(&event) else {
                    return;
                };
                let trigger = TriggerEvent::Click {
                    button: mouse.button(),
                    on_fullscreen_control: closest(&element, &site.fullscreen_control).is_some(),
                };
                dispatch(&machine, &document, &site.marker_class, &event, &trigger);
            }
        };

        let on_keydown = {
            let machine = machine.clone();
            let document = document.clone();
            let site = site.clone();
            move |event: Event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let trigger = TriggerEvent::KeyDown {
                    key: key.key(),
                    modifiers: Modifiers {
                        meta: key.meta_key(),
                        ctrl: key.ctrl_key(),
                        alt: key.alt_key(),
                    },
                    target_editable: target_element(&event).is_some_and(|el| is_editable(&el)),
                };
                dispatch(&machine, &document, &site.marker_class, &event, &trigger);
            }
        };

        let on_dblclick = {
            let machine = machine.clone();
            let document = document.clone();
            let site = site.clone();
            move |event: Event| {
                let Some(element) = target_element(&event) else {
                    return;
                };
                let in_player = closest(&element, &site.player_root).is_some();
                let on_surface = element.tag_name().eq_ignore_ascii_case("video")
                    || closest(&element, &site.video_container).is_some();
                let trigger = TriggerEvent::DoubleClick {
                    on_video_surface: in_player && on_surface,
                };
                dispatch(&machine, &document, &site.marker_class, &event, &trigger);
            }
        };

        let listeners = vec![
            Listener::capture(target, "click", on_click)?,
            Listener::capture(target, "keydown", on_keydown)?,
            Listener::capture(target, "dblclick", on_dblclick)?,
        ];

        Ok(Self {
            machine,
            _listeners: listeners,
        })
    }

    pub(crate) fn state(&self) -> ExpandedState {
        self.machine.borrow().state()
    }
}

fn dispatch(
    machine: &RefCell<FullscreenMachine>,
    document: &Document,
    marker: &str,
    event: &Event,
    trigger: &TriggerEvent,
) {
    // without a body the overlay cannot follow the state, so the page keeps the event
    let Some(body) = document.body() else {
        return;
    };
    let Ok(mut machine) = machine.try_borrow_mut() else {
        return;
    };
    if let Interception::Toggled(state) = machine.handle(trigger) {
        swallow(event);
        apply_marker(&body, marker, state);
    }
}

fn apply_marker(body: &HtmlElement, marker: &str, state: ExpandedState) {
    if body.class_list().toggle_with_force(marker, state.is_expanded()).is_err() {
        dom::warn("marker class could not be toggled");
    }
}
