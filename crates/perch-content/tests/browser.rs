#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Promise, Reflect};
use perch_content::{install, is_expanded, is_ready, uninstall};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, KeyboardEventInit,
    MouseEvent, MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

const MARKER: &str = "perch-expanded";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn body() -> HtmlElement {
    document().body().unwrap()
}

fn mount(tag: &str, class: &str) -> Element {
    let el = document().create_element(tag).unwrap();
    el.set_class_name(class);
    body().append_child(&el).unwrap();
    el
}

fn click(target: &Element, kind: &str) -> bool {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn press(key: &str) -> bool {
    press_on(body().as_ref(), key)
}

fn press_on(target: &EventTarget, key: &str) -> bool {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn mouse_at(target: &EventTarget, kind: &str, x: i32, y: i32, buttons: u16) -> bool {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_button(0);
    init.set_buttons(buttons);
    init.set_screen_x(x);
    init.set_screen_y(y);
    let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

/// Press at (100, 100) on `target`, move to (160, 140) with the button held, release
fn drag_from(target: &Element) {
    mouse_at(target.as_ref(), "mousedown", 100, 100, 1);
    mouse_at(body().as_ref(), "mousemove", 160, 140, 1);
    mouse_at(body().as_ref(), "mouseup", 160, 140, 0);
}

/// Stand-in for the host IPC global; every `invoke` lands in the returned array
fn record_host_calls() -> Array {
    let calls = Array::new();
    let invoke = Function::new_with_args(
        "command, args",
        "this.calls.push([command, args.envelope]); return Promise.resolve();",
    );
    let internals = Object::new();
    Reflect::set(&internals, &"calls".into(), &calls).unwrap();
    Reflect::set(&internals, &"invoke".into(), &invoke).unwrap();
    Reflect::set(&js_sys::global(), &"__TAURI_INTERNALS__".into(), &internals).unwrap();
    calls
}

fn forget_host() {
    Reflect::delete_property(&js_sys::global(), &"__TAURI_INTERNALS__".into()).unwrap();
}

/// Envelopes sent to `command`, oldest first
fn sent(calls: &Array, command: &str) -> Vec<JsValue> {
    calls
        .iter()
        .map(|call| call.unchecked_into::<Array>())
        .filter(|call| call.get(0).as_string().as_deref() == Some(command))
        .map(|call| call.get(1))
        .collect()
}

fn field(envelope: &JsValue, name: &str) -> f64 {
    Reflect::get(envelope, &name.into()).unwrap().as_f64().unwrap()
}

fn video(width: u32, height: u32) -> Element {
    let video = document().create_element("video").unwrap();
    video.set_class_name("html5-main-video");
    for (name, value) in [("videoWidth", width), ("videoHeight", height)] {
        let descriptor = Object::new();
        Reflect::set(&descriptor, &"value".into(), &value.into()).unwrap();
        Object::define_property(video.unchecked_ref(), &name.into(), &descriptor);
    }
    body().append_child(&video).unwrap();
    video
}

/// Let queued microtasks (mutation observer callbacks) run
async fn settle() {
    JsFuture::from(Promise::resolve(&JsValue::UNDEFINED)).await.unwrap();
}

fn property(name: &str) -> JsValue {
    Reflect::get(document().as_ref(), &name.into()).unwrap()
}

#[wasm_bindgen_test]
fn fullscreen_button_toggles_marker() {
    install(JsValue::UNDEFINED);
    let button = mount("button", "ytp-fullscreen-button");

    // dispatch_event returns false when the default was prevented
    assert!(!click(&button, "click"));
    assert!(is_expanded());
    assert!(body().class_list().contains(MARKER));

    assert!(!click(&button, "click"));
    assert!(!is_expanded());
    assert!(!body().class_list().contains(MARKER));

    button.remove();
    uninstall();
}

#[wasm_bindgen_test]
fn escape_only_acts_when_expanded() {
    install(JsValue::UNDEFINED);
    assert!(press("Escape"));
    assert!(!is_expanded());

    assert!(!press("f"));
    assert!(is_expanded());
    assert!(!press("Escape"));
    assert!(!is_expanded());
    uninstall();
}

#[wasm_bindgen_test]
fn capabilities_report_available_but_inactive() {
    install(JsValue::UNDEFINED);
    assert_eq!(property("fullscreenEnabled"), JsValue::TRUE);
    assert!(property("fullscreenElement").is_null());

    let button = mount("button", "ytp-fullscreen-button");
    click(&button, "click");
    assert_eq!(property("fullscreenEnabled"), JsValue::TRUE);
    assert!(property("fullscreenElement").is_null());
    assert!(property("webkitFullscreenElement").is_null());
    click(&button, "click");
    button.remove();
    uninstall();
}

#[wasm_bindgen_test]
fn ready_phase_runs_on_parsed_document() {
    install(JsValue::UNDEFINED);
    assert!(is_ready());
    uninstall();
    assert!(!is_ready());
    assert!(document().get_element_by_id("perch-overlay").is_none());
}

#[wasm_bindgen_test]
fn double_click_outside_player_passes() {
    install(JsValue::UNDEFINED);
    let stray = mount("div", "not-the-player");
    assert!(click(&stray, "dblclick"));
    assert!(!is_expanded());
    stray.remove();

    let player = mount("div", "");
    player.set_id("movie_player");
    let video = document().create_element("video").unwrap();
    player.append_child(&video).unwrap();
    assert!(!click(&video, "dblclick"));
    assert!(is_expanded());
    assert!(!click(&video, "dblclick"));
    player.remove();
    uninstall();
}

#[wasm_bindgen_test]
fn fullscreen_click_never_reaches_page_listeners() {
    install(JsValue::UNDEFINED);
    let button = mount("button", "ytp-fullscreen-button");
    let other = mount("button", "ytp-play-button");
    let reached = Rc::new(Cell::new(0));
    let on_click = {
        let reached = reached.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| reached.set(reached.get() + 1))
    };
    let listener: &Function = on_click.as_ref().unchecked_ref();
    button.add_event_listener_with_callback("click", listener).unwrap();
    other.add_event_listener_with_callback("click", listener).unwrap();

    click(&button, "click");
    click(&button, "click");
    assert_eq!(reached.get(), 0);
    assert!(!is_expanded());

    // other player controls still get their clicks
    assert!(click(&other, "click"));
    assert_eq!(reached.get(), 1);

    button.remove();
    other.remove();
    uninstall();
}

#[wasm_bindgen_test]
fn key_before_body_exists_passes_through() {
    install(JsValue::UNDEFINED);
    let root = document().document_element().unwrap();
    let page_body = body();
    root.remove_child(&page_body).unwrap();

    assert!(press_on(document().as_ref(), "f"));
    assert!(!is_expanded());

    root.append_child(&page_body).unwrap();
    assert!(!press("f"));
    assert!(is_expanded());
    assert!(body().class_list().contains(MARKER));
    press("Escape");
    uninstall();
}

#[wasm_bindgen_test]
fn drag_from_excluded_regions_never_moves_window() {
    let calls = record_host_calls();
    install(JsValue::UNDEFINED);

    let link = mount("a", "");
    let slider = mount("div", "");
    slider.set_attribute("role", "slider").unwrap();
    let knob = document().create_element("span").unwrap();
    slider.append_child(&knob).unwrap();
    let controls = mount("div", "ytp-chrome-bottom");
    let control = document().create_element("div").unwrap();
    controls.append_child(&control).unwrap();

    for target in [&link, &knob, &control] {
        drag_from(target);
    }
    assert!(sent(&calls, "window_drag").is_empty());

    let surface = mount("div", "plain-surface");
    drag_from(&surface);
    let drags = sent(&calls, "window_drag");
    assert_eq!(drags.len(), 1);
    assert_eq!(field(&drags[0], "dx"), 60.0);
    assert_eq!(field(&drags[0], "dy"), 40.0);

    for el in [link, slider, controls, surface] {
        el.remove();
    }
    uninstall();
    forget_host();
}

#[wasm_bindgen_test]
async fn swapped_video_is_watched() {
    let calls = record_host_calls();
    let first = video(1280, 720);
    let config = js_sys::JSON::parse(r#"{"pollIntervalMs": 10000}"#).unwrap();
    install(config);

    let reports = sent(&calls, "aspect_ratio");
    assert_eq!(reports.len(), 1);
    assert_eq!(field(&reports[0], "width"), 1280.0);

    first.remove();
    let second = video(1920, 800);
    settle().await;
    assert_eq!(sent(&calls, "aspect_ratio").len(), 1);

    // only a hooked element reports before the next poll
    second.dispatch_event(&Event::new("loadedmetadata").unwrap()).unwrap();
    let reports = sent(&calls, "aspect_ratio");
    assert_eq!(reports.len(), 2);
    assert_eq!(field(&reports[1], "width"), 1920.0);
    assert_eq!(field(&reports[1], "height"), 800.0);
    assert!(field(&reports[1], "seq") > field(&reports[0], "seq"));

    second.remove();
    uninstall();
    forget_host();
}
