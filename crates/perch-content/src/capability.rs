//! Fullscreen capability substitution
//!
//! One adapter object owns every replacement function it installs and puts
//! the page's original descriptors back when it is dropped.

use js_sys::{Object, Promise, Reflect};
use perch_core::capability::{OverrideTarget, Replacement, FULLSCREEN_OVERRIDES};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Document;

use crate::dom;

struct Installed {
    target: Object,
    key: JsValue,
    /// Own property descriptor before the override, `undefined` if none
    original: JsValue,
}

pub(crate) struct CapabilityOverrides {
    installed: Vec<Installed>,
    _functions: Vec<Closure<dyn Fn() -> JsValue>>,
}

impl CapabilityOverrides {
    pub(crate) fn install(document: &Document) -> Result<Self, JsValue> {
        let document: &Object = document.as_ref();
        let element_prototype = element_prototype()?;
        let mut installed = Vec::with_capacity(FULLSCREEN_OVERRIDES.len());
        let mut functions = Vec::with_capacity(FULLSCREEN_OVERRIDES.len());

        for entry in FULLSCREEN_OVERRIDES {
            let target = match entry.target {
                OverrideTarget::Document => document,
                OverrideTarget::ElementPrototype => &element_prototype,
            };
            let key = JsValue::from_str(entry.property);
            let original = Object::get_own_property_descriptor(target, &key);
            let function = replacement(entry.replacement);

            let descriptor = Object::new();
            if entry.replacement.is_getter() {
                Reflect::set(&descriptor, &"get".into(), function.as_ref())?;
            } else {
                Reflect::set(&descriptor, &"value".into(), function.as_ref())?;
                Reflect::set(&descriptor, &"writable".into(), &JsValue::TRUE)?;
            }
            Reflect::set(&descriptor, &"configurable".into(), &JsValue::TRUE)?;

            if Reflect::define_property(target, &key, &descriptor)? {
                installed.push(Installed {
                    target: target.clone(),
                    key,
                    original,
                });
                functions.push(function);
            } else {
                dom::warn(&format!("{} is locked by the page, left as is", entry.property));
            }
        }

        Ok(Self {
            installed,
            _functions: functions,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.installed.len()
    }
}

impl Drop for CapabilityOverrides {
    fn drop(&mut self) {
        for entry in self.installed.iter().rev() {
            if entry.original.is_undefined() {
                let _ = Reflect::delete_property(&entry.target, &entry.key);
            } else {
                let _ = Reflect::define_property(
                    &entry.target,
                    &entry.key,
                    entry.original.unchecked_ref::<Object>(),
                );
            }
        }
    }
}

fn element_prototype() -> Result<Object, JsValue> {
    let constructor = Reflect::get(&js_sys::global(), &"Element".into())?;
    Reflect::get(&constructor, &"prototype".into())?.dyn_into::<Object>()
}

fn replacement(kind: Replacement) -> Closure<dyn Fn() -> JsValue> {
    let getter: Box<dyn Fn() -> JsValue> = match kind {
        Replacement::GetterTrue => Box::new(|| JsValue::TRUE),
        Replacement::GetterNull => Box::new(|| JsValue::NULL),
        Replacement::ResolvedPromise => Box::new(|| Promise::resolve(&JsValue::UNDEFINED).into()),
        Replacement::NoOp => Box::new(|| JsValue::UNDEFINED),
    };
    Closure::wrap(getter)
}
