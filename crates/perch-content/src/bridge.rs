//! Boundary transport over the host's IPC `invoke`
//!
//! Each channel maps to one host command. `invoke` returns a promise that is
//! detached immediately; the emitter never waits on the host.

use js_sys::{Function, Object, Promise, Reflect};
use perch_core::{Channel, Error, Transport};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::dom;

/// Global the host injects into every page it displays
const IPC_GLOBAL: &str = "__TAURI_INTERNALS__";

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HostTransport;

impl HostTransport {
    fn invoke_fn() -> Option<(JsValue, Function)> {
        let internals = Reflect::get(&js_sys::global(), &IPC_GLOBAL.into()).ok()?;
        if internals.is_undefined() || internals.is_null() {
            return None;
        }
        let invoke = Reflect::get(&internals, &"invoke".into())
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some((internals, invoke))
    }
}

impl Transport for HostTransport {
    fn post(&self, channel: Channel, body: serde_json::Value) -> perch_core::Result<()> {
        let (internals, invoke) =
            Self::invoke_fn().ok_or(Error::ChannelUnavailable(channel))?;
        let transport_err = |reason: String| Error::Transport { channel, reason };

        let envelope = body
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| transport_err(e.to_string()))?;
        let args = Object::new();
        Reflect::set(&args, &"envelope".into(), &envelope)
            .map_err(|e| transport_err(format!("{e:?}")))?;

        let pending = invoke
            .call2(&internals, &channel.command().into(), &args)
            .map_err(|e| transport_err(format!("{e:?}")))?;

        if let Ok(promise) = pending.dyn_into::<Promise>() {
            spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    dom::warn(&format!("{channel} rejected by host: {err:?}"));
                }
            });
        }
        Ok(())
    }
}
