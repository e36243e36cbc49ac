//! Fullscreen capability substitution table
//!
//! Describes how the page's fullscreen API surface is replaced so the page
//! always sees fullscreen as available but inactive. The content runtime
//! walks [`FULLSCREEN_OVERRIDES`] once per page and installs each entry.

use serde::Serialize;

/// Object an override is installed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OverrideTarget {
    /// `document`
    Document,
    /// `Element.prototype`
    ElementPrototype,
}

/// Replacement installed for one property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Replacement {
    /// Configurable getter that always returns `true`
    GetterTrue,
    /// Configurable getter that always returns `null`
    GetterNull,
    /// Method that returns an already-resolved promise
    ResolvedPromise,
    /// Method that does nothing and returns `undefined`
    NoOp,
}

impl Replacement {
    pub fn is_getter(&self) -> bool {
        matches!(self, Replacement::GetterTrue | Replacement::GetterNull)
    }
}

/// One entry in the substitution table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityOverride {
    pub target: OverrideTarget,
    pub property: &'static str,
    pub replacement: Replacement,
}

const fn entry(
    target: OverrideTarget,
    property: &'static str,
    replacement: Replacement,
) -> CapabilityOverride {
    CapabilityOverride {
        target,
        property,
        replacement,
    }
}

/// Every fullscreen capability the page can query or invoke
pub const FULLSCREEN_OVERRIDES: &[CapabilityOverride] = &[
    entry(OverrideTarget::Document, "fullscreenEnabled", Replacement::GetterTrue),
    entry(OverrideTarget::Document, "webkitFullscreenEnabled", Replacement::GetterTrue),
    entry(OverrideTarget::Document, "fullscreenElement", Replacement::GetterNull),
    entry(OverrideTarget::Document, "webkitFullscreenElement", Replacement::GetterNull),
    entry(OverrideTarget::Document, "webkitCurrentFullScreenElement", Replacement::GetterNull),
    entry(OverrideTarget::ElementPrototype, "requestFullscreen", Replacement::ResolvedPromise),
    entry(OverrideTarget::ElementPrototype, "webkitRequestFullscreen", Replacement::NoOp),
    entry(OverrideTarget::ElementPrototype, "webkitRequestFullScreen", Replacement::NoOp),
    entry(OverrideTarget::Document, "exitFullscreen", Replacement::ResolvedPromise),
    entry(OverrideTarget::Document, "webkitExitFullscreen", Replacement::NoOp),
    entry(OverrideTarget::Document, "webkitCancelFullScreen", Replacement::NoOp),
];
