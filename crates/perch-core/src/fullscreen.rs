//! Fullscreen interception state machine
//!
//! The page never enters native fullscreen. Every gesture that would normally
//! trigger it is classified here; the content runtime stops the event and
//! flips the marker class according to the returned [`Interception`].

use crate::types::ExpandedState;
use tracing::debug;

/// Mouse button index of the primary button
pub const PRIMARY_BUTTON: i16 = 0;

/// Key that always leaves the expanded state
pub const CANCEL_KEY: &str = "Escape";

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.meta || self.ctrl || self.alt
    }
}

/// An input event reduced to what the interceptor needs to know.
///
/// The DOM side resolves targets (e.g. "is this inside the fullscreen button")
/// before building one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerEvent {
    Click {
        button: i16,
        on_fullscreen_control: bool,
    },
    KeyDown {
        key: String,
        modifiers: Modifiers,
        target_editable: bool,
    },
    DoubleClick {
        on_video_surface: bool,
    },
}

/// What the DOM side must do with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Leave the event alone
    Pass,
    /// Stop propagation, prevent default, and apply the new state
    Toggled(ExpandedState),
}

impl Interception {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, Interception::Toggled(_))
    }
}

/// Owner of the single expanded flag
#[derive(Debug, Clone)]
pub struct FullscreenMachine {
    state: ExpandedState,
    shortcut: String,
}

impl FullscreenMachine {
    /// Create a machine in the `Normal` state bound to a shortcut key
    pub fn new(shortcut: impl Into<String>) -> Self {
        Self {
            state: ExpandedState::Normal,
            shortcut: shortcut.into(),
        }
    }

    pub fn state(&self) -> ExpandedState {
        self.state
    }

    /// The only transition
    pub fn toggle(&mut self) -> ExpandedState {
        self.state = self.state.toggled();
        debug!(state = %self.state, "Fullscreen toggled");
        self.state
    }

    /// Classify an event, toggling when it is a fullscreen trigger
    pub fn handle(&mut self, event: &TriggerEvent) -> Interception {
        if self.is_trigger(event) {
            Interception::Toggled(self.toggle())
        } else {
            Interception::Pass
        }
    }

    fn is_trigger(&self, event: &TriggerEvent) -> bool {
        match event {
            TriggerEvent::Click {
                button,
                on_fullscreen_control,
            } => *button == PRIMARY_BUTTON && *on_fullscreen_control,
            TriggerEvent::KeyDown {
                key,
                modifiers,
                target_editable,
            } => {
                if key == CANCEL_KEY {
                    return self.state.is_expanded();
                }
                *key == self.shortcut && !modifiers.any() && !*target_editable
            }
            TriggerEvent::DoubleClick { on_video_surface } => *on_video_surface,
        }
    }
}

impl Default for FullscreenMachine {
    fn default() -> Self {
        Self::new("f")
    }
}
