//! Perch Core - behavior layer for a floating video window
//!
//! This crate holds everything that does not depend on a browser or a
//! windowing toolkit:
//! - Fullscreen interception state machine and capability substitution table
//! - Video dimension change tracking
//! - Drag-to-move gesture sessions
//! - Boundary channel envelopes, emitter and host-side ordering gate
//! - Expanded-state stylesheet generation
//! - Window geometry, aspect lock and persisted window state
//! - Host adapter applying boundary messages to a window
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────── content context ────────────────────────┐
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │  Fullscreen  │  │  Dimension   │  │     Drag     │           │
//! │  │   Machine    │  │   Tracker    │  │   Tracker    │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │  ┌──────┴───────┐  ┌──────┴─────────────────┴──────┐            │
//! │  │   Overlay    │  │            Emitter            │            │
//! │  │  Stylesheet  │  └───────────────┬───────────────┘            │
//! │  └──────────────┘                  │                            │
//! └────────────────────────────────────┼────────────────────────────┘
//!                     aspectRatio / windowDrag (fire-and-forget)
//! ┌────────────────────────────────────┼─────── host context ───────┐
//! │                      ┌─────────────┴──────────┐                 │
//! │                      │  SequenceGate + Host   │                 │
//! │                      │        Adapter         │                 │
//! │                      └─────────────┬──────────┘                 │
//! │                               WindowControl                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod capability;
pub mod channel;
pub mod config;
pub mod dimension;
pub mod drag;
pub mod error;
pub mod fullscreen;
pub mod geometry;
pub mod host;
pub mod overlay;
pub mod site;
pub mod state;
pub mod types;

pub use capability::{CapabilityOverride, OverrideTarget, Replacement, FULLSCREEN_OVERRIDES};
pub use channel::{BoundaryMessage, Channel, Emitter, Envelope, SequenceGate, Transport};
pub use config::ContentConfig;
pub use dimension::DimensionTracker;
pub use drag::{DragSession, DragStep, DragTracker, DRAG_THRESHOLD};
pub use error::{Error, Result};
pub use fullscreen::{FullscreenMachine, Interception, Modifiers, TriggerEvent};
pub use geometry::{AspectLock, AxisOrientation, Point, Rect, Size};
pub use host::{HostAdapter, WindowControl};
pub use overlay::OverlayStylesheet;
pub use site::SiteProfile;
pub use state::{WindowState, WindowStateStore};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
