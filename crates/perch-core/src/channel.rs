//! Boundary message channel
//!
//! One named, one-way, fire-and-forget channel per message kind. The content
//! side stamps every message with the page epoch and a per-channel sequence
//! number; the host side uses [`SequenceGate`] to drop envelopes that arrive
//! after a newer one on the same channel, so the newest sample stays
//! authoritative even when the IPC layer reorders deliveries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{DimensionSample, DragDelta};
use crate::Result;

/// Named boundary channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    AspectRatio,
    WindowDrag,
}

impl Channel {
    /// Channel name as seen by the page
    pub fn name(&self) -> &'static str {
        match self {
            Channel::AspectRatio => "aspectRatio",
            Channel::WindowDrag => "windowDrag",
        }
    }

    /// Host IPC command that receives this channel
    pub fn command(&self) -> &'static str {
        match self {
            Channel::AspectRatio => "aspect_ratio",
            Channel::WindowDrag => "window_drag",
        }
    }

    fn index(&self) -> usize {
        match self {
            Channel::AspectRatio => 0,
            Channel::WindowDrag => 1,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit sent from the content context to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryMessage {
    AspectRatio(DimensionSample),
    WindowDrag(DragDelta),
}

impl BoundaryMessage {
    pub fn channel(&self) -> Channel {
        match self {
            BoundaryMessage::AspectRatio(_) => Channel::AspectRatio,
            BoundaryMessage::WindowDrag(_) => Channel::WindowDrag,
        }
    }
}

/// Payload plus ordering stamp, flattened on the wire:
/// `{ "epoch": .., "seq": .., "width": .., "height": .. }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Page install time in milliseconds; a reload starts a newer epoch
    pub epoch: u64,
    /// Per-channel sequence number, starting at 1 for each epoch
    pub seq: u64,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(epoch: u64, seq: u64, payload: T) -> Self {
        Self { epoch, seq, payload }
    }
}

/// Delivery mechanism into the host context.
///
/// `post` must never wait for the host; an unavailable host is reported as
/// [`Error::ChannelUnavailable`](crate::Error::ChannelUnavailable).
pub trait Transport {
    fn post(&self, channel: Channel, body: serde_json::Value) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    fn post(&self, channel: Channel, body: serde_json::Value) -> Result<()> {
        (**self).post(channel, body)
    }
}

/// Sending half owned by one content component
#[derive(Debug)]
pub struct Emitter<T> {
    transport: T,
    epoch: u64,
    seq: [u64; 2],
    dropped: u64,
}

impl<T: Transport> Emitter<T> {
    pub fn new(transport: T, epoch: u64) -> Self {
        Self {
            transport,
            epoch,
            seq: [0; 2],
            dropped: 0,
        }
    }

    /// Fire and forget. Returns whether the transport accepted the message;
    /// a refused message is dropped, never queued or retried.
    pub fn emit(&mut self, message: BoundaryMessage) -> bool {
        let channel = message.channel();
        let slot = &mut self.seq[channel.index()];
        *slot += 1;
        let seq = *slot;

        let body = match message {
            BoundaryMessage::AspectRatio(sample) => {
                serde_json::to_value(Envelope::new(self.epoch, seq, sample))
            }
            BoundaryMessage::WindowDrag(delta) => {
                serde_json::to_value(Envelope::new(self.epoch, seq, delta))
            }
        };

        let result = body
            .map_err(crate::Error::from)
            .and_then(|body| self.transport.post(channel, body));
        match result {
            Ok(()) => true,
            Err(err) => {
                self.dropped += 1;
                debug!(%channel, seq, code = err.error_code(), "Boundary message dropped");
                false
            }
        }
    }

    /// Messages refused by the transport so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Host-side ordering filter
#[derive(Debug, Default)]
pub struct SequenceGate {
    latest: HashMap<Channel, (u64, u64)>,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit an envelope if it is newer than everything seen on its channel
    pub fn admit<T>(&mut self, channel: Channel, envelope: &Envelope<T>) -> bool {
        let stamp = (envelope.epoch, envelope.seq);
        match self.latest.get(&channel) {
            Some(&seen) if stamp <= seen => {
                warn!(%channel, epoch = stamp.0, seq = stamp.1, "Stale boundary message ignored");
                false
            }
            _ => {
                self.latest.insert(channel, stamp);
                true
            }
        }
    }

    /// Forget every channel's history. Called when a new document starts
    /// loading: its epoch comes from the page clock and may sort below the
    /// previous page's after a clock adjustment.
    pub fn reset(&mut self) {
        self.latest.clear();
    }
}
