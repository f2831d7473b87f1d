//! Wire protocol for the presentation sync hub.
//!
//! Exactly two message shapes travel over a WebSocket connection, both JSON
//! text frames wrapped in an [`Envelope`]:
//!
//! - `{"type": "state", "data": {...}}`: a full [`RoomState`] snapshot.
//!   Sent by the hub only; a client never observes a partial state.
//! - `{"type": "update", "data": {...}}`: an [`UpdatePatch`] carrying any
//!   subset of top-level state fields. Sent by clients only.
//!
//! The hub replies to nothing with errors: malformed input is dropped on the
//! server side, so the only protocol-level failure a peer can see here is
//! [`DecodeError`] on its own inbound bytes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Field name of the current slide index.
pub const FIELD_SLIDE: &str = "slide";

/// Field name of the active sound cue.
pub const FIELD_SOUND: &str = "sound";

/// The single shared value describing the current presentation position and
/// active audio cue.
///
/// Two fields are well-known and typed; anything else a controller sends is
/// kept verbatim in `extra` and rebroadcast with every snapshot, so newer
/// clients can introduce fields without a server change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    /// Current slide index, starting at 0.
    pub slide: u64,
    /// Active sound cue, `None` (wire: `null`) when no cue is set.
    pub sound: Option<String>,
    /// Unrecognized fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            slide: 0,
            sound: None,
            extra: Map::new(),
        }
    }
}

/// A partial [`RoomState`] sent by a client.
///
/// Carries only the fields the client wishes to change; each value replaces
/// the corresponding state field wholesale. The payload must be a JSON
/// object, which the transparent map representation enforces at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdatePatch(Map<String, Value>);

impl UpdatePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that moves the presentation to the given slide.
    pub fn slide(index: u64) -> Self {
        Self::new().with(FIELD_SLIDE, Value::from(index))
    }

    /// Patch that sets or clears the active sound cue.
    pub fn sound(cue: Option<String>) -> Self {
        let value = match cue {
            Some(name) => Value::String(name),
            None => Value::Null,
        };
        Self::new().with(FIELD_SOUND, value)
    }

    /// Add a field to the patch, replacing any previous value for that name.
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consume the patch, yielding its fields in insertion order.
    pub fn into_fields(self) -> impl Iterator<Item = (String, Value)> {
        self.0.into_iter()
    }
}

/// Tagged wire message wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Envelope {
    /// Full room state snapshot. Hub to client only.
    State(RoomState),
    /// Partial state update request. Client to hub only.
    Update(UpdatePatch),
}

impl Envelope {
    /// Serialize the envelope to its JSON text representation.
    ///
    /// The variants are a closed, total set of serializable shapes, so this
    /// has no error path.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("envelope serialization cannot fail")
    }

    /// Parse an envelope from a JSON text frame.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// An inbound message that is not well-formed JSON, lacks a recognized
/// `type` tag, or carries a non-object `update` payload.
#[derive(Debug, Error)]
#[error("malformed envelope: {0}")]
pub struct DecodeError(#[from] serde_json::Error);
