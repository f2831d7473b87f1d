//! Room entity: the single authoritative copy of presentation state.

use maku_shared::protocol::{FIELD_SLIDE, FIELD_SOUND, RoomState, UpdatePatch};
use serde_json::Value;

use super::value_object::Timestamp;

/// The room. One per process, created at startup with default state, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    state: RoomState,
    created_at: Timestamp,
}

impl Room {
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            state: RoomState::default(),
            created_at,
        }
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Apply a partial update, field by field, and return the resulting full
    /// state.
    ///
    /// Shallow last-writer-wins: each field present in the patch replaces the
    /// stored field wholesale; fields absent from the patch are untouched.
    /// Unknown field names are stored as-is in the extension bag. A value of
    /// the wrong type for one of the well-known fields is skipped, leaving
    /// that field unchanged.
    pub fn merge(&mut self, patch: UpdatePatch) -> RoomState {
        for (field, value) in patch.into_fields() {
            match field.as_str() {
                FIELD_SLIDE => {
                    if let Some(index) = value.as_u64() {
                        self.state.slide = index;
                    } else {
                        tracing::debug!("ignoring non-integer slide value: {}", value);
                    }
                }
                FIELD_SOUND => match value {
                    Value::String(cue) => self.state.sound = Some(cue),
                    Value::Null => self.state.sound = None,
                    other => {
                        tracing::debug!("ignoring non-string sound value: {}", other);
                    }
                },
                _ => {
                    self.state.extra.insert(field, value);
                }
            }
        }
        self.state.clone()
    }
}
