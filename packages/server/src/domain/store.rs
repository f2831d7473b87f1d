//! State store interface.

use async_trait::async_trait;
use maku_shared::protocol::{RoomState, UpdatePatch};

use super::entity::Room;

/// Interface to the single authoritative room state.
///
/// Defined by the domain layer and implemented by the infrastructure layer
/// (dependency inversion). `merge` is atomic with respect to concurrent
/// callers: no reader observes a state mixing fields from two merges applied
/// out of arrival order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current full state. No side effects.
    async fn snapshot(&self) -> RoomState;

    /// Apply a partial update and return the resulting full state.
    ///
    /// Never fails: unknown field names are accepted and stored as-is.
    async fn merge(&self, patch: UpdatePatch) -> RoomState;

    /// The room entity, including creation time.
    async fn room(&self) -> Room;
}
