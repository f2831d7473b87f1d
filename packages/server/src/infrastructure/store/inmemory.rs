//! In-memory state store.
//!
//! The Room entity itself is the storage; a mutex around it makes each
//! merge atomic with respect to concurrent callers. Nothing is persisted:
//! state is created at process start and lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use maku_shared::protocol::{RoomState, UpdatePatch};

use crate::domain::{Room, StateStore};

/// In-memory implementation of [`StateStore`].
pub struct InMemoryStateStore {
    room: Arc<Mutex<Room>>,
}

impl InMemoryStateStore {
    pub fn new(room: Arc<Mutex<Room>>) -> Self {
        Self { room }
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn snapshot(&self) -> RoomState {
        let room = self.room.lock().await;
        room.state().clone()
    }

    async fn merge(&self, patch: UpdatePatch) -> RoomState {
        let mut room = self.room.lock().await;
        room.merge(patch)
    }

    async fn room(&self) -> Room {
        let room = self.room.lock().await;
        room.clone()
    }
}
