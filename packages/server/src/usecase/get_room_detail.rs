//! UseCase: read room state together with the connection listing.
//!
//! Backs the debug endpoint only; nothing in the sync path depends on it.

use std::sync::Arc;

use crate::domain::{ConnectedClient, MessagePusher, Room, StateStore};

/// Room entity plus the currently registered connections.
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub room: Room,
    pub clients: Vec<ConnectedClient>,
}

pub struct GetRoomDetailUseCase {
    store: Arc<dyn StateStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl GetRoomDetailUseCase {
    pub fn new(store: Arc<dyn StateStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { store, pusher }
    }

    pub async fn execute(&self) -> RoomDetail {
        RoomDetail {
            room: self.store.room().await,
            clients: self.pusher.connected_clients().await,
        }
    }
}
