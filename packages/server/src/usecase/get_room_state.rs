//! UseCase: read the current room state.

use std::sync::Arc;

use maku_shared::protocol::RoomState;

use crate::domain::StateStore;

pub struct GetRoomStateUseCase {
    store: Arc<dyn StateStore>,
}

impl GetRoomStateUseCase {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> RoomState {
        self.store.snapshot().await
    }
}
