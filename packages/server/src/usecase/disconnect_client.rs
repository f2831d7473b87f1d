//! UseCase: client disconnection.
//!
//! Removes the connection from the registry. Disconnection triggers no
//! broadcast: remaining clients keep their last snapshot and the room state
//! is untouched.

use std::sync::Arc;

use crate::domain::{ClientId, MessagePusher};

pub struct DisconnectClientUseCase {
    pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(pusher: Arc<dyn MessagePusher>) -> Self {
        Self { pusher }
    }

    /// Unregister a connection. Idempotent; unknown ids are a no-op.
    pub async fn execute(&self, client_id: &ClientId) {
        self.pusher.unregister_client(client_id).await;
        tracing::info!("client '{}' disconnected", client_id);
    }
}
