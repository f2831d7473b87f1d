//! WebSocket-backed implementation of [`MessagePusher`].
//!
//! WebSocket connections themselves are created in the UI layer
//! (`ui/handler/websocket.rs`); this implementation only holds each
//! connection's `UnboundedSender` and uses it for delivery. Sends never
//! block: a dead receiver fails the send immediately, and the failing
//! connection is removed from the registry on the spot.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, ConnectedClient, MessagePushError, MessagePusher, PusherChannel, RegistryError,
    Timestamp,
};

/// Per-connection registry entry.
struct ClientInfo {
    sender: PusherChannel,
    connected_at: Timestamp,
}

/// Registry of live WebSocket connections.
pub struct WebSocketMessagePusher {
    /// Map of client_id to its registry entry.
    clients: Arc<Mutex<HashMap<String, ClientInfo>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        client_id: ClientId,
        connected_at: Timestamp,
        sender: PusherChannel,
    ) -> Result<(), RegistryError> {
        let mut clients = self.clients.lock().await;
        if clients.contains_key(client_id.as_str()) {
            return Err(RegistryError::DuplicateClientId(client_id.into_string()));
        }
        let id = client_id.into_string();
        clients.insert(
            id.clone(),
            ClientInfo {
                sender,
                connected_at,
            },
        );
        tracing::debug!("client '{}' registered", id);
        Ok(())
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(client_id.as_str()).is_some() {
            tracing::debug!("client '{}' unregistered", client_id);
        }
    }

    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError> {
        let mut clients = self.clients.lock().await;

        let Some(info) = clients.get(client_id.as_str()) else {
            return Err(MessagePushError::ClientNotFound(
                client_id.as_str().to_string(),
            ));
        };

        if info.sender.send(content.to_string()).is_err() {
            // The receiving task is gone; the registry must not keep the
            // stale handle around.
            clients.remove(client_id.as_str());
            return Err(MessagePushError::PushFailed(
                client_id.as_str().to_string(),
            ));
        }

        tracing::debug!("pushed message to client '{}'", client_id);
        Ok(())
    }

    async fn broadcast_all(&self, content: &str) -> usize {
        let mut clients = self.clients.lock().await;

        let mut dead = Vec::new();
        for (id, info) in clients.iter() {
            if info.sender.send(content.to_string()).is_err() {
                tracing::warn!("send to client '{}' failed, dropping connection", id);
                dead.push(id.clone());
            }
        }
        for id in &dead {
            clients.remove(id);
        }

        clients.len()
    }

    async fn connected_clients(&self) -> Vec<ConnectedClient> {
        let clients = self.clients.lock().await;
        let mut listing: Vec<ConnectedClient> = clients
            .iter()
            .map(|(id, info)| ConnectedClient {
                id: ClientId::new(id.clone()).expect("registry keys are valid client ids"),
                connected_at: info.connected_at,
            })
            .collect();

        // Sort by id for consistent output
        listing.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        listing
    }
}
