//! Message pusher / connection registry interface.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::{MessagePushError, RegistryError};
use super::value_object::{ClientId, Timestamp};

/// Send handle for one connection's outbound messages.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// A currently registered connection, as seen by read-only views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedClient {
    pub id: ClientId,
    pub connected_at: Timestamp,
}

/// Interface for tracking live connections and pushing encoded messages to
/// them.
///
/// The registry holds a non-owning send handle per connection: a handle
/// whose send fails is dropped from the registry without affecting room
/// state, so stale handles never crash the hub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a connection. Ids must be unique per live connection.
    async fn register_client(
        &self,
        client_id: ClientId,
        connected_at: Timestamp,
        sender: PusherChannel,
    ) -> Result<(), RegistryError>;

    /// Remove a connection. Idempotent: removing an absent id is a no-op.
    async fn unregister_client(&self, client_id: &ClientId);

    /// Deliver a message to one specific connection.
    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError>;

    /// Deliver a message to every registered connection, in no guaranteed
    /// order. Connections whose send fails are unregistered as a side
    /// effect. Returns the number of connections that received the message.
    async fn broadcast_all(&self, content: &str) -> usize;

    /// Listing of currently registered connections.
    async fn connected_clients(&self) -> Vec<ConnectedClient>;
}
