//! HTTP API response DTOs.

use maku_shared::protocol::RoomState;
use maku_shared::time::millis_to_rfc3339;
use serde::Serialize;

use crate::domain::{ConnectedClient, Room};

/// Response body for `GET /debug/room`.
#[derive(Debug, Clone, Serialize)]
pub struct RoomDetailDto {
    pub state: RoomState,
    pub created_at: String,
    pub clients: Vec<ClientDetailDto>,
}

/// One connected client in the debug listing.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDetailDto {
    pub client_id: String,
    pub connected_at: String,
}

impl RoomDetailDto {
    pub fn from_parts(room: Room, clients: Vec<ConnectedClient>) -> Self {
        Self {
            state: room.state().clone(),
            created_at: millis_to_rfc3339(room.created_at().value()),
            clients: clients.into_iter().map(ClientDetailDto::from).collect(),
        }
    }
}

impl From<ConnectedClient> for ClientDetailDto {
    fn from(client: ConnectedClient) -> Self {
        Self {
            client_id: client.id.into_string(),
            connected_at: millis_to_rfc3339(client.connected_at.value()),
        }
    }
}
