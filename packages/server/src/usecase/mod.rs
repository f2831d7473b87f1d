//! UseCase layer: one struct per hub operation.
//!
//! The hub processes inbound events (connect, update, disconnect) as a
//! serialized stream. [`EventGate`] is the shared lock realizing that
//! stream: the connect usecase's register-then-snapshot sequence and the
//! update usecase's merge-then-broadcast sequence each run as one
//! indivisible unit under it, so a freshly joined client can never observe
//! a snapshot older than a broadcast it already received.

use std::sync::Arc;

use tokio::sync::Mutex;

mod connect_client;
mod disconnect_client;
mod error;
mod get_room_detail;
mod get_room_state;
mod update_state;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::ConnectError;
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use get_room_state::GetRoomStateUseCase;
pub use update_state::UpdateStateUseCase;

/// Shared gate serializing hub event handling.
///
/// Every guarded section only performs in-memory work and non-blocking
/// channel sends, so holding the gate never waits on the network.
pub type EventGate = Arc<Mutex<()>>;

/// Create the gate shared by the connect and update usecases.
pub fn event_gate() -> EventGate {
    Arc::new(Mutex::new(()))
}
