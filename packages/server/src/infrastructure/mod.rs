//! Infrastructure layer: concrete implementations of the domain interfaces
//! plus the DTOs for the HTTP surface.

pub mod dto;
pub mod pusher;
pub mod store;

pub use pusher::WebSocketMessagePusher;
pub use store::InMemoryStateStore;
