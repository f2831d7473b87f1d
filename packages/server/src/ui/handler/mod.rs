mod http;
mod websocket;

pub use http::{debug_room, get_state, health_check};
pub use websocket::websocket_handler;
