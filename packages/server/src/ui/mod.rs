//! UI layer: axum server, WebSocket and HTTP handlers.

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
