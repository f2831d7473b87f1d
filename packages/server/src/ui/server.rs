//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetRoomDetailUseCase, GetRoomStateUseCase,
    UpdateStateUseCase,
};

use super::{
    handler::{debug_room, get_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Maku state-sync server.
///
/// Wraps the wired usecases and runs the axum application: one WebSocket
/// endpoint for the sync protocol and a small HTTP surface for health and
/// inspection.
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    update_state_usecase: Arc<UpdateStateUseCase>,
    get_room_state_usecase: Arc<GetRoomStateUseCase>,
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        update_state_usecase: Arc<UpdateStateUseCase>,
        get_room_state_usecase: Arc<GetRoomStateUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            update_state_usecase,
            get_room_state_usecase,
            get_room_detail_usecase,
        }
    }

    /// Run the state-sync server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server fails
    /// while running. Either is fatal at process scope; per-connection
    /// failures never surface here.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            update_state_usecase: self.update_state_usecase,
            get_room_state_usecase: self.get_room_state_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        let app = Router::new()
            // WebSocket sync endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/state", get(get_state))
            .route("/debug/room", get(debug_room))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("State-sync server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
