//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use maku_shared::protocol::RoomState;

use crate::{infrastructure::dto::http::RoomDetailDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current room state snapshot, as sent to WebSocket clients.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<RoomState> {
    Json(state.get_room_state_usecase.execute().await)
}

/// Debug endpoint: room state, creation time, and connected clients.
pub async fn debug_room(State(state): State<Arc<AppState>>) -> Json<RoomDetailDto> {
    let detail = state.get_room_detail_usecase.execute().await;
    Json(RoomDetailDto::from_parts(detail.room, detail.clients))
}
