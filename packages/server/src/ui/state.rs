//! Shared application state for the axum handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetRoomDetailUseCase, GetRoomStateUseCase,
    UpdateStateUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub update_state_usecase: Arc<UpdateStateUseCase>,
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
