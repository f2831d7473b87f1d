//! WebSocket connection handlers.
//!
//! Connection lifecycle: a transport accept registers the connection and
//! queues its initial snapshot (via the connect usecase), inbound text
//! frames are decoded and routed to the update usecase, and transport
//! close or error unregisters the connection. Malformed frames and
//! client-sent `state` envelopes are dropped here with a log line and
//! nothing else: no error reply, no connection teardown, no state change.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use maku_shared::protocol::Envelope;

use crate::{domain::ClientId, ui::state::AppState, usecase::ConnectError};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Optional client identity; a UUID is assigned when absent.
    pub client_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let client_id_str = query
        .client_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let client_id = match ClientId::try_from(client_id_str.clone()) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid client_id '{}': {}", client_id_str, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Channel carrying encoded envelopes to this client's socket task
    let (tx, rx) = mpsc::unbounded_channel();

    match state.connect_client_usecase.execute(client_id.clone(), tx).await {
        Ok(_connected_at) => {
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, client_id, rx)))
        }
        Err(ConnectError::DuplicateClientId(id)) => {
            tracing::warn!("Client '{}' is already connected. Rejecting connection.", id);
            Err(StatusCode::CONFLICT)
        }
        Err(ConnectError::SnapshotDeliveryFailed(reason)) => {
            tracing::warn!("Failed to queue initial snapshot: {}", reason);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Spawns a task that drains the client's channel into its WebSocket sink.
///
/// The initial snapshot is already queued at spawn time, so it is always the
/// first frame this connection receives.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    client_id: ClientId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);

    let client_id_for_recv = client_id.clone();
    let state_for_recv = state.clone();

    // Receive frames from this client and route updates to the hub
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", client_id_for_recv, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match Envelope::decode(&text) {
                    Ok(Envelope::Update(patch)) => {
                        let merged = state_for_recv.update_state_usecase.execute(patch).await;
                        tracing::info!(
                            "update from '{}' merged: slide={} sound={:?}",
                            client_id_for_recv,
                            merged.slide,
                            merged.sound
                        );
                    }
                    Ok(Envelope::State(_)) => {
                        // Only the hub sends state envelopes; one arriving
                        // from a client is ignored, not treated as a fault.
                        tracing::debug!(
                            "ignoring state envelope from client '{}'",
                            client_id_for_recv
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            "dropping malformed message from '{}': {}",
                            client_id_for_recv,
                            e
                        );
                    }
                },
                Message::Binary(_) => {
                    tracing::warn!(
                        "dropping binary frame from '{}': protocol is text-only",
                        client_id_for_recv
                    );
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping from '{}'", client_id_for_recv);
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", client_id_for_recv);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_client_usecase.execute(&client_id).await;
}
