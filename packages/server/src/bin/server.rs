//! Presentation state-sync server.
//!
//! Holds one shared room state (current slide, active sound cue), merges
//! partial updates from any connected client, and rebroadcasts the full
//! state to every connected client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin maku-server
//! cargo run --bin maku-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use maku_server::{
    domain::{Room, Timestamp},
    infrastructure::{InMemoryStateStore, WebSocketMessagePusher},
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetRoomDetailUseCase, GetRoomStateUseCase,
        UpdateStateUseCase, event_gate,
    },
};
use maku_shared::{logger::setup_logger, time::now_millis};

#[derive(Parser, Debug)]
#[command(name = "maku-server")]
#[command(about = "Presentation state-sync hub over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // 1. State store (in-memory, lost on restart)
    let room = Arc::new(Mutex::new(Room::new(Timestamp::new(now_millis()))));
    let store = Arc::new(InMemoryStateStore::new(room));

    // 2. Connection registry / message pusher
    let pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. UseCases; connect and update share one event gate so register+
    //    snapshot and merge+broadcast serialize against each other
    let gate = event_gate();
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        store.clone(),
        pusher.clone(),
        gate.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(pusher.clone()));
    let update_state_usecase = Arc::new(UpdateStateUseCase::new(
        store.clone(),
        pusher.clone(),
        gate,
    ));
    let get_room_state_usecase = Arc::new(GetRoomStateUseCase::new(store.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(store, pusher));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        update_state_usecase,
        get_room_state_usecase,
        get_room_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
