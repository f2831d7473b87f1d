//! Presentation sync client: viewer and controller in one binary.
//!
//! Connects to a Maku sync server, prints every room-state snapshot the hub
//! broadcasts, and turns prompt commands (next, goto, sound ...) into
//! partial state updates. Automatically reconnects on disconnection (max 5
//! attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin maku-client
//! cargo run --bin maku-client -- --client-id projector
//! ```

use clap::Parser;

use maku_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "maku-client")]
#[command(about = "CLI viewer/controller for the Maku state-sync hub", long_about = None)]
struct Args {
    /// Client ID (must be unique per live connection; random when omitted)
    #[arg(short = 'c', long)]
    client_id: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let client_id = args
        .client_id
        .unwrap_or_else(|| format!("client-{}", std::process::id()));

    if let Err(e) = maku_client::run_client(args.url, client_id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
