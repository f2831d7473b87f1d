//! WebSocket client session management.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use maku_shared::protocol::{Envelope, RoomState};
use maku_shared::time::now_millis;

use super::{
    command::Command, error::ClientError, formatter::StateFormatter, ui::redisplay_prompt,
};

/// Run one WebSocket client session until the connection drops or the user
/// exits.
pub async fn run_client_session(
    url: &str,
    client_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Construct URL with client_id as query parameter
    let url = format!("{}?client_id={}", url, client_id);

    let (ws_stream, response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            let error_msg = e.to_string();

            // HTTP 409 Conflict means the id is taken by a live connection
            if error_msg.contains("409") || error_msg.contains("Conflict") {
                return Err(Box::new(ClientError::DuplicateClientId(
                    client_id.to_string(),
                )));
            }

            return Err(Box::new(ClientError::ConnectionError(error_msg)));
        }
    };

    if response.status().as_u16() == 409 {
        return Err(Box::new(ClientError::DuplicateClientId(
            client_id.to_string(),
        )));
    }

    tracing::info!("Connected to sync server!");
    println!(
        "\nYou are '{}'. The first message below is the current room state.\n\
         Type 'help' for commands. Press Ctrl+C to exit.\n",
        client_id
    );

    let (mut write, mut read) = ws_stream.split();

    // Last snapshot received from the hub; the only source of displayed
    // state, and the base for relative commands like 'next'.
    let last_state = Arc::new(Mutex::new(RoomState::default()));

    let client_id_for_read = client_id.to_string();
    let state_for_read = last_state.clone();

    // Handle incoming snapshots
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => match Envelope::decode(&text) {
                    Ok(Envelope::State(state)) => {
                        *state_for_read.lock().expect("state lock poisoned") = state.clone();
                        print!("{}", StateFormatter::format_state(&state, now_millis()));
                        redisplay_prompt(&client_id_for_read);
                    }
                    Ok(Envelope::Update(_)) => {
                        // The hub never sends update envelopes
                        tracing::debug!("ignoring update envelope from server");
                    }
                    Err(e) => {
                        tracing::debug!("unparseable server frame: {}", e);
                        print!("{}", StateFormatter::format_raw_message(&text));
                        redisplay_prompt(&client_id_for_read);
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    let client_id = client_id.to_string();
    let client_id_for_prompt = client_id.clone();

    // Channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", client_id_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let state_for_write = last_state.clone();
    let client_id_for_write = client_id.clone();

    // Turn prompt input into update envelopes
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt(&client_id_for_write);
                    continue;
                }
            };

            match &command {
                Command::Show => {
                    let state = state_for_write.lock().expect("state lock poisoned").clone();
                    print!("{}", StateFormatter::format_state(&state, now_millis()));
                    redisplay_prompt(&client_id_for_write);
                    continue;
                }
                Command::Help => {
                    println!("{}", StateFormatter::format_help());
                    redisplay_prompt(&client_id_for_write);
                    continue;
                }
                _ => {}
            }

            let current_slide = state_for_write.lock().expect("state lock poisoned").slide;
            let Some(patch) = command.to_patch(current_slide) else {
                continue;
            };

            let json = Envelope::Update(patch).encode();
            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send update: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}
