//! WebSocket push channel.
//!
//! Each socket gets the current board and turn on connect and again after
//! every change to its table. Clients may also send commands over the same
//! socket; each command is answered with an [`Ack`].

use crate::events::{Ack, Action, ClientCommand, ServerEvent};
use crate::routes::OpenedTable;
use crate::table::Table;
use axum::extract::WebSocketUpgrade;
use axum::extract::ws::{Message, WebSocket};
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, instrument, warn};

/// Upgrades the request and serves the table's push channel.
pub async fn ws_handler(OpenedTable(table): OpenedTable, ws: WebSocketUpgrade) -> Response {
    debug!(table = %table.id(), "WebSocket upgrade requested");
    ws.on_upgrade(move |socket| handle_socket(table, socket))
}

#[instrument(skip_all, fields(table = %table.id()))]
async fn handle_socket(table: Arc<Table>, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    // Subscribe first so nothing committed after the initial snapshot is missed.
    let mut updates = table.subscribe();
    info!(watchers = table.watchers(), "Client connected");

    if send_snapshot(&mut sink, &table.snapshot()).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(snapshot) => {
                    if send_snapshot(&mut sink, &snapshot).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Client lagging, skipping to newest update");
                }
                Err(RecvError::Closed) => break,
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let ack = handle_command(&table, text.as_str());
                    if send(&mut sink, &ServerEvent::Ack(ack)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "WebSocket receive failed");
                    break;
                }
            },
        }
    }

    info!("Client disconnected");
}

/// Parses and executes one client frame.
#[instrument(skip(table), fields(table = %table.id()))]
pub fn handle_command(table: &Table, text: &str) -> Ack {
    let command = match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "Unparseable client frame");
            return Ack {
                action: Action::Unknown,
                accepted: false,
            };
        }
    };

    let action = command.action();
    let accepted = match command {
        ClientCommand::Move(raw) => table.submit_raw(raw),
        ClientCommand::Reset => table.reset(),
        ClientCommand::NewGame => table.new_game(),
    };
    debug!(?action, accepted, "Client command handled");
    Ack { action, accepted }
}

async fn send_snapshot(
    sink: &mut SplitSink<WebSocket, Message>,
    snapshot: &parlor_tictactoe::Snapshot,
) -> Result<(), axum::Error> {
    for event in ServerEvent::from_snapshot(snapshot) {
        send(sink, &event).await?;
    }
    Ok(())
}

async fn send(
    sink: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Failed to encode event");
            return Ok(());
        }
    };
    sink.send(Message::Text(text.into())).await.inspect_err(|e| {
        debug!(error = %e, "WebSocket send failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_tictactoe::{Mark, Turn};

    #[test]
    fn test_move_command_applies() {
        let table = Table::new("t".into(), 4);
        let ack = handle_command(
            &table,
            r#"{"event":"move","data":{"row":0,"col":0,"player":"x"}}"#,
        );
        assert_eq!(ack, Ack { action: Action::Move, accepted: true });
        assert_eq!(table.turn(), Turn::ToMove(Mark::O));
    }

    #[test]
    fn test_rejected_and_garbage_frames() {
        let table = Table::new("t".into(), 4);
        let ack = handle_command(
            &table,
            r#"{"event":"move","data":{"row":"a","col":0,"player":"x"}}"#,
        );
        assert_eq!(ack, Ack { action: Action::Move, accepted: false });

        let ack = handle_command(&table, "not json");
        assert_eq!(ack, Ack { action: Action::Unknown, accepted: false });

        let ack = handle_command(&table, r#"{"event":"new_game"}"#);
        assert_eq!(ack, Ack { action: Action::NewGame, accepted: false });

        let ack = handle_command(&table, r#"{"event":"reset"}"#);
        assert_eq!(ack, Ack { action: Action::Reset, accepted: true });
    }
}
