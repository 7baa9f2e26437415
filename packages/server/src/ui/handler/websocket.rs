//! WebSocket session handlers.
//!
//! One task pair per connection: the recv loop below drives the protocol
//! state machine (`Unbound → Joining → Bound → Closed`), and `pusher_loop`
//! drains the connection's bounded outbound queue into the socket.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, DisplayName, DrawingPayload, OUTBOUND_QUEUE_CAPACITY, RoomId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::JoinRoomError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the only writer of the socket: the recv loop and the usecases
/// reach the client exclusively through the channel, so outbound messages
/// keep their enqueue order.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client_id = ClientId::generate();
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::channel::<String>(OUTBOUND_QUEUE_CAPACITY);
    let mut send_task = pusher_loop(rx, sender);

    // The handler keeps a sender only while the connection is unbound (for
    // room_error replies and the join acknowledgment). After a successful
    // join it is dropped, leaving the pusher's registered sender as the only
    // one: an overflow-disconnect there closes the channel, which ends
    // `pusher_loop` and tears the connection down.
    let mut local_tx = Some(tx);
    let mut bound_room: Option<RoomId> = None;

    tracing::info!("connection '{}' opened", client_id);

    loop {
        tokio::select! {
            maybe_msg = receiver.next() => {
                let Some(msg) = maybe_msg else { break };
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::debug!("WebSocket error on '{}': {}", client_id, e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        let event = match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => event,
                            Err(e) => {
                                // Expected during connect/disconnect races;
                                // discarded, never surfaced to the user.
                                tracing::debug!(
                                    "discarding malformed event from '{}': {}",
                                    client_id,
                                    e
                                );
                                continue;
                            }
                        };
                        handle_event(&state, &client_id, &mut bound_room, &mut local_tx, event)
                            .await;
                    }
                    Message::Ping(_) => {
                        // Ping/pong is handled automatically by the WebSocket
                        // protocol
                    }
                    Message::Close(_) => {
                        tracing::info!("connection '{}' requested close", client_id);
                        break;
                    }
                    _ => {}
                }
            }
            _ = &mut send_task => {
                // Outbound queue closed: the pusher disconnected this client
                tracing::info!("outbound channel for '{}' closed, dropping connection", client_id);
                break;
            }
        }
    }

    send_task.abort();

    // A connection that disconnects while unbound was never registered
    // anywhere and requires no cleanup.
    if let Some(room_id) = bound_room {
        let remaining = state.leave_room_usecase.execute(&room_id, &client_id).await;
        let roster = serde_json::to_string(&ServerEvent::participants_update(&remaining)).unwrap();
        state
            .leave_room_usecase
            .broadcast_roster(&room_id, &roster)
            .await;
        tracing::info!("connection '{}' left room '{}'", client_id, room_id);
    }
}

/// Dispatch one inbound event against the connection's protocol state.
async fn handle_event(
    state: &Arc<AppState>,
    client_id: &ClientId,
    bound_room: &mut Option<RoomId>,
    local_tx: &mut Option<mpsc::Sender<String>>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinRoom { room_id } => {
            if bound_room.is_some() {
                // Rebinding is not supported: a client that wants a different
                // room opens a new connection.
                tracing::debug!(
                    "ignoring join_room on already-bound connection '{}'",
                    client_id
                );
                return;
            }
            let Some(tx) = local_tx.as_ref() else {
                return;
            };

            match state
                .join_room_usecase
                .execute(&room_id, client_id.clone(), tx.clone())
                .await
            {
                Ok((room, snapshot)) => {
                    let joined = serde_json::to_string(&ServerEvent::JoinedRoom {
                        room_id: room.as_str().to_string(),
                    })
                    .unwrap();
                    let bootstrap =
                        serde_json::to_string(&ServerEvent::room_state(snapshot)).unwrap();
                    // A fresh queue cannot be full; a failure here means the
                    // peer is already gone and cleanup happens via the socket.
                    let _ = tx.try_send(joined);
                    let _ = tx.try_send(bootstrap);

                    let participants = state.join_room_usecase.participants(&room).await;
                    let roster =
                        serde_json::to_string(&ServerEvent::participants_update(&participants))
                            .unwrap();
                    state
                        .join_room_usecase
                        .broadcast_participants(&room, &roster)
                        .await;

                    tracing::info!("connection '{}' joined room '{}'", client_id, room);
                    *bound_room = Some(room);
                    // From here on the pusher owns the only sender.
                    *local_tx = None;
                }
                Err(JoinRoomError::RoomNotFound(_)) => {
                    tracing::info!(
                        "connection '{}' rejected: unknown room '{}'",
                        client_id,
                        room_id
                    );
                    let error = serde_json::to_string(&ServerEvent::RoomError {
                        error: "Invalid room id".to_string(),
                    })
                    .unwrap();
                    let _ = tx.try_send(error);
                }
            }
        }

        ClientEvent::SetName { name } => {
            let Some(room_id) = bound_room.as_ref() else {
                tracing::debug!("discarding set_name from unbound connection '{}'", client_id);
                return;
            };
            let roster = state
                .set_name_usecase
                .execute(room_id, client_id, DisplayName::new(&name))
                .await;
            let message =
                serde_json::to_string(&ServerEvent::participants_update(&roster)).unwrap();
            state
                .set_name_usecase
                .broadcast_roster(room_id, client_id, &message)
                .await;
        }

        ClientEvent::CodeChange {
            room_id,
            code,
            language,
        } => {
            let Some(bound) = bound_room.as_ref() else {
                tracing::debug!(
                    "discarding code_change from unbound connection '{}'",
                    client_id
                );
                return;
            };
            if !event_targets_bound_room(bound, &room_id) {
                tracing::debug!(
                    "discarding code_change for '{}' from connection bound to '{}'",
                    room_id,
                    bound
                );
                return;
            }
            let message = serde_json::to_string(&ServerEvent::CodeUpdate {
                code: code.clone(),
                language: language.clone(),
            })
            .unwrap();
            state
                .update_code_usecase
                .execute(bound, client_id, code, language, message)
                .await;
        }

        ClientEvent::WhiteboardChange { room_id, drawing } => {
            let Some(bound) = bound_room.as_ref() else {
                tracing::debug!(
                    "discarding whiteboard_change from unbound connection '{}'",
                    client_id
                );
                return;
            };
            if !event_targets_bound_room(bound, &room_id) {
                tracing::debug!(
                    "discarding whiteboard_change for '{}' from connection bound to '{}'",
                    room_id,
                    bound
                );
                return;
            }
            let message = serde_json::to_string(&ServerEvent::WhiteboardUpdate {
                drawing: drawing.clone(),
            })
            .unwrap();
            let payload = DrawingPayload::from(drawing);
            state
                .update_whiteboard_usecase
                .execute(bound, client_id, payload, message)
                .await;
        }
    }
}

/// A mutation event must name the room its connection is bound to; anything
/// else is a malformed event and is discarded.
fn event_targets_bound_room(bound: &RoomId, raw_room_id: &str) -> bool {
    RoomId::new(raw_room_id).is_ok_and(|room_id| &room_id == bound)
}
