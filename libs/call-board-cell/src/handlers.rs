use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{CallBoard, CallBoardError, ClientEvent, ServerEvent};

/// Upgrade an HTTP request into a call board WebSocket connection.
pub async fn call_board_ws(State(board): State<CallBoard>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, board))
}

/// Drives one client connection for its whole lifetime.
///
/// Everything destined for this client funnels through a single mpsc
/// channel into one writer task, so unicast replies and forwarded
/// broadcasts share one ordered pipe to the socket.
async fn handle_socket(socket: WebSocket, board: CallBoard) {
    let connection_id = Uuid::new_v4();
    info!("New client connected: {}", connection_id);

    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(64);

    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Failed to serialize outbound event: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Subscribe before taking the snapshot so a change accepted in between
    // is delivered as a delta rather than lost.
    let mut events = board.subscribe();
    let snapshot = board.snapshot().await;
    if tx.send(ServerEvent::CurrentState(snapshot)).await.is_err() {
        board.disconnect(connection_id).await;
        return;
    }

    let forward_tx = tx.clone();
    let forwarder = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if forward_tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Slow connection skipped {} broadcast events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                debug!("WebSocket read error on {}: {}", connection_id, e);
                break;
            }
        };

        match message {
            Message::Text(text) => {
                let reply: Option<String> = match serde_json::from_str::<ClientEvent>(text.as_str())
                {
                    Ok(event) => handle_event(&board, connection_id, event)
                        .await
                        .err()
                        .map(|e| e.to_string()),
                    Err(e) => {
                        debug!("Malformed event from {}: {}", connection_id, e);
                        Some("Unrecognized or malformed event".to_string())
                    }
                };
                if let Some(reason) = reply {
                    if tx.send(ServerEvent::ErrorMessage(reason)).await.is_err() {
                        break;
                    }
                }
            }
            Message::Close(_) => break,
            // Ping/pong are answered by axum itself; binary frames carry
            // nothing in this protocol.
            _ => {}
        }
    }

    board.disconnect(connection_id).await;
    forwarder.abort();
    drop(tx);
    let _ = writer.await;
    info!("Client disconnected: {}", connection_id);
}

async fn handle_event(
    board: &CallBoard,
    connection_id: Uuid,
    event: ClientEvent,
) -> Result<(), CallBoardError> {
    match event {
        ClientEvent::ProfessionalLogin { name, role } => {
            board.login(connection_id, name, role).await.map(|_| ())
        }
        ClientEvent::ProfessionalLogout => {
            board.logout(connection_id).await;
            Ok(())
        }
        ClientEvent::AddPatient { name, priority } => board
            .add_patient(connection_id, name, priority)
            .await
            .map(|_| ()),
        ClientEvent::CallPatient(patient_id) => board
            .call_patient(connection_id, &patient_id)
            .await
            .map(|_| ()),
        ClientEvent::ConfirmOrStopCall {
            patient_id,
            confirmed,
        } => {
            board
                .confirm_or_stop_call(connection_id, &patient_id, confirmed)
                .await
        }
        ClientEvent::UpdateVideo(url) => {
            board.update_video(connection_id, url).await.map(|_| ())
        }
    }
}
