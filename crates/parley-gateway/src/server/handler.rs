//! WebSocket handler
//!
//! One connection per upgraded socket: a dedicated send task owns the sink,
//! and the receive loop processes inbound envelopes strictly in arrival
//! order. Handler errors never close the connection; only transport errors
//! and client closes do.

use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::protocol::EventEnvelope;
use crate::server::GatewayState;

/// Channel buffer size for outgoing envelopes
const OUTBOUND_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    let connection_id = Uuid::new_v4().to_string();

    let (tx, mut rx) = mpsc::channel::<EventEnvelope>(OUTBOUND_BUFFER_SIZE);
    let connection = state
        .ctx()
        .registry()
        .add_connection(connection_id.clone(), tx);

    tracing::info!(connection_id = %connection_id, "connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Send task: owns the sink until the channel closes
    let connection_id_send = connection_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            if let Ok(json) = envelope.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(
                        connection_id = %connection_id_send,
                        "failed to send to socket"
                    );
                    break;
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    // Receive loop: one envelope at a time, in arrival order
    while let Some(msg) = ws_stream.next().await {
        match msg {
            Ok(Message::Text(text)) => match EventEnvelope::from_json(&text) {
                Ok(envelope) => {
                    state
                        .dispatcher()
                        .dispatch(state.ctx(), &connection, envelope)
                        .await;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "malformed envelope"
                    );
                    let err = crate::error::GatewayError::Validation(
                        "malformed event envelope".to_string(),
                    );
                    let _ = connection.send(EventEnvelope::error(&err)).await;
                }
            },
            Ok(Message::Binary(_)) => {
                tracing::debug!(connection_id = %connection_id, "binary frames not supported");
                let err = crate::error::GatewayError::Validation(
                    "binary frames not supported".to_string(),
                );
                let _ = connection.send(EventEnvelope::error(&err)).await;
            }
            Ok(Message::Ping(_) | Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "client closed connection");
                break;
            }
            Err(e) => {
                tracing::warn!(connection_id = %connection_id, error = %e, "socket error");
                break;
            }
        }
    }

    state.ctx().registry().disconnect(&connection_id);
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "connection cleaned up");
}
