//! Per-connection handler: one read loop and one writer task per socket.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`]. The flow is:
//!   1. Split the socket; spawn the writer task over an unbounded channel.
//!   2. Hand the channel to the matchmaker → the connection enters
//!      matchmaking (and may be paired immediately).
//!   3. Loop: receive text frames, feed them to the matchmaker.
//!   4. On close or error: tell the matchmaker the connection is gone.

use std::sync::Arc;

use sidewinder_protocol::ServerMessage;
use sidewinder_store::MoveLog;
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::transport::WebSocketConnection;

/// Handles a single connection from accept to teardown.
pub(crate) async fn handle_connection<L: MoveLog>(
    conn: WebSocketConnection,
    state: Arc<ServerState<L>>,
) {
    let conn_id = conn.id();
    let (sender, mut outbound) = mpsc::unbounded_channel::<ServerMessage>();
    let (mut ws_sender, mut ws_receiver) = conn.split();

    // Writer task: serialize and transmit everything the matchmaker
    // decides this connection should hear. Ends when the matchmaker
    // drops the channel (teardown) or the socket refuses a frame.
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let text = match message.to_json() {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!(%conn_id, %err, "dropping unserializable message");
                    continue;
                }
            };
            if ws_sender.send(text).await.is_err() {
                break;
            }
        }
    });

    state.matchmaker.lock().await.connect(conn_id, sender).await;

    // Read loop. A clean close and a transport error end the session the
    // same way — disconnects are expected control flow here.
    loop {
        match ws_receiver.recv().await {
            Ok(Some(text)) => {
                state
                    .matchmaker
                    .lock()
                    .await
                    .handle_message(conn_id, &text)
                    .await;
            }
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed");
                break;
            }
            Err(err) => {
                tracing::debug!(%conn_id, %err, "receive failed");
                break;
            }
        }
    }

    state.matchmaker.lock().await.disconnect(conn_id);

    // disconnect() dropped our channel, so the writer drains what's left
    // (at most the abandonment notice, which the closed socket refuses)
    // and exits on its own.
    let _ = writer.await;
}
