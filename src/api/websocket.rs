//! WebSocket handler for real-time updates.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use tracing::{debug, error, info};

use super::state::AppState;
use crate::auth::IdentityResolver;
use crate::db::Database;

/// WebSocket upgrade handler.
///
/// Once upgraded, streams UpdateMessages from the ChangeNotifier to
/// the client.
pub async fn ws_handler<D, I>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<D, I>>,
) -> impl IntoResponse
where
    D: Database + 'static,
    I: IdentityResolver + 'static,
{
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an active WebSocket connection.
async fn handle_socket<D, I>(mut socket: WebSocket, state: AppState<D, I>)
where
    D: Database,
    I: IdentityResolver,
{
    info!("WebSocket client connected");

    let mut rx = state.notifier().subscribe();

    loop {
        tokio::select! {
            // Receive messages from client
            Some(msg) = socket.recv() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        debug!("Received from client: {}", text);
                    }
                    Ok(Message::Close(_)) => {
                        info!("Client closed connection");
                        break;
                    }
                    Err(e) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }

            // Send updates to client
            Ok(update) = rx.recv() => {
                let json = match serde_json::to_string(&update) {
                    Ok(j) => j,
                    Err(e) => {
                        error!("Failed to serialize update: {}", e);
                        continue;
                    }
                };

                if let Err(e) = socket.send(Message::Text(json.into())).await {
                    error!("Failed to send update: {}", e);
                    break;
                }
            }
        }
    }

    info!("WebSocket client disconnected");
}
