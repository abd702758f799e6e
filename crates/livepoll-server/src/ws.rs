//! `WebSocket` handler: the push surface and observer lifecycle.
//!
//! Clients connect to `GET /ws/updates` and immediately receive the current
//! tally and ranking (the catch-up snapshot). Every successful mutation is
//! then pushed as a further `update` frame. Inbound `vote` frames mutate the
//! tally through the gateway; frames naming an unknown option, like frames
//! that fail to parse, are dropped without a reply. That silence mirrors the
//! original service and is deliberate: the request/response surface is where
//! invalid options surface as errors.
//!
//! An observer's lifecycle is strictly connect then disconnect. There is no
//! resumption: a reconnecting client registers as a brand-new observer and
//! receives only current state, never missed history.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use livepoll_types::{OptionId, RankingEntry, Tally, TallyUpdate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::AppState;

/// Message sent by a push-surface client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Cast a vote for the named option.
    Vote {
        /// Target option identifier.
        option: OptionId,
    },
}

/// Message pushed to a push-surface client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full state after a mutation, and the catch-up snapshot on connect.
    Update {
        /// Current tally.
        votes: Tally,
        /// Current ordered ranking.
        ranking: Vec<RankingEntry>,
    },
}

impl From<TallyUpdate> for ServerMessage {
    fn from(update: TallyUpdate) -> Self {
        Self::Update {
            votes: update.votes,
            ranking: update.ranking,
        }
    }
}

/// Upgrade an HTTP request to a `WebSocket` connection and run the observer
/// lifecycle.
///
/// # Route
///
/// `GET /ws/updates`
pub async fn ws_updates(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle one observer from registration to disconnect.
///
/// Registration queues the catch-up snapshot before the observer is visible
/// to broadcasts, so the first frame on the wire is always the state at
/// connect time. The loop then forwards queued updates to the socket and
/// consumes client frames until the connection ends, at which point the
/// observer is unregistered (terminal, no further transitions).
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let catch_up = state.gateway.current().await;
    let (observer_id, mut rx) = state.hub.register(catch_up);
    debug!(observer = %observer_id, "observer connected");

    loop {
        tokio::select! {
            // Forward queued updates to the socket.
            update = rx.recv() => {
                let Some(update) = update else {
                    // Registry side of the queue is gone.
                    break;
                };
                let frame = ServerMessage::from(update);
                let json = match serde_json::to_string(&frame) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!(observer = %observer_id, "failed to serialize update frame: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!(observer = %observer_id, "observer disconnected (send failed)");
                    break;
                }
            }
            // Consume client frames: votes in, close and ping handling.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(text.as_str()) {
                            Ok(ClientMessage::Vote { option }) => {
                                // Silent drop on failure: no reply frame on
                                // this surface, no state change.
                                if let Err(e) = state.gateway.vote(&option).await {
                                    debug!(observer = %observer_id, error = %e, "vote frame dropped");
                                }
                            }
                            Err(e) => {
                                debug!(observer = %observer_id, error = %e, "unparseable frame dropped");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(observer = %observer_id, "observer disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(observer = %observer_id, "observer disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(observer = %observer_id, "websocket error: {e}");
                        break;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }

    state.hub.unregister(observer_id);
}
