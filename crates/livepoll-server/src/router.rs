//! Axum router construction.
//!
//! Assembles both surfaces (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Livepoll server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/updates` -- `WebSocket` push surface
/// - `GET /api/votes` -- current tally
/// - `POST /api/vote` -- cast a vote
/// - `POST /api/reset` -- zero every counter
/// - `GET /health` -- health probe
///
/// CORS is configured to allow any origin, matching the original deployment
/// where the voting page is served from a different origin. In production
/// this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket push surface
        .route("/ws/updates", get(ws::ws_updates))
        // REST surface
        .route("/api/votes", get(handlers::get_votes))
        .route("/api/vote", post(handlers::post_vote))
        .route("/api/reset", post(handlers::post_reset))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
