//! REST endpoint handlers: the request/response surface.
//!
//! All reads go through [`MutationGateway::current`](livepoll_core::MutationGateway::current)
//! snapshots; mutations go through the gateway's vote and reset entry
//! points, which also trigger the broadcast to push-surface observers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/votes` | Current tally as a JSON object |
//! | `POST` | `/api/vote` | Cast a vote; 400 on unknown option |
//! | `POST` | `/api/reset` | Zero every counter |
//! | `GET` | `/health` | Health probe with timestamp and tally |

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::Utc;
use livepoll_types::{OptionId, RankingEntry, Tally, TallyUpdate};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/vote`.
#[derive(Debug, serde::Deserialize)]
pub struct VoteRequest {
    /// Target option identifier.
    pub option: OptionId,
}

/// Response body for successful mutations on either mutation endpoint.
#[derive(Debug, serde::Serialize)]
struct MutationResponse {
    /// Always `true`; failures are reported through [`ApiError`] instead.
    success: bool,
    /// Full tally after the mutation.
    votes: Tally,
    /// Full ordered ranking after the mutation.
    ranking: Vec<RankingEntry>,
}

impl From<TallyUpdate> for MutationResponse {
    fn from(update: TallyUpdate) -> Self {
        Self {
            success: true,
            votes: update.votes,
            ranking: update.ranking,
        }
    }
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing live counters and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let current = state.gateway.current().await;
    let total = current.votes.total();
    let option_count = current.votes.len();
    let observer_count = state.hub.observer_count();

    let counter_rows: String = current
        .votes
        .iter()
        .map(|(option, count)| format!("            <li><code>{option}</code>: {count}</li>\n"))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Livepoll</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Livepoll</h1>
    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Total votes</div>
            <div class="value">{total}</div>
        </div>
        <div class="metric">
            <div class="label">Options</div>
            <div class="value">{option_count}</div>
        </div>
        <div class="metric">
            <div class="label">Observers</div>
            <div class="value">{observer_count}</div>
        </div>
    </div>

    <h2>Counters</h2>
    <ul>
{counter_rows}    </ul>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET <a href="/api/votes">/api/votes</a> -- Current tally</li>
        <li>POST /api/vote -- Cast a vote (<code>{{"option": "option1"}}</code>)</li>
        <li>POST /api/reset -- Zero every counter</li>
        <li>GET <a href="/health">/health</a> -- Health probe</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/updates</code> -- Live tally and ranking stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/votes -- current tally
// ---------------------------------------------------------------------------

/// Return the current tally as a plain JSON object of option to count.
pub async fn get_votes(State(state): State<Arc<AppState>>) -> Json<Tally> {
    Json(state.gateway.current().await.votes)
}

// ---------------------------------------------------------------------------
// POST /api/vote -- cast a vote
// ---------------------------------------------------------------------------

/// Cast one vote for the option named in the request body.
///
/// On success the response carries the full updated tally and ranking, and
/// the same update has already been broadcast to every push-surface
/// observer. An option outside the configured set yields a 400 with no
/// state change and no broadcast.
pub async fn post_vote(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let update = state.gateway.vote(&body.option).await?;
    info!(option = %body.option, "vote accepted");
    Ok(Json(MutationResponse::from(update)))
}

// ---------------------------------------------------------------------------
// POST /api/reset -- zero the tally
// ---------------------------------------------------------------------------

/// Zero every counter as one atomic step and broadcast the cleared state.
pub async fn post_reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let update = state.gateway.reset().await;
    info!("tally reset");
    Json(MutationResponse::from(update))
}

// ---------------------------------------------------------------------------
// GET /health -- health probe
// ---------------------------------------------------------------------------

/// Health probe: service status, server time, and the current tally.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let votes = state.gateway.current().await.votes;

    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "votes": votes,
    }))
}
