//! HTTP and `WebSocket` surfaces for the Livepoll tally service.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **REST endpoints** for reading the tally, casting votes, resetting,
//!   and health probing (the synchronous request/response surface)
//! - **`WebSocket` endpoint** (`/ws/updates`) pushing the full tally and
//!   ranking to every observer after each successful mutation, with a
//!   catch-up snapshot sent immediately on connect (the push surface)
//! - **Minimal HTML status page** (`GET /`) showing live counters and the
//!   available endpoints
//!
//! # Architecture
//!
//! Both surfaces funnel mutations through the
//! [`MutationGateway`](livepoll_core::MutationGateway), which serializes
//! them and hands the resulting update to the [`hub::BroadcastHub`] -- the
//! observer registry with one bounded queue per connection. Delivery is
//! fire-and-forget: a stalled observer drops updates without blocking the
//! mutation path or any other observer.

pub mod error;
pub mod handlers;
pub mod hub;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
