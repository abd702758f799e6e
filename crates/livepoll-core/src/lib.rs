//! Tally state, ranking computation, and the mutation gateway for Livepoll.
//!
//! This crate holds everything with real consistency concerns and nothing
//! transport-specific:
//!
//! - [`store::TallyStore`] -- the canonical counters, single source of truth
//! - [`ranking::rank`] -- pure, deterministic tally-to-ranking derivation
//! - [`gateway::MutationGateway`] -- the single mutation authority both
//!   transport surfaces call into, publishing one update per mutation
//!   through the [`gateway::UpdatePublisher`] seam
//! - [`config`] -- typed YAML configuration for the service binary
//!
//! The HTTP and `WebSocket` surfaces live in `livepoll-server`; they depend
//! on this crate, never the other way around.

pub mod config;
pub mod error;
pub mod gateway;
pub mod ranking;
pub mod store;

// Re-export primary types for convenience.
pub use error::TallyError;
pub use gateway::{MutationGateway, UpdatePublisher};
pub use store::TallyStore;
