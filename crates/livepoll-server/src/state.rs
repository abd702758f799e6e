//! Shared application state for the Livepoll server.
//!
//! [`AppState`] wires the mutation gateway to the broadcast hub and is the
//! one value injected into every handler via Axum's `State` extractor. The
//! tally store is built here from the configured option set rather than
//! living in a process-wide static, so tests and future multi-instance
//! deployments can each own an isolated instance.

use std::sync::Arc;

use livepoll_core::{MutationGateway, TallyStore, UpdatePublisher};
use livepoll_types::OptionId;

use crate::hub::BroadcastHub;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] by the caller. Both transport surfaces mutate through
/// [`AppState::gateway`]; the gateway publishes every successful mutation
/// through [`AppState::hub`], which the `WebSocket` handlers also use to
/// register and unregister observers.
pub struct AppState {
    /// The single mutation authority for the tally.
    pub gateway: MutationGateway,

    /// Observer registry and broadcast fan-out.
    pub hub: Arc<BroadcastHub>,
}

impl AppState {
    /// Build the full state graph for the given option set.
    pub fn new(options: &[OptionId]) -> Self {
        let hub = Arc::new(BroadcastHub::new());
        let publisher: Arc<dyn UpdatePublisher> = hub.clone();
        let gateway = MutationGateway::new(TallyStore::new(options), publisher);

        Self { gateway, hub }
    }
}
