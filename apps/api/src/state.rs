use std::sync::Arc;

use crate::config::Config;
use crate::workflow::HiringWorkflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; each request runs it with its own state.
    pub workflow: Arc<HiringWorkflow>,
}
