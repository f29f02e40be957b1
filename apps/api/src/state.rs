use std::sync::Arc;

use crate::config::Config;
use crate::screening::engine::ScreeningEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable after startup; shared by every concurrent batch without locking.
    pub engine: Arc<ScreeningEngine>,
}
