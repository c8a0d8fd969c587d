use std::sync::Arc;

use crate::config::Config;
use crate::store::ContentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable content store. Postgres in production, in-memory for `memory://`.
    pub store: Arc<dyn ContentStore>,
    pub config: Config,
}
